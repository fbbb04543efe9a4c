//! Integration tests for the one-shot booking confirmation handoff.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_bytes, body_json, booking_json, build_test_app, send};
use uuid::Uuid;

fn confirmation_uri(tab: Uuid) -> String {
    format!("/api/tabs/{}/booking-confirmation", tab)
}

#[tokio::test]
async fn confirmation_is_shown_once() {
    let app = build_test_app();
    let tab = Uuid::new_v4();

    let stashed = send(&app.router, Method::PUT, &confirmation_uri(tab), &[], Some(booking_json())).await;
    assert_eq!(stashed.status(), StatusCode::NO_CONTENT);

    let first = send(&app.router, Method::GET, &confirmation_uri(tab), &[], None).await;
    assert_eq!(first.status(), StatusCode::OK);

    let view = body_json(first).await;
    assert_eq!(view["booking"]["bookingId"], 1042);
    assert_eq!(view["totalGuests"], 3);
    assert_eq!(view["formattedTotal"], "S$284,500");
    assert_eq!(view["formattedTravelDate"], "Saturday, March 15, 2025");
    assert!(view["receipt"].as_str().unwrap().contains("Total Guests: 3"));

    // Reload: nothing left to show.
    let second = send(&app.router, Method::GET, &confirmation_uri(tab), &[], None).await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    assert_eq!(second.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn direct_navigation_redirects_home() {
    let app = build_test_app();
    let response = send(&app.router, Method::GET, &confirmation_uri(Uuid::new_v4()), &[], None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn invalid_confirmation_is_rejected() {
    let app = build_test_app();
    let tab = Uuid::new_v4();
    let mut booking = booking_json();
    booking["children"] = serde_json::json!(0);

    let response = send(&app.router, Method::PUT, &confirmation_uri(tab), &[], Some(booking)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("child"));
}

#[tokio::test]
async fn receipt_download_is_a_text_attachment() {
    let app = build_test_app();
    let response = send(&app.router, Method::POST, "/api/receipts", &[], Some(booking_json())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"booking-confirmation-1042.txt\""
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("Booking Reference: #1042"));
    assert!(text.contains("1. Jane Tan (Adult)"));
    assert!(text.contains("Passport: E1234567"));
}

#[tokio::test]
async fn unreachable_backend_surfaces_error_and_stashes_nothing() {
    let app = build_test_app();
    let tab = Uuid::new_v4();

    let response = send(
        &app.router,
        Method::POST,
        &format!("/api/tabs/{}/bookings", tab),
        &[],
        Some(serde_json::json!({ "packageId": 7, "adults": 2 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_json(response).await["error"].is_string());

    let confirmation = send(&app.router, Method::GET, &confirmation_uri(tab), &[], None).await;
    assert_eq!(confirmation.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn huge_guest_counts_survive_the_read() {
    let app = build_test_app();
    let tab = Uuid::new_v4();
    let mut booking = booking_json();
    booking["adults"] = serde_json::json!(u32::MAX);
    booking["children"] = serde_json::json!(1);
    booking["passengerDetails"] = serde_json::json!([]);

    let stashed = send(&app.router, Method::PUT, &confirmation_uri(tab), &[], Some(booking.clone())).await;
    assert_eq!(stashed.status(), StatusCode::NO_CONTENT);

    let view = send(&app.router, Method::GET, &confirmation_uri(tab), &[], None).await;
    assert_eq!(view.status(), StatusCode::OK);
    assert_eq!(body_json(view).await["totalGuests"], 4_294_967_296u64);

    let receipt = send(&app.router, Method::POST, "/api/receipts", &[], Some(booking)).await;
    assert_eq!(receipt.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(receipt).await).unwrap();
    assert!(text.contains("Total Guests: 4294967296"));
}

#[tokio::test]
async fn receipt_for_invalid_booking_is_rejected() {
    let app = build_test_app();
    let mut booking = booking_json();
    booking["bookingId"] = serde_json::json!(0);

    let response = send(&app.router, Method::POST, "/api/receipts", &[], Some(booking)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
