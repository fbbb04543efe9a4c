#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tripway_api::{app, AppState};
use tripway_checkout::PaymentIntentProxy;
use tripway_core::payment::{GatewayError, PaymentGateway, PaymentIntentRequest, PaymentIntentResponse};
use tripway_core::storage::MemoryStore;
use tripway_store::app_config::BackendConfig;
use tripway_store::BackendClient;

/// A processor whose merchant login always fails.
pub struct DownGateway;

#[async_trait]
impl PaymentGateway for DownGateway {
    async fn create_intent(
        &self,
        _request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, GatewayError> {
        Err(GatewayError::Upstream { status: 401, body: "invalid credentials".to_string() })
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

/// Router over an in-memory store, a failing payment processor and a backend
/// nobody listens on.
pub fn build_test_app() -> TestApp {
    build_test_app_with_backend("http://127.0.0.1:9")
}

pub fn build_test_app_with_backend(backend_url: &str) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let payments = PaymentIntentProxy::new(Arc::new(DownGateway), 1000, "SGD");
    let backend = BackendClient::new(&BackendConfig {
        base_url: backend_url.to_string(),
        timeout_seconds: 2,
    })
    .unwrap();

    TestApp {
        router: app(AppState::new(store.clone(), payments, backend)),
        store,
    }
}

async fn backend_create_booking(Json(form): Json<serde_json::Value>) -> axum::response::Response {
    if form["packageId"] != 7 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "message": "Package sold out" })),
        )
            .into_response();
    }

    let mut booking = booking_json();
    booking["bookingId"] = serde_json::json!(2001);
    Json(serde_json::json!({ "success": true, "booking": booking })).into_response()
}

async fn backend_login(Json(credentials): Json<serde_json::Value>) -> axum::response::Response {
    if credentials["email"] == "jane@example.com" && credentials["password"] == "hunter2" {
        Json(serde_json::json!({
            "token": "tok-live",
            "user": { "id": 17, "name": "Jane Tan", "email": "jane@example.com" }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

/// Serve a fake booking backend on an ephemeral port and return its base URL.
/// Package 7 books as #2001; anything else is sold out. Only jane@example.com
/// with password hunter2 can log in.
pub async fn spawn_backend() -> String {
    let backend = Router::new()
        .route("/api/bookings", post(backend_create_booking))
        .route("/api/auth/login", post(backend_login));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });

    format!("http://{}", addr)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn booking_json() -> serde_json::Value {
    serde_json::json!({
        "bookingId": 1042,
        "packageId": 7,
        "packageName": "Bali Island Escape",
        "customerName": "Jane Tan",
        "customerEmail": "jane@example.com",
        "customerPhone": "+65 9123 4567",
        "travelDate": "2025-03-15",
        "adults": 2,
        "children": 1,
        "infants": 0,
        "totalAmount": 284500,
        "paymentStatus": "paid",
        "paymentIntentId": "int_hkdm8s",
        "bookingDate": "2025-01-10",
        "passengerDetails": [
            { "type": "adult", "firstName": "Jane", "lastName": "Tan", "passportNumber": "E1234567" },
            { "type": "adult", "firstName": "Wei", "lastName": "Tan" },
            { "type": "child", "firstName": "Mei", "lastName": "Tan" }
        ],
        "contactDetails": {
            "primaryContact": { "name": "Jane Tan", "email": "jane@example.com", "phone": "+65 9123 4567" },
            "city": "Singapore"
        }
    })
}
