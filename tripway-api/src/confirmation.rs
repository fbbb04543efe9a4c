use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{post, put},
    Json, Router,
};
use tracing::info;
use tripway_booking::receipt::receipt_file_name;
use tripway_booking::{render_receipt, ConfirmationView};
use tripway_core::booking::BookingConfirmation;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub const HOME_ROUTE: &str = "/";
pub const CONFIRMATION_ROUTE: &str = "/booking-confirmation";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tabs/{tab_id}/booking-confirmation",
            put(stash_confirmation).get(take_confirmation),
        )
        .route("/api/tabs/{tab_id}/bookings", post(submit_booking))
        .route("/api/receipts", post(download_receipt))
}

/// PUT /api/tabs/{tab_id}/booking-confirmation
async fn stash_confirmation(
    State(state): State<AppState>,
    Path(tab_id): Path<Uuid>,
    Json(booking): Json<BookingConfirmation>,
) -> Result<StatusCode, AppError> {
    state.handoff.stash(tab_id, &booking).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tabs/{tab_id}/bookings
/// Forward the booking form to the backend, park the result for this tab and send
/// the browser to the confirmation page.
async fn submit_booking(
    State(state): State<AppState>,
    Path(tab_id): Path<Uuid>,
    Json(form): Json<serde_json::Value>,
) -> Result<Redirect, AppError> {
    let booking = state.backend.submit_booking(&form).await?;
    info!("Backend accepted booking {}", booking.booking_id);

    state.handoff.stash(tab_id, &booking).await?;
    Ok(Redirect::to(CONFIRMATION_ROUTE))
}

/// GET /api/tabs/{tab_id}/booking-confirmation
/// One-shot: the confirmation is deleted as it is read. Nothing parked means the
/// page was reached directly or reloaded, so the browser is sent home.
async fn take_confirmation(
    State(state): State<AppState>,
    Path(tab_id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.handoff.take(tab_id).await? {
        Some(booking) => Ok(Json(ConfirmationView::from(booking)).into_response()),
        None => Ok(Redirect::to(HOME_ROUTE).into_response()),
    }
}

/// POST /api/receipts
async fn download_receipt(Json(booking): Json<BookingConfirmation>) -> Result<impl IntoResponse, AppError> {
    booking
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let disposition = format!("attachment; filename=\"{}\"", receipt_file_name(&booking));
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_receipt(&booking),
    ))
}
