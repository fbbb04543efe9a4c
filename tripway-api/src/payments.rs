use axum::{
    body::Bytes,
    extract::State,
    routing::post,
    Json, Router,
};
use tripway_core::payment::PaymentIntentResponse;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/create-payment-intent", post(create_payment_intent))
}

/// POST /api/create-payment-intent
/// Always 200. The body is taken raw so a malformed request still gets a demo intent.
async fn create_payment_intent(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<PaymentIntentResponse> {
    Json(state.payments.create(&body).await)
}
