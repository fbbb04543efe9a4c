use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use serde::Serialize;
use tripway_store::backend::LoginRequest;

use crate::{client::ClientId, error::AppError, session::SessionView, state::AppState};

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    #[serde(flatten)]
    session: SessionView,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login_with_credentials))
}

/// POST /api/auth/login
/// Check credentials against the backend and open a session for this browser.
async fn login_with_credentials(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let login = state.backend.login(&credentials).await?;

    let mut ctx = state.session(client_id);
    ctx.login(login.token.clone(), login.user).await?;

    Ok(Json(AuthResponse {
        token: login.token,
        session: SessionView::of(&ctx),
    }))
}
