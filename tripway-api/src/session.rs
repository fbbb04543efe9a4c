use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tripway_core::session::{Redirect, SessionContext, SessionUser};

use crate::{client::ClientId, error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<SessionUser>,
    /// Where the browser should navigate next, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl SessionView {
    pub fn of(ctx: &SessionContext) -> Self {
        Self {
            is_authenticated: ctx.is_authenticated(),
            is_loading: ctx.is_loading(),
            user: ctx.user().cloned(),
            redirect: None,
        }
    }

    fn redirecting(ctx: &SessionContext, Redirect(to): Redirect) -> Self {
        Self { redirect: Some(to), ..Self::of(ctx) }
    }
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    token: String,
    user: SessionUser,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(current_session))
        .route("/api/session/login", post(login))
        .route("/api/session/refresh", post(refresh_user))
        .route("/api/session/logout", post(logout))
        .route("/api/session/clear-cache", post(clear_cache))
}

/// GET /api/session
async fn current_session(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> Result<Json<SessionView>, AppError> {
    let mut ctx = state.session(client_id);
    ctx.initialize().await?;
    Ok(Json(SessionView::of(&ctx)))
}

/// POST /api/session/login
async fn login(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    Json(body): Json<LoginBody>,
) -> Result<Json<SessionView>, AppError> {
    let mut ctx = state.session(client_id);
    ctx.login(body.token, body.user).await?;
    Ok(Json(SessionView::of(&ctx)))
}

/// POST /api/session/refresh
async fn refresh_user(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> Result<Json<SessionView>, AppError> {
    let mut ctx = state.session(client_id);
    ctx.refresh_user().await?;
    Ok(Json(SessionView::of(&ctx)))
}

/// POST /api/session/logout
async fn logout(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> Result<Json<SessionView>, AppError> {
    let mut ctx = state.session(client_id);
    let redirect = ctx.logout().await?;
    Ok(Json(SessionView::redirecting(&ctx, redirect)))
}

/// POST /api/session/clear-cache
/// Wipes every durable key of the browser, not only the session.
async fn clear_cache(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
) -> Result<Json<SessionView>, AppError> {
    let mut ctx = state.session(client_id);
    let redirect = ctx.clear_cache().await?;
    Ok(Json(SessionView::redirecting(&ctx, redirect)))
}
