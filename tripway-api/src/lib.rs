use axum::{
    routing::get,
    Router,
    http::Method,
    Json,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod client;
pub mod confirmation;
pub mod error;
pub mod payments;
pub mod session;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static(client::CLIENT_ID_HEADER),
        ]);

    Router::new()
        .route("/health", get(health))
        .merge(payments::routes())
        .merge(confirmation::routes())
        .merge(session::routes())
        .merge(auth::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
