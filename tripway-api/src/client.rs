use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Browser identity for durable (per-client) storage, sent as `x-client-id`.
#[derive(Debug, Clone, Copy)]
pub struct ClientId(pub Uuid);

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::ValidationError(format!("Missing {} header", CLIENT_ID_HEADER)))?;

        Uuid::parse_str(raw.trim())
            .map(ClientId)
            .map_err(|_| AppError::ValidationError(format!("Invalid {} header", CLIENT_ID_HEADER)))
    }
}
