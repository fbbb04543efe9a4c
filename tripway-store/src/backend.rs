//! Client for the agency's REST backend (bookings, auth).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tripway_core::booking::BookingConfirmation;
use tripway_core::session::SessionUser;
use tripway_shared::Masked;

use crate::app_config::BackendConfig;

#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Network, DNS, TLS or timeout failure.
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/bookings`. The backend answers with the confirmation either bare
    /// or wrapped as `{ "booking": ... }`.
    pub async fn submit_booking(
        &self,
        booking: &serde_json::Value,
    ) -> Result<BookingConfirmation, BackendError> {
        let response = self
            .client
            .post(format!("{}/api/bookings", self.base_url))
            .json(booking)
            .send()
            .await?;

        let body: serde_json::Value = Self::parse_response(response).await?;
        decode_booking(body)
    }

    /// `POST /api/auth/login`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, BackendError> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(credentials)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason().unwrap_or("Request failed")),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

fn decode_booking(body: serde_json::Value) -> Result<BookingConfirmation, BackendError> {
    let payload = match body {
        serde_json::Value::Object(mut map) if map.contains_key("booking") => {
            map.remove("booking").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(payload).map_err(|e| BackendError::Malformed(e.to_string()))
}

/// Pull a human readable message out of an error body (`{"message": ...}` or
/// `{"error": ...}`), falling back to the status reason.
fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string())
}
