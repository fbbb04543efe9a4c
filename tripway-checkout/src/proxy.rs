use std::sync::Arc;
use tracing::{error, info};
use tripway_core::payment::{GatewayError, PaymentGateway, PaymentIntentRequest, PaymentIntentResponse};
use tripway_shared::models::events::PaymentIntentCreated;

use crate::now_millis;

#[derive(Debug, thiserror::Error)]
enum ProxyFailure {
    #[error("Invalid payment intent request: {0}")]
    InvalidBody(String),
    #[error("Demo mode is enabled")]
    DemoMode,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Front of `POST /api/create-payment-intent`. Never fails: when the processor
/// cannot produce an intent the caller gets a synthetic one flagged `is_synthetic`.
pub struct PaymentIntentProxy {
    gateway: Arc<dyn PaymentGateway>,
    fallback_amount: i64,
    fallback_currency: String,
    demo_mode: bool,
}

impl PaymentIntentProxy {
    pub fn new(gateway: Arc<dyn PaymentGateway>, fallback_amount: i64, fallback_currency: &str) -> Self {
        Self {
            gateway,
            fallback_amount,
            fallback_currency: fallback_currency.to_string(),
            demo_mode: false,
        }
    }

    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    /// Create an intent from the raw request body.
    pub async fn create(&self, raw_body: &[u8]) -> PaymentIntentResponse {
        match self.try_create(raw_body).await {
            Ok(intent) => {
                info!(event = ?PaymentIntentCreated::now(&intent.id, false), "Payment intent created");
                intent
            }
            Err(ProxyFailure::DemoMode) => {
                let intent = self.synthesize(raw_body);
                info!(event = ?PaymentIntentCreated::now(&intent.id, true), "Demo payment intent issued");
                intent
            }
            Err(e) => {
                error!("Payment intent creation failed, issuing demo intent: {}", e);
                self.synthesize(raw_body)
            }
        }
    }

    async fn try_create(&self, raw_body: &[u8]) -> Result<PaymentIntentResponse, ProxyFailure> {
        let request: PaymentIntentRequest = serde_json::from_slice(raw_body)
            .map_err(|e| ProxyFailure::InvalidBody(e.to_string()))?;

        if self.demo_mode {
            return Err(ProxyFailure::DemoMode);
        }

        Ok(self.gateway.create_intent(&request).await?)
    }

    /// Build the stand-in intent from whatever can be salvaged from the body.
    fn synthesize(&self, raw_body: &[u8]) -> PaymentIntentResponse {
        let body: serde_json::Value =
            serde_json::from_slice(raw_body).unwrap_or_else(|_| serde_json::json!({}));

        let amount = match body.get("amount") {
            Some(serde_json::Value::Number(n)) => n.clone(),
            _ => serde_json::Number::from(self.fallback_amount),
        };
        let currency = match body.get("currency") {
            Some(serde_json::Value::String(c)) if !c.is_empty() => c.clone(),
            _ => self.fallback_currency.clone(),
        };

        PaymentIntentResponse::synthetic(amount, currency, now_millis())
    }
}
