use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tripway_shared::Masked;

/// Id prefix of intents synthesised when the processor could not be reached.
pub const DEMO_INTENT_PREFIX: &str = "demo_intent_";
pub const DEMO_SECRET_PREFIX: &str = "demo_secret_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    RequiresPaymentMethod,
    RequiresCustomerAction,
    RequiresCapture,
    Pending,
    Succeeded,
    Cancelled,
    Failed,
    /// Anything the processor reports that we do not model.
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentStatus::RequiresCustomerAction => "requires_customer_action",
            PaymentStatus::RequiresCapture => "requires_capture",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "requires_payment_method" => PaymentStatus::RequiresPaymentMethod,
            "requires_customer_action" => PaymentStatus::RequiresCustomerAction,
            "requires_capture" => PaymentStatus::RequiresCapture,
            "pending" => PaymentStatus::Pending,
            "succeeded" => PaymentStatus::Succeeded,
            "cancelled" | "canceled" => PaymentStatus::Cancelled,
            "failed" => PaymentStatus::Failed,
            _ => PaymentStatus::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCustomer {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Masked<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Masked<String>>,
}

/// Body of `POST /api/create-payment-intent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Kept as the caller's JSON number so it is echoed back untouched.
    pub amount: serde_json::Number,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<PaymentCustomer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    pub id: String,
    pub client_secret: String,
    pub amount: serde_json::Number,
    pub currency: String,
    pub status: PaymentStatus,
    /// True when the intent was synthesised locally instead of created by the processor.
    #[serde(default)]
    pub is_synthetic: bool,
}

impl PaymentIntentResponse {
    pub fn synthetic(amount: serde_json::Number, currency: String, now_millis: i64) -> Self {
        Self {
            id: format!("{}{}", DEMO_INTENT_PREFIX, now_millis),
            client_secret: format!("{}{}", DEMO_SECRET_PREFIX, now_millis),
            amount,
            currency,
            status: PaymentStatus::RequiresPaymentMethod,
            is_synthetic: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment processor request failed: {0}")]
    Request(String),
    #[error("Payment processor returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Malformed payment processor response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authenticate with the processor and create a payment intent.
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&PaymentStatus::RequiresPaymentMethod).unwrap();
        assert_eq!(json, "\"requires_payment_method\"");

        let upstream: PaymentStatus = serde_json::from_str("\"REQUIRES_CAPTURE\"").unwrap();
        assert_eq!(upstream, PaymentStatus::RequiresCapture);

        let unknown: PaymentStatus = serde_json::from_str("\"EXPIRED\"").unwrap();
        assert_eq!(unknown, PaymentStatus::Other("EXPIRED".to_string()));
    }

    #[test]
    fn test_amount_is_echoed_verbatim() {
        let req: PaymentIntentRequest = serde_json::from_value(serde_json::json!({
            "amount": 284500,
            "currency": "SGD",
            "customer": { "first_name": "Jane", "last_name": "Tan", "email": "jane@example.com" }
        }))
        .unwrap();

        let intent = PaymentIntentResponse::synthetic(req.amount, req.currency, 1_700_000_000_000);
        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(value["amount"], serde_json::json!(284500));
        assert_eq!(value["id"], "demo_intent_1700000000000");
        assert_eq!(value["status"], "requires_payment_method");
        assert_eq!(value["is_synthetic"], true);
    }
}
