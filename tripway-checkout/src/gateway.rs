//! Payment processor adapter: log in with the merchant credentials, then create a
//! payment intent carrying the agency's single product line item.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use tripway_core::payment::{
    GatewayError, PaymentCustomer, PaymentGateway, PaymentIntentRequest, PaymentIntentResponse,
    PaymentStatus,
};
use tripway_shared::Masked;
use tripway_store::app_config::{PaymentConfig, ProductConfig};

use crate::now_millis;

pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    api_key: Masked<String>,
    product: ProductConfig,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct LineItem<'a> {
    code: &'a str,
    name: &'a str,
    desc: &'a str,
    unit_price: &'a serde_json::Number,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct Order<'a> {
    products: Vec<LineItem<'a>>,
}

#[derive(Debug, Serialize)]
struct CreateIntentBody<'a> {
    request_id: String,
    amount: &'a serde_json::Number,
    currency: &'a str,
    merchant_order_id: String,
    order: Order<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<&'a PaymentCustomer>,
}

/// Subset of the processor's intent object we hand back to callers.
#[derive(Debug, Deserialize)]
struct IntentObject {
    id: String,
    client_secret: String,
    amount: serde_json::Number,
    currency: String,
    status: PaymentStatus,
}

fn request_err(e: reqwest::Error) -> GatewayError {
    GatewayError::Request(e.to_string())
}

impl HttpPaymentGateway {
    pub fn new(config: &PaymentConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(request_err)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            api_key: Masked(config.api_key.clone()),
            product: config.product.clone(),
        })
    }

    async fn authenticate(&self) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(format!("{}/api/v1/authentication/login", self.base_url))
            .header("x-client-id", &self.client_id)
            .header("x-api-key", self.api_key.expose())
            .send()
            .await
            .map_err(request_err)?;

        let login: LoginResponse = Self::parse_response(response).await?;
        Ok(login.token)
    }

    async fn create(&self, token: &str, request: &PaymentIntentRequest) -> Result<IntentObject, GatewayError> {
        let millis = now_millis();
        let body = CreateIntentBody {
            request_id: format!("req_{}", millis),
            amount: &request.amount,
            currency: &request.currency,
            merchant_order_id: request
                .merchant_order_id
                .clone()
                .unwrap_or_else(|| format!("order_{}", millis)),
            order: Order {
                products: vec![LineItem {
                    code: &self.product.code,
                    name: &self.product.name,
                    desc: &self.product.description,
                    unit_price: &request.amount,
                    quantity: 1,
                }],
            },
            customer: request.customer.as_ref(),
        };

        let response = self
            .client
            .post(format!("{}/api/v1/pa/payment_intents/create", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(request_err)?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(request_err)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, GatewayError> {
        let token = self.authenticate().await?;
        debug!("Authenticated with payment processor");

        let intent = self.create(&token, request).await?;

        Ok(PaymentIntentResponse {
            id: intent.id,
            client_secret: intent.client_secret,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
            is_synthetic: false,
        })
    }
}
