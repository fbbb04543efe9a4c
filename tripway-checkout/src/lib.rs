pub mod gateway;
pub mod proxy;

pub use gateway::HttpPaymentGateway;
pub use proxy::PaymentIntentProxy;

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
