use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub payment: PaymentConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub redis_url: Option<String>,
    /// Lifetime of per-tab entries such as the parked booking confirmation.
    #[serde(default = "default_transient_ttl")]
    pub transient_ttl_seconds: u64,
}

fn default_transient_ttl() -> u64 { 1800 }

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    pub base_url: String,
    pub client_id: String,
    pub api_key: String,
    /// Skip the processor entirely and always answer with a synthetic intent.
    #[serde(default)]
    pub demo_mode: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    pub fallback_amount: i64,
    pub fallback_currency: String,
    pub product: ProductConfig,
}

/// The single line item attached to every payment intent.
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 { 15 }

fn default_backend_url() -> String { "http://localhost:5000".to_string() }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `TRIPWAY__BACKEND__BASE_URL=https://api.example.com`
            .add_source(config::Environment::with_prefix("TRIPWAY").separator("__"));

        Self::from_builder(builder)
    }

    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}
