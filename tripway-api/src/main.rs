use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tripway_api::{app, AppState};
use tripway_checkout::{HttpPaymentGateway, PaymentIntentProxy};
use tripway_core::storage::{KeyValueStore, MemoryStore};
use tripway_store::app_config::{Config, StorageBackend};
use tripway_store::{BackendClient, RedisStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripway_api=debug,tripway_checkout=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Tripway API on port {}", config.server.port);

    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Redis => {
            let url = config
                .storage
                .redis_url
                .as_deref()
                .context("storage.redis_url is required for the redis backend")?;
            Arc::new(
                RedisStore::new(url, config.storage.transient_ttl_seconds)
                    .await
                    .context("Failed to connect to Redis")?,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; sessions are lost on restart");
            Arc::new(MemoryStore::new(Some(Duration::from_secs(config.storage.transient_ttl_seconds))))
        }
    };

    let gateway = HttpPaymentGateway::new(&config.payment).context("Failed to build payment gateway")?;
    let payments = PaymentIntentProxy::new(
        Arc::new(gateway),
        config.payment.fallback_amount,
        &config.payment.fallback_currency,
    )
    .with_demo_mode(config.payment.demo_mode);

    let backend = BackendClient::new(&config.backend).context("Failed to build backend client")?;
    tracing::info!("Backend API at {}", backend.base_url());

    let app = app(AppState::new(store, payments, backend));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
