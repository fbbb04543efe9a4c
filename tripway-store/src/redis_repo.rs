use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info};
use tripway_core::storage::{KeyValueStore, StorageScope, StoreError};

/// `KeyValueStore` on Redis. Transient scopes get a TTL so abandoned tabs do not
/// leak entries; durable scopes never expire.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    transient_ttl_seconds: u64,
}

fn backend_err(e: redis::RedisError) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl RedisStore {
    /// Opens the shared multiplexed connection up front so a bad URL or an
    /// unreachable server fails at startup.
    pub async fn new(connection_string: &str, transient_ttl_seconds: u64) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to Redis (transient ttl {}s)", transient_ttl_seconds);
        Ok(Self { conn, transient_ttl_seconds })
    }

    fn connection(&self) -> MultiplexedConnection {
        self.conn.clone()
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection();
        conn.get(scope.key(key)).await.map_err(backend_err)
    }

    async fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection();
        let full_key = scope.key(key);
        if scope.is_transient() {
            conn.set_ex::<_, _, ()>(full_key, value, self.transient_ttl_seconds)
                .await
                .map_err(backend_err)
        } else {
            conn.set::<_, _, ()>(full_key, value).await.map_err(backend_err)
        }
    }

    async fn remove(&self, scope: StorageScope, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection();
        conn.del::<_, ()>(scope.key(key)).await.map_err(backend_err)
    }

    async fn take(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection();
        // GETDEL: read and delete atomically, so two concurrent readers cannot both win.
        let value: Option<String> = redis::cmd("GETDEL")
            .arg(scope.key(key))
            .query_async(&mut conn)
            .await
            .map_err(backend_err)?;
        Ok(value)
    }

    async fn clear(&self, scope: StorageScope) -> Result<(), StoreError> {
        let mut conn = self.connection();
        let pattern = format!("{}*", scope.prefix());
        let mut cursor: u64 = 0;
        let mut removed = 0usize;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(backend_err)?;

            if !keys.is_empty() {
                removed += keys.len();
                conn.del::<_, ()>(keys).await.map_err(backend_err)?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Cleared {} key(s) for {}", removed, scope);
        Ok(())
    }
}
