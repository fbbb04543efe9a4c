use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

pub const BOOKING_CONFIRMATION_KEY: &str = "bookingConfirmation";
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const AUTH_USER_KEY: &str = "authUser";

/// Where a value lives. `Transient` is per browser tab and expires; `Durable` is per
/// browser and survives until removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    Transient(Uuid),
    Durable(Uuid),
}

impl StorageScope {
    pub fn prefix(&self) -> String {
        match self {
            StorageScope::Transient(tab_id) => format!("tab:{}:", tab_id),
            StorageScope::Durable(client_id) => format!("client:{}:", client_id),
        }
    }

    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, StorageScope::Transient(_))
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageScope::Transient(id) => write!(f, "tab {}", id),
            StorageScope::Durable(id) => write!(f, "client {}", id),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("Stored value could not be encoded: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, scope: StorageScope, key: &str) -> Result<(), StoreError>;

    /// Read and delete in one step. A second call without an intervening `set` returns `None`.
    async fn take(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove every key in the scope.
    async fn clear(&self, scope: StorageScope) -> Result<(), StoreError>;
}

// ============================================================================
// In-memory store
// ============================================================================

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self) -> bool {
        self.expires_at.map_or(true, |at| Instant::now() < at)
    }
}

/// Process-local store for development and tests. Transient entries expire after
/// `transient_ttl` when one is configured and are dropped on the next write.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    transient_ttl: Option<Duration>,
}

impl MemoryStore {
    pub fn new(transient_ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            transient_ttl,
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&scope.key(key))
            .filter(|e| e.is_live())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StoreError> {
        let expires_at = if scope.is_transient() {
            self.transient_ttl.map(|ttl| Instant::now() + ttl)
        } else {
            None
        };

        let mut entries = self.entries.write().await;
        // Nothing else evicts expired entries.
        entries.retain(|_, e| e.is_live());
        entries.insert(scope.key(key), Entry { value: value.to_string(), expires_at });
        Ok(())
    }

    async fn remove(&self, scope: StorageScope, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(&scope.key(key));
        Ok(())
    }

    async fn take(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(&scope.key(key))
            .filter(|e| e.is_live())
            .map(|e| e.value))
    }

    async fn clear(&self, scope: StorageScope) -> Result<(), StoreError> {
        let prefix = scope.prefix();
        let mut entries = self.entries.write().await;
        entries.retain(|k, _| !k.starts_with(&prefix));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_is_one_shot() {
        let store = MemoryStore::default();
        let tab = StorageScope::Transient(Uuid::new_v4());

        store.set(tab, BOOKING_CONFIRMATION_KEY, "{}").await.unwrap();
        assert_eq!(store.take(tab, BOOKING_CONFIRMATION_KEY).await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.take(tab, BOOKING_CONFIRMATION_KEY).await.unwrap(), None);
        assert_eq!(store.get(tab, BOOKING_CONFIRMATION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scopes_are_isolated() {
        let store = MemoryStore::default();
        let id = Uuid::new_v4();
        let tab = StorageScope::Transient(id);
        let client = StorageScope::Durable(id);

        store.set(client, AUTH_TOKEN_KEY, "abc").await.unwrap();
        assert_eq!(store.get(tab, AUTH_TOKEN_KEY).await.unwrap(), None);

        store.clear(tab).await.unwrap();
        assert_eq!(store.get(client, AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_clear_removes_whole_scope() {
        let store = MemoryStore::default();
        let client = StorageScope::Durable(Uuid::new_v4());
        let other = StorageScope::Durable(Uuid::new_v4());

        store.set(client, AUTH_TOKEN_KEY, "abc").await.unwrap();
        store.set(client, "recentlyViewed", "[1,2]").await.unwrap();
        store.set(other, AUTH_TOKEN_KEY, "xyz").await.unwrap();

        store.clear(client).await.unwrap();

        assert_eq!(store.get(client, AUTH_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(client, "recentlyViewed").await.unwrap(), None);
        assert_eq!(store.get(other, AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("xyz"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_entries_expire() {
        let store = MemoryStore::new(Some(Duration::from_secs(60)));
        let tab = StorageScope::Transient(Uuid::new_v4());
        let client = StorageScope::Durable(Uuid::new_v4());

        store.set(tab, BOOKING_CONFIRMATION_KEY, "{}").await.unwrap();
        store.set(client, AUTH_TOKEN_KEY, "abc").await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.take(tab, BOOKING_CONFIRMATION_KEY).await.unwrap(), None);
        assert_eq!(store.get(client, AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_tabs_are_evicted() {
        let store = MemoryStore::new(Some(Duration::from_secs(60)));
        for _ in 0..1000 {
            let tab = StorageScope::Transient(Uuid::new_v4());
            store.set(tab, BOOKING_CONFIRMATION_KEY, "{}").await.unwrap();
        }
        let client = StorageScope::Durable(Uuid::new_v4());
        store.set(client, AUTH_TOKEN_KEY, "abc").await.unwrap();
        assert_eq!(store.entries.read().await.len(), 1001);

        tokio::time::advance(Duration::from_secs(3600)).await;

        let fresh = StorageScope::Transient(Uuid::new_v4());
        store.set(fresh, BOOKING_CONFIRMATION_KEY, "{}").await.unwrap();
        assert_eq!(store.take(fresh, BOOKING_CONFIRMATION_KEY).await.unwrap().as_deref(), Some("{}"));

        // Only the durable token is left.
        assert_eq!(store.entries.read().await.len(), 1);
        assert_eq!(store.get(client, AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));
    }
}
