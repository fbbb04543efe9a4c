use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use tripway_shared::{models::events::SessionChanged, Masked};
use uuid::Uuid;

use crate::storage::{KeyValueStore, StorageScope, StoreError, AUTH_TOKEN_KEY, AUTH_USER_KEY};

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    pub name: String,
    pub email: Masked<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Masked<String>,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Storage has not been read yet.
    Uninitialized,
    Authenticated(Session),
    Anonymous,
}

/// Navigation the caller must perform after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect(pub &'static str);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session token must not be empty")]
    EmptyToken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Auth state of one browser, backed by its durable storage scope.
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    client_id: Uuid,
    state: SessionState,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>, client_id: Uuid) -> Self {
        Self {
            store,
            client_id,
            state: SessionState::Uninitialized,
        }
    }

    fn scope(&self) -> StorageScope {
        StorageScope::Durable(self.client_id)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Uninitialized
    }

    /// Read durable storage once. Later calls are no-ops.
    pub async fn initialize(&mut self) -> Result<&SessionState, SessionError> {
        if self.is_loading() {
            self.state = self.load().await?;
        }
        Ok(&self.state)
    }

    pub async fn login(&mut self, token: String, user: SessionUser) -> Result<(), SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let user_json = serde_json::to_string(&user)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let scope = self.scope();
        self.store.set(scope, AUTH_TOKEN_KEY, &token).await?;
        self.store.set(scope, AUTH_USER_KEY, &user_json).await?;

        self.state = SessionState::Authenticated(Session { token: Masked(token), user });
        info!(event = ?SessionChanged::now(self.client_id, true, "login"), "Session established");
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<Redirect, SessionError> {
        self.purge().await?;
        self.state = SessionState::Anonymous;
        info!(event = ?SessionChanged::now(self.client_id, false, "logout"), "Session ended");
        Ok(Redirect(LOGIN_ROUTE))
    }

    /// Re-read the stored user record, e.g. after a profile update elsewhere.
    pub async fn refresh_user(&mut self) -> Result<&SessionState, SessionError> {
        self.state = self.load().await?;
        Ok(&self.state)
    }

    /// Wipe everything this client has in durable storage, not only the auth keys.
    pub async fn clear_cache(&mut self) -> Result<Redirect, SessionError> {
        self.store.clear(self.scope()).await?;
        self.state = SessionState::Anonymous;
        warn!(event = ?SessionChanged::now(self.client_id, false, "clear_cache"), "Durable storage cleared");
        Ok(Redirect(LOGIN_ROUTE))
    }

    async fn load(&self) -> Result<SessionState, SessionError> {
        let scope = self.scope();
        let token = self.store.get(scope, AUTH_TOKEN_KEY).await?;
        let user = self.store.get(scope, AUTH_USER_KEY).await?;

        match (token, user) {
            (None, None) => Ok(SessionState::Anonymous),
            (Some(token), Some(user_json)) if !token.is_empty() => {
                match serde_json::from_str::<SessionUser>(&user_json) {
                    Ok(user) => Ok(SessionState::Authenticated(Session { token: Masked(token), user })),
                    Err(e) => {
                        warn!("Discarding corrupt session for client {}: {}", self.client_id, e);
                        self.purge().await?;
                        Ok(SessionState::Anonymous)
                    }
                }
            }
            _ => {
                warn!("Discarding partial session for client {}", self.client_id);
                self.purge().await?;
                Ok(SessionState::Anonymous)
            }
        }
    }

    async fn purge(&self) -> Result<(), StoreError> {
        let scope = self.scope();
        self.store.remove(scope, AUTH_TOKEN_KEY).await?;
        self.store.remove(scope, AUTH_USER_KEY).await
    }
}
