use std::sync::Arc;
use tripway_booking::ConfirmationHandoff;
use tripway_checkout::PaymentIntentProxy;
use tripway_core::session::SessionContext;
use tripway_core::storage::KeyValueStore;
use tripway_store::BackendClient;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub handoff: Arc<ConfirmationHandoff>,
    pub payments: Arc<PaymentIntentProxy>,
    pub backend: Arc<BackendClient>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, payments: PaymentIntentProxy, backend: BackendClient) -> Self {
        Self {
            handoff: Arc::new(ConfirmationHandoff::new(store.clone())),
            store,
            payments: Arc::new(payments),
            backend: Arc::new(backend),
        }
    }

    /// Auth context for one browser. Built per request; all state lives in the store.
    pub fn session(&self, client_id: Uuid) -> SessionContext {
        SessionContext::new(self.store.clone(), client_id)
    }
}
