use std::sync::Arc;
use tracing::{info, warn};
use tripway_core::booking::BookingConfirmation;
use tripway_core::storage::{KeyValueStore, StorageScope, StoreError, BOOKING_CONFIRMATION_KEY};
use tripway_core::CoreError;
use tripway_shared::models::events::{BookingConfirmationStashed, BookingConfirmationTaken};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error(transparent)]
    Invalid(#[from] CoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Passes a booking result from the submitting page to the confirmation view of the
/// same tab. The confirmation can be read at most once.
pub struct ConfirmationHandoff {
    store: Arc<dyn KeyValueStore>,
}

impl ConfirmationHandoff {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Park a confirmation for `tab_id`, replacing any earlier one.
    pub async fn stash(&self, tab_id: Uuid, booking: &BookingConfirmation) -> Result<(), HandoffError> {
        booking.validate()?;

        let json = serde_json::to_string(booking)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store
            .set(StorageScope::Transient(tab_id), BOOKING_CONFIRMATION_KEY, &json)
            .await?;

        info!(event = ?BookingConfirmationStashed::now(tab_id, booking.booking_id), "Booking confirmation stashed");
        Ok(())
    }

    /// Remove and return the parked confirmation. `None` when nothing is parked or
    /// the stored value is not a valid confirmation; either way the key is gone.
    pub async fn take(&self, tab_id: Uuid) -> Result<Option<BookingConfirmation>, HandoffError> {
        let raw = self
            .store
            .take(StorageScope::Transient(tab_id), BOOKING_CONFIRMATION_KEY)
            .await?;

        let booking = match raw {
            None => None,
            Some(json) => match serde_json::from_str::<BookingConfirmation>(&json) {
                Ok(booking) => Some(booking),
                Err(e) => {
                    warn!("Discarding malformed booking confirmation for tab {}: {}", tab_id, e);
                    None
                }
            },
        };

        info!(
            event = ?BookingConfirmationTaken::now(tab_id, booking.as_ref().map(|b| b.booking_id)),
            "Booking confirmation taken"
        );
        Ok(booking)
    }
}
