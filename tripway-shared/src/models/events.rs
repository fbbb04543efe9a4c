use uuid::Uuid;

/// Emitted when a booking result is parked in a tab's transient storage.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmationStashed {
    pub tab_id: Uuid,
    pub booking_id: u64,
    pub timestamp: i64,
}

/// Emitted when the confirmation view consumes the parked booking.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmationTaken {
    pub tab_id: Uuid,
    pub booking_id: Option<u64>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PaymentIntentCreated {
    pub intent_id: String,
    pub synthetic: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct SessionChanged {
    pub client_id: Uuid,
    pub authenticated: bool,
    pub reason: String,
    pub timestamp: i64,
}

impl BookingConfirmationStashed {
    pub fn now(tab_id: Uuid, booking_id: u64) -> Self {
        Self { tab_id, booking_id, timestamp: chrono::Utc::now().timestamp() }
    }
}

impl BookingConfirmationTaken {
    pub fn now(tab_id: Uuid, booking_id: Option<u64>) -> Self {
        Self { tab_id, booking_id, timestamp: chrono::Utc::now().timestamp() }
    }
}

impl PaymentIntentCreated {
    pub fn now(intent_id: &str, synthetic: bool) -> Self {
        Self {
            intent_id: intent_id.to_string(),
            synthetic,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl SessionChanged {
    pub fn now(client_id: Uuid, authenticated: bool, reason: &str) -> Self {
        Self {
            client_id,
            authenticated,
            reason: reason.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
