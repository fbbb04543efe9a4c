use serde::{Deserialize, Serialize};
use tripway_shared::Masked;
use crate::{CoreError, CoreResult};

// ============================================================================
// Booking Confirmation (one-shot handoff payload)
// ============================================================================

/// Result of a submitted booking, parked in the tab's transient storage until the
/// confirmation view takes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: u64,
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub package_id: String,
    pub package_name: String,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    #[serde(default)]
    pub customer_phone: Masked<String>,
    pub travel_date: String,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    /// Passed through as received; no minor-unit conversion.
    pub total_amount: f64,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    pub booking_date: String,
    #[serde(default)]
    pub passenger_details: Vec<PassengerDetail>,
    #[serde(default)]
    pub contact_details: ContactDetails,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PassengerType {
    Adult,
    Child,
    Infant,
}

impl PassengerType {
    pub fn label(&self) -> &'static str {
        match self {
            PassengerType::Adult => "Adult",
            PassengerType::Child => "Child",
            PassengerType::Infant => "Infant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDetail {
    #[serde(rename = "type")]
    pub passenger_type: PassengerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

impl PassengerDetail {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} {}", title, name.trim()),
            _ => name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub primary_contact: PrimaryContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Masked<String>,
    #[serde(default)]
    pub phone: Masked<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Masked<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl BookingConfirmation {
    /// Adults, children and infants together. Widened so no count combination overflows.
    pub fn total_guests(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children) + u64::from(self.infants)
    }

    pub fn passengers_of(&self, passenger_type: PassengerType) -> usize {
        self.passenger_details
            .iter()
            .filter(|p| p.passenger_type == passenger_type)
            .count()
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.booking_id == 0 {
            return Err(CoreError::ValidationError("bookingId must be assigned".to_string()));
        }
        if self.package_name.trim().is_empty() {
            return Err(CoreError::ValidationError("packageName is required".to_string()));
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(CoreError::ValidationError("totalAmount must be a non-negative number".to_string()));
        }

        // An empty list is allowed: some packages only collect the lead traveler's contact.
        if !self.passenger_details.is_empty() {
            let expected = [
                (PassengerType::Adult, self.adults),
                (PassengerType::Child, self.children),
                (PassengerType::Infant, self.infants),
            ];
            for (passenger_type, count) in expected {
                let listed = self.passengers_of(passenger_type);
                if listed != count as usize {
                    return Err(CoreError::ValidationError(format!(
                        "{} {} passenger(s) listed but {} booked",
                        listed,
                        passenger_type.label().to_lowercase(),
                        count
                    )));
                }
            }
        }

        Ok(())
    }
}
