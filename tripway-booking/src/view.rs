use serde::Serialize;
use tripway_core::booking::BookingConfirmation;

use crate::format::{format_currency, format_long_date};
use crate::receipt::{receipt_file_name, render_receipt};

/// What the confirmation page renders: the taken booking plus its display fields
/// and the downloadable receipt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    pub booking: BookingConfirmation,
    pub total_guests: u64,
    pub formatted_total: String,
    pub formatted_travel_date: String,
    pub formatted_booking_date: String,
    pub receipt_file_name: String,
    pub receipt: String,
}

impl From<BookingConfirmation> for ConfirmationView {
    fn from(booking: BookingConfirmation) -> Self {
        Self {
            total_guests: booking.total_guests(),
            formatted_total: format_currency(booking.total_amount),
            formatted_travel_date: format_long_date(&booking.travel_date),
            formatted_booking_date: format_long_date(&booking.booking_date),
            receipt_file_name: receipt_file_name(&booking),
            receipt: render_receipt(&booking),
            booking,
        }
    }
}
