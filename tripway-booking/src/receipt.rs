use tripway_core::booking::{BookingConfirmation, PassengerDetail};

use crate::format::{format_currency, format_long_date};

const RULE: &str = "==================================================";
const SECTION_RULE: &str = "--------------------------------------------------";

pub fn receipt_file_name(booking: &BookingConfirmation) -> String {
    format!("booking-confirmation-{}.txt", booking.booking_id)
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push(SECTION_RULE.to_string());
}

fn passenger_lines(lines: &mut Vec<String>, index: usize, passenger: &PassengerDetail) {
    lines.push(format!(
        "{}. {} ({})",
        index + 1,
        passenger.full_name(),
        passenger.passenger_type.label()
    ));
    if let Some(dob) = &passenger.date_of_birth {
        lines.push(format!("   Date of Birth: {}", dob));
    }
    if let Some(passport) = &passenger.passport_number {
        match &passenger.passport_expiry {
            Some(expiry) => lines.push(format!("   Passport: {} (expires {})", passport.expose(), expiry)),
            None => lines.push(format!("   Passport: {}", passport.expose())),
        }
    }
    if let Some(nationality) = &passenger.nationality {
        lines.push(format!("   Nationality: {}", nationality));
    }
}

/// Plain-text receipt offered as a download on the confirmation page.
pub fn render_receipt(booking: &BookingConfirmation) -> String {
    let mut lines = vec![
        "BOOKING CONFIRMATION".to_string(),
        RULE.to_string(),
        String::new(),
        format!("Booking Reference: #{}", booking.booking_id),
        format!("Booking Date: {}", format_long_date(&booking.booking_date)),
        format!("Package: {} (ID: {})", booking.package_name, booking.package_id),
        format!("Travel Date: {}", format_long_date(&booking.travel_date)),
    ];

    section(&mut lines, "CUSTOMER");
    lines.push(format!("Name: {}", booking.customer_name));
    lines.push(format!("Email: {}", booking.customer_email.expose()));
    if !booking.customer_phone.expose().is_empty() {
        lines.push(format!("Phone: {}", booking.customer_phone.expose()));
    }

    section(&mut lines, "GUESTS");
    lines.push(format!("Adults: {}", booking.adults));
    lines.push(format!("Children: {}", booking.children));
    lines.push(format!("Infants: {}", booking.infants));
    lines.push(format!("Total Guests: {}", booking.total_guests()));

    section(&mut lines, "PAYMENT");
    lines.push(format!("Total Amount: {}", format_currency(booking.total_amount)));
    lines.push(format!("Payment Status: {}", booking.payment_status));
    if let Some(intent_id) = &booking.payment_intent_id {
        lines.push(format!("Payment Reference: {}", intent_id));
    }

    if !booking.passenger_details.is_empty() {
        section(&mut lines, "PASSENGERS");
        for (i, passenger) in booking.passenger_details.iter().enumerate() {
            passenger_lines(&mut lines, i, passenger);
        }
    }

    let contact = &booking.contact_details;
    section(&mut lines, "CONTACT DETAILS");
    lines.push(format!("Primary Contact: {}", contact.primary_contact.name));
    lines.push(format!("Email: {}", contact.primary_contact.email.expose()));
    lines.push(format!("Phone: {}", contact.primary_contact.phone.expose()));
    if let Some(emergency) = &contact.emergency_contact {
        let relationship = emergency
            .relationship
            .as_deref()
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        lines.push(format!(
            "Emergency Contact: {}{} - {}",
            emergency.name,
            relationship,
            emergency.phone.expose()
        ));
    }

    let address: Vec<&str> = [&contact.address, &contact.city, &contact.postal_code, &contact.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.trim().is_empty())
        .collect();
    if !address.is_empty() {
        lines.push(format!("Address: {}", address.join(", ")));
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push("Thank you for booking with us!".to_string());
    lines.push("Please keep this receipt for your records.".to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
