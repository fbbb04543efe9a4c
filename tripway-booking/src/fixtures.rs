use tripway_core::booking::BookingConfirmation;

pub fn confirmation() -> BookingConfirmation {
    serde_json::from_value(serde_json::json!({
        "bookingId": 1042,
        "packageId": 7,
        "packageName": "Bali Island Escape",
        "customerName": "Jane Tan",
        "customerEmail": "jane@example.com",
        "customerPhone": "+65 9123 4567",
        "travelDate": "2025-03-15",
        "adults": 2,
        "children": 1,
        "infants": 1,
        "totalAmount": 284500,
        "paymentStatus": "paid",
        "paymentIntentId": "int_hkdm8s",
        "bookingDate": "2025-01-10T08:30:00.000Z",
        "passengerDetails": [
            { "type": "adult", "title": "Ms", "firstName": "Jane", "lastName": "Tan",
              "dateOfBirth": "1990-04-02", "passportNumber": "E1234567",
              "passportExpiry": "2030-04-01", "nationality": "Singaporean" },
            { "type": "adult", "title": "Mr", "firstName": "Wei", "lastName": "Tan",
              "passportNumber": "E7654321", "nationality": "Singaporean" },
            { "type": "child", "firstName": "Mei", "lastName": "Tan", "dateOfBirth": "2016-09-12" },
            { "type": "infant", "firstName": "Lin", "lastName": "Tan", "dateOfBirth": "2024-06-30" }
        ],
        "contactDetails": {
            "primaryContact": { "name": "Jane Tan", "email": "jane@example.com", "phone": "+65 9123 4567" },
            "emergencyContact": { "name": "Grace Lim", "phone": "+65 9876 5432", "relationship": "Sister" },
            "address": "1 Orchard Road",
            "city": "Singapore",
            "postalCode": "238800",
            "country": "Singapore"
        }
    }))
    .expect("fixture is a valid booking confirmation")
}
