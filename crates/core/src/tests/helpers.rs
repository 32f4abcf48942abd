// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use tasklink_domain::{
    Booking, BookingId, BookingStatus, ConfirmationRef, FeePolicy, GeoPoint, Money, ServiceId,
    SessionRef, UserId,
};

/// Price of the test service: $100.00 in minor units.
pub fn test_price() -> Money {
    Money::from_minor(10_000)
}

pub fn test_policy() -> FeePolicy {
    FeePolicy::default()
}

/// A freshly created booking: pending, unpaid, checkout session issued.
pub fn pending_booking() -> Booking {
    Booking {
        id: BookingId::new(1),
        customer: UserId::new(10),
        provider: UserId::new(20),
        service: ServiceId::new(30),
        scheduled_for: String::from("2026-02-14T10:00:00Z"),
        location: GeoPoint {
            latitude: 40.7128,
            longitude: -74.0060,
        },
        address: String::from("1 Main St"),
        note: String::new(),
        status: BookingStatus::Pending,
        is_paid: false,
        reject_reason: None,
        session_ref: Some(SessionRef::new("cs_test_1")),
        confirmation_ref: None,
        is_deleted: false,
        version: 0,
    }
}

/// A pending booking whose payment has been confirmed.
pub fn paid_booking() -> Booking {
    let mut booking: Booking = pending_booking();
    booking.is_paid = true;
    booking.confirmation_ref = Some(ConfirmationRef::new("pi_test_1"));
    booking.version = 1;
    booking
}

/// A paid booking the provider has accepted.
pub fn accepted_booking() -> Booking {
    let mut booking: Booking = paid_booking();
    booking.status = BookingStatus::Accepted;
    booking.version = 2;
    booking
}
