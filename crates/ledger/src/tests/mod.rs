// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod settlement_tests;

use crate::{NewBooking, Persistence};
use tasklink_domain::{BookingId, GeoPoint, Money, Role, ServiceId, SessionRef, UserId};

/// The test service price: $100.00 in minor units.
pub fn test_price() -> Money {
    Money::from_minor(10_000)
}

/// Creates a store with one customer, one provider, and one service.
pub fn setup_marketplace() -> (Persistence, UserId, UserId, ServiceId) {
    let mut store = Persistence::new_in_memory().expect("in-memory store");

    let customer = store
        .create_user("Ada Customer", "ada@example.com", Role::Customer)
        .expect("create customer");
    let provider = store
        .create_user("Bo Provider", "bo@example.com", Role::Provider)
        .expect("create provider");
    let service = store
        .create_service(provider, "Deep cleaning", test_price())
        .expect("create service");

    (store, customer, provider, service)
}

/// Creates a pending booking with a checkout session reference attached.
pub fn create_test_booking(
    store: &mut Persistence,
    customer: UserId,
    provider: UserId,
    service: ServiceId,
) -> BookingId {
    let booking = store
        .create_booking(&NewBooking {
            customer,
            provider,
            service,
            scheduled_for: String::from("2026-02-14T10:00:00Z"),
            location: GeoPoint {
                latitude: 40.7128,
                longitude: -74.0060,
            },
            address: String::from("1 Main St"),
            note: String::from("ring the bell twice"),
        })
        .expect("create booking");

    store
        .set_session_ref(booking, &SessionRef::new("cs_test_1"))
        .expect("attach session ref");

    booking
}
