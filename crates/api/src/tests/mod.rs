// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod workflow_tests;

use std::sync::Arc;

use tasklink_domain::{BookingId, FeePolicy, ServiceId, UserId};
use tasklink_ledger::Persistence;
use tasklink_notify::{Dispatcher, LoggingPushSender, NotificationBroadcaster, PresenceDirectory};
use tasklink_pay::FakeGateway;

use crate::handlers;
use crate::request_response::{
    ConfirmPaymentRequest, CreateBookingRequest, CreateServiceRequest, CreateUserRequest,
};
use tasklink_domain::Role;

/// Everything a handler call needs, wired the way the server wires it.
pub struct TestEnv {
    pub store: Persistence,
    pub gateway: FakeGateway,
    pub presence: Arc<PresenceDirectory>,
    pub broadcaster: NotificationBroadcaster,
    pub dispatcher: Dispatcher,
    pub policy: FeePolicy,
}

pub fn test_env() -> TestEnv {
    let presence = Arc::new(PresenceDirectory::new());
    let broadcaster = NotificationBroadcaster::new();
    let dispatcher = Dispatcher::new(
        Arc::clone(&presence),
        broadcaster.clone(),
        Arc::new(LoggingPushSender),
    );

    TestEnv {
        store: Persistence::new_in_memory().expect("in-memory store"),
        gateway: FakeGateway::new(),
        presence,
        broadcaster,
        dispatcher,
        policy: FeePolicy::default(),
    }
}

/// The test service price: $100.00 in minor units.
pub const TEST_PRICE_MINOR: i64 = 10_000;

/// Registers one customer, one provider, and one service through the
/// public handlers.
pub fn setup_marketplace(env: &mut TestEnv) -> (UserId, UserId, ServiceId) {
    let customer = handlers::create_user(
        &mut env.store,
        CreateUserRequest {
            name: String::from("Ada Customer"),
            email: String::from("ada@example.com"),
            role: Role::Customer,
        },
    )
    .expect("create customer")
    .user_id;

    let provider = handlers::create_user(
        &mut env.store,
        CreateUserRequest {
            name: String::from("Bo Provider"),
            email: String::from("bo@example.com"),
            role: Role::Provider,
        },
    )
    .expect("create provider")
    .user_id;

    let service = handlers::create_service(
        &mut env.store,
        CreateServiceRequest {
            provider_id: provider,
            title: String::from("Deep cleaning"),
            price_minor: TEST_PRICE_MINOR,
        },
    )
    .expect("create service")
    .service_id;

    (customer, provider, service)
}

/// Creates a pending booking with its checkout session.
pub fn create_test_booking(
    env: &mut TestEnv,
    customer: UserId,
    service: ServiceId,
) -> (BookingId, String) {
    let result = handlers::create_booking(
        &mut env.store,
        &env.gateway,
        CreateBookingRequest {
            customer_id: customer,
            service_id: service,
            scheduled_for: String::from("2026-02-14T10:00:00Z"),
            latitude: 40.7128,
            longitude: -74.0060,
            address: String::from("1 Main St"),
            note: String::from("ring the bell twice"),
        },
    )
    .expect("create booking");

    (result.booking_id, result.session_id)
}

/// Creates a booking, pays its checkout session, and confirms the payment.
pub fn paid_booking(env: &mut TestEnv, customer: UserId, service: ServiceId) -> BookingId {
    let (booking_id, session_id) = create_test_booking(env, customer, service);
    let _confirmation = env
        .gateway
        .mark_session_paid(&tasklink_domain::SessionRef::new(&session_id));

    handlers::confirm_payment(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        ConfirmPaymentRequest {
            session_id,
        },
    )
    .expect("confirm payment");

    booking_id
}

/// Runs a booking through the full happy path, crediting the provider
/// wallet with the service price.
pub fn completed_booking(env: &mut TestEnv, customer: UserId, service: ServiceId) -> BookingId {
    let booking_id = paid_booking(env, customer, service);

    handlers::booking_action(
        &mut env.store,
        &env.dispatcher,
        &env.policy,
        booking_id,
        crate::request_response::BookingActionRequest {
            action: crate::request_response::BookingAction::Accept,
            reason: None,
        },
    )
    .expect("accept booking");

    handlers::complete_booking(&mut env.store, &env.dispatcher, &env.policy, booking_id)
        .expect("complete booking");

    booking_id
}
