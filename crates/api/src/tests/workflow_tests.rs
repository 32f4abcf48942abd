// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end booking workflow tests through the public handlers.

use super::{
    TEST_PRICE_MINOR, TestEnv, completed_booking, create_test_booking, paid_booking,
    setup_marketplace, test_env,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    BookingAction, BookingActionRequest, CancelBookingRequest, ConfirmPaymentRequest,
    WithdrawRequest, WithdrawResult,
};
use tasklink_domain::{BookingStatus, PaymentStatus, SessionRef};
use tasklink_notify::Notification;

#[test]
fn test_full_lifecycle_credits_wallet() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);

    completed_booking(&mut env, customer, service);

    let wallet = handlers::get_wallet(&mut env.store, provider).expect("wallet");
    assert_eq!(wallet.balance_minor, TEST_PRICE_MINOR);
    assert_eq!(wallet.entries.len(), 1);
    assert_eq!(wallet.entries[0].status, PaymentStatus::Paid);
    assert_eq!(wallet.entries[0].amount_minor, TEST_PRICE_MINOR);
}

#[test]
fn test_confirm_payment_notifies_online_provider() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);

    env.presence.connect(provider);
    let mut rx = env.broadcaster.subscribe();

    paid_booking(&mut env, customer, service);

    assert_eq!(
        rx.try_recv(),
        Ok(Notification {
            recipient: provider,
            message: String::from("You have a new booking request"),
        })
    );
}

#[test]
fn test_replayed_confirmation_conflicts() {
    let mut env: TestEnv = test_env();
    let (customer, _provider, service) = setup_marketplace(&mut env);

    let (booking_id, session_id) = create_test_booking(&mut env, customer, service);
    let _confirmation = env.gateway.mark_session_paid(&SessionRef::new(&session_id));

    let request = ConfirmPaymentRequest {
        session_id: session_id.clone(),
    };
    handlers::confirm_payment(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        request.clone(),
    )
    .expect("first confirmation");

    let replay = handlers::confirm_payment(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        request,
    );
    assert_eq!(
        replay,
        Err(ApiError::Conflict {
            message: format!("Booking {} is already paid", booking_id.value()),
        })
    );
}

#[test]
fn test_unpaid_session_is_rejected() {
    let mut env: TestEnv = test_env();
    let (customer, _provider, service) = setup_marketplace(&mut env);

    let (_booking_id, session_id) = create_test_booking(&mut env, customer, service);

    let result = handlers::confirm_payment(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        ConfirmPaymentRequest { session_id },
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "session_id"
    ));
}

#[test]
fn test_double_accept_names_current_status() {
    let mut env: TestEnv = test_env();
    let (customer, _provider, service) = setup_marketplace(&mut env);

    let booking_id = paid_booking(&mut env, customer, service);
    let accept = BookingActionRequest {
        action: BookingAction::Accept,
        reason: None,
    };

    handlers::booking_action(
        &mut env.store,
        &env.dispatcher,
        &env.policy,
        booking_id,
        accept.clone(),
    )
    .expect("first accept");

    let second =
        handlers::booking_action(&mut env.store, &env.dispatcher, &env.policy, booking_id, accept);
    assert_eq!(
        second,
        Err(ApiError::Conflict {
            message: String::from("Booking already accepted"),
        })
    );
}

#[test]
fn test_reject_requires_reason() {
    let mut env: TestEnv = test_env();
    let (customer, _provider, service) = setup_marketplace(&mut env);

    let booking_id = paid_booking(&mut env, customer, service);

    let result = handlers::booking_action(
        &mut env.store,
        &env.dispatcher,
        &env.policy,
        booking_id,
        BookingActionRequest {
            action: BookingAction::Reject,
            reason: None,
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reason"
    ));
}

#[test]
fn test_reject_stores_reason_and_is_terminal() {
    let mut env: TestEnv = test_env();
    let (customer, _provider, service) = setup_marketplace(&mut env);

    let booking_id = paid_booking(&mut env, customer, service);

    let view = handlers::booking_action(
        &mut env.store,
        &env.dispatcher,
        &env.policy,
        booking_id,
        BookingActionRequest {
            action: BookingAction::Reject,
            reason: Some(String::from("fully booked that week")),
        },
    )
    .expect("reject");
    assert_eq!(view.status, BookingStatus::Rejected);
    assert_eq!(view.reject_reason.as_deref(), Some("fully booked that week"));

    let cancel = handlers::cancel_booking(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        booking_id,
        CancelBookingRequest {
            by: tasklink_domain::Party::Customer,
        },
    );
    assert_eq!(
        cancel,
        Err(ApiError::Conflict {
            message: String::from("Booking already rejected"),
        })
    );
}

#[test]
fn test_customer_cancel_refunds_fee_through_gateway() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);

    let (booking_id, session_id) = create_test_booking(&mut env, customer, service);
    let confirmation = env.gateway.mark_session_paid(&SessionRef::new(&session_id));
    handlers::confirm_payment(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        ConfirmPaymentRequest { session_id },
    )
    .expect("confirm payment");

    let view = handlers::cancel_booking(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        booking_id,
        CancelBookingRequest {
            by: tasklink_domain::Party::Customer,
        },
    )
    .expect("cancel");
    assert_eq!(view.status, BookingStatus::Cancelled);

    // 5% of $100.00 goes back to the customer through the gateway.
    assert_eq!(
        env.gateway.refunds(),
        vec![(confirmation.value().to_string(), 500)]
    );

    // The provider wallet never held the money, so it stays untouched.
    let wallet = handlers::get_wallet(&mut env.store, provider).expect("wallet");
    assert_eq!(wallet.balance_minor, 0);
    let statuses: Vec<PaymentStatus> = wallet.entries.iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![PaymentStatus::Paid, PaymentStatus::Refunded]);
    assert_eq!(wallet.entries[1].amount_minor, -500);
}

#[test]
fn test_provider_cancel_debits_wallet() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);

    // One completed booking funds the wallet so the penalty can be debited.
    completed_booking(&mut env, customer, service);

    let booking_id = paid_booking(&mut env, customer, service);
    handlers::booking_action(
        &mut env.store,
        &env.dispatcher,
        &env.policy,
        booking_id,
        BookingActionRequest {
            action: BookingAction::Accept,
            reason: None,
        },
    )
    .expect("accept");

    handlers::cancel_booking(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        booking_id,
        CancelBookingRequest {
            by: tasklink_domain::Party::Provider,
        },
    )
    .expect("cancel");

    let wallet = handlers::get_wallet(&mut env.store, provider).expect("wallet");
    assert_eq!(wallet.balance_minor, TEST_PRICE_MINOR - 500);
    assert!(env.gateway.refunds().is_empty());
}

#[test]
fn test_unpaid_cancel_is_free() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);

    let (booking_id, _session_id) = create_test_booking(&mut env, customer, service);

    let view = handlers::cancel_booking(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        booking_id,
        CancelBookingRequest {
            by: tasklink_domain::Party::Customer,
        },
    )
    .expect("cancel");
    assert_eq!(view.status, BookingStatus::Cancelled);

    assert!(env.gateway.refunds().is_empty());
    let wallet = handlers::get_wallet(&mut env.store, provider).expect("wallet");
    assert!(wallet.entries.is_empty());
}

#[test]
fn test_gateway_outage_leaves_cancellation_uncommitted() {
    let mut env: TestEnv = test_env();
    let (customer, _provider, service) = setup_marketplace(&mut env);

    let booking_id = paid_booking(&mut env, customer, service);
    handlers::booking_action(
        &mut env.store,
        &env.dispatcher,
        &env.policy,
        booking_id,
        BookingActionRequest {
            action: BookingAction::Accept,
            reason: None,
        },
    )
    .expect("accept");

    env.gateway.fail_requests(true);

    let result = handlers::cancel_booking(
        &mut env.store,
        &env.gateway,
        &env.dispatcher,
        &env.policy,
        booking_id,
        CancelBookingRequest {
            by: tasklink_domain::Party::Customer,
        },
    );
    assert!(matches!(result, Err(ApiError::ExternalFailure { .. })));

    // The refund never happened, so the booking must be unchanged.
    let view = handlers::get_booking(&mut env.store, booking_id).expect("booking");
    assert_eq!(view.status, BookingStatus::Accepted);
}

#[test]
fn test_withdraw_onboards_then_transfers() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);
    completed_booking(&mut env, customer, service);

    let request = WithdrawRequest {
        provider_id: provider,
        amount_minor: 4_000,
    };

    // First attempt: no payout account yet, onboarding link comes back and
    // no money moves.
    let first = handlers::withdraw(&mut env.store, &env.gateway, &env.policy, request.clone())
        .expect("first withdraw");
    assert!(matches!(
        first,
        WithdrawResult::OnboardingRequired { ref onboarding_url }
            if onboarding_url.contains("/onboarding/")
    ));
    assert!(env.gateway.transfers().is_empty());

    // Second attempt: the stored account receives the amount minus the 5%
    // withdrawal fee, the wallet is debited the full amount.
    let second = handlers::withdraw(&mut env.store, &env.gateway, &env.policy, request)
        .expect("second withdraw");
    match second {
        WithdrawResult::Transferred {
            transferred_minor,
            transfer_ref,
        } => {
            assert_eq!(transferred_minor, 3_800);
            assert!(transfer_ref.starts_with("tr_fake"));
        }
        WithdrawResult::OnboardingRequired { .. } => panic!("expected a transfer"),
    }

    let wallet = handlers::get_wallet(&mut env.store, provider).expect("wallet");
    assert_eq!(wallet.balance_minor, 6_000);
    let payout = wallet
        .entries
        .iter()
        .find(|e| e.status == PaymentStatus::Payout)
        .expect("payout entry");
    assert_eq!(payout.amount_minor, -4_000);
    assert_eq!(payout.booking_id, None);

    let transfers = env.gateway.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].1, 3_800);
}

#[test]
fn test_withdraw_exceeding_balance_is_rejected() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);
    completed_booking(&mut env, customer, service);

    let result = handlers::withdraw(
        &mut env.store,
        &env.gateway,
        &env.policy,
        WithdrawRequest {
            provider_id: provider,
            amount_minor: TEST_PRICE_MINOR + 1,
        },
    );
    assert!(matches!(result, Err(ApiError::InsufficientFunds { .. })));

    let wallet = handlers::get_wallet(&mut env.store, provider).expect("wallet");
    assert_eq!(wallet.balance_minor, TEST_PRICE_MINOR);
}

#[test]
fn test_list_bookings_returns_both_sides() {
    let mut env: TestEnv = test_env();
    let (customer, provider, service) = setup_marketplace(&mut env);

    let (booking_id, _session) = create_test_booking(&mut env, customer, service);

    let for_customer = handlers::list_bookings(&mut env.store, customer).expect("customer list");
    let for_provider = handlers::list_bookings(&mut env.store, provider).expect("provider list");
    assert_eq!(for_customer.len(), 1);
    assert_eq!(for_provider.len(), 1);
    assert_eq!(for_customer[0].booking_id, booking_id);
    assert_eq!(for_customer[0].status, BookingStatus::Pending);
}
