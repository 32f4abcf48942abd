// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for transactional transition commits, the version guard, and
//! wallet settlement.

use crate::tests::{create_test_booking, setup_marketplace, test_price};
use crate::{Persistence, PersistenceError};
use tasklink::{Command, apply};
use tasklink_domain::{
    Booking, BookingId, BookingStatus, ConfirmationRef, FeePolicy, Money, Party, PaymentStatus,
};

fn policy() -> FeePolicy {
    FeePolicy::default()
}

/// Applies a command to the stored booking and commits the result.
fn step(store: &mut Persistence, booking_id: BookingId, command: Command) -> Booking {
    let booking = store.find_booking(booking_id).expect("find booking");
    let result = apply(&booking, test_price(), command, &policy()).expect("apply");
    store.persist_transition(&result).expect("persist");
    result.booking
}

fn confirm_payment(store: &mut Persistence, booking_id: BookingId) -> Booking {
    step(
        store,
        booking_id,
        Command::ConfirmPayment {
            confirmation: ConfirmationRef::new("pi_test_1"),
        },
    )
}

#[test]
fn test_confirm_payment_commit_round_trip() {
    let (mut store, customer, provider, service) = setup_marketplace();
    let booking_id = create_test_booking(&mut store, customer, provider, service);

    confirm_payment(&mut store, booking_id);

    let booking = store.find_booking(booking_id).expect("reload");
    assert!(booking.is_paid);
    assert_eq!(
        booking.confirmation_ref,
        Some(ConfirmationRef::new("pi_test_1"))
    );
    assert_eq!(booking.version, 1);

    let entries = store.entries_for_booking(booking_id).expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, test_price());
    assert_eq!(entries[0].status, PaymentStatus::Paid);
    assert_eq!(entries[0].booking, Some(booking_id));
}

#[test]
fn test_stale_commit_is_rejected() {
    let (mut store, customer, provider, service) = setup_marketplace();
    let booking_id = create_test_booking(&mut store, customer, provider, service);

    let booking = store.find_booking(booking_id).expect("find booking");
    let result = apply(
        &booking,
        test_price(),
        Command::ConfirmPayment {
            confirmation: ConfirmationRef::new("pi_test_1"),
        },
        &policy(),
    )
    .expect("apply");

    store.persist_transition(&result).expect("first commit");

    // Committing the same result again must lose the version race.
    let second = store.persist_transition(&result);
    assert_eq!(
        second,
        Err(PersistenceError::VersionConflict {
            booking_id: booking_id.value(),
        })
    );
}

#[test]
fn test_completion_credits_provider_wallet() {
    let (mut store, customer, provider, service) = setup_marketplace();
    let booking_id = create_test_booking(&mut store, customer, provider, service);

    confirm_payment(&mut store, booking_id);
    step(&mut store, booking_id, Command::Accept);
    step(&mut store, booking_id, Command::Complete);

    let booking = store.find_booking(booking_id).expect("reload");
    assert_eq!(booking.status, BookingStatus::Completed);
    assert_eq!(booking.version, 3);

    let balance = store.wallet_balance(provider).expect("balance");
    assert_eq!(balance, test_price());
}

#[test]
fn test_provider_cancellation_debits_wallet() {
    let (mut store, customer, provider, service) = setup_marketplace();

    // Complete one booking first so the wallet has funds to debit.
    let first = create_test_booking(&mut store, customer, provider, service);
    confirm_payment(&mut store, first);
    step(&mut store, first, Command::Accept);
    step(&mut store, first, Command::Complete);

    let second = store
        .create_booking(&crate::NewBooking {
            customer,
            provider,
            service,
            scheduled_for: String::from("2026-03-01T09:00:00Z"),
            location: tasklink_domain::GeoPoint::default(),
            address: String::from("1 Main St"),
            note: String::new(),
        })
        .expect("second booking");
    store
        .set_session_ref(second, &tasklink_domain::SessionRef::new("cs_test_2"))
        .expect("session ref");

    confirm_payment(&mut store, second);
    step(&mut store, second, Command::Accept);
    step(
        &mut store,
        second,
        Command::Cancel {
            by: Party::Provider,
        },
    );

    // 10000 from the completed booking minus the 500 cancellation fee.
    let balance = store.wallet_balance(provider).expect("balance");
    assert_eq!(balance, Money::from_minor(9_500));

    let entries = store.entries_for_booking(second).expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].amount, Money::from_minor(-500));
    assert_eq!(entries[1].status, PaymentStatus::CancellationFee);
}

#[test]
fn test_wallet_debit_guard_rolls_back_whole_transition() {
    let (mut store, customer, provider, service) = setup_marketplace();
    let booking_id = create_test_booking(&mut store, customer, provider, service);

    confirm_payment(&mut store, booking_id);
    step(&mut store, booking_id, Command::Accept);

    // Wallet is empty, so the provider-cancel fee debit must fail and
    // take the status update and the fee entry down with it.
    let booking = store.find_booking(booking_id).expect("find booking");
    let result = apply(
        &booking,
        test_price(),
        Command::Cancel {
            by: Party::Provider,
        },
        &policy(),
    )
    .expect("apply");

    let committed = store.persist_transition(&result);
    assert_eq!(
        committed,
        Err(PersistenceError::BalanceGuardFailed {
            user_id: provider.value(),
        })
    );

    let reloaded = store.find_booking(booking_id).expect("reload");
    assert_eq!(reloaded.status, BookingStatus::Accepted);
    assert_eq!(reloaded.version, 2);

    let entries = store.entries_for_booking(booking_id).expect("entries");
    assert_eq!(entries.len(), 1, "only the original charge remains");
}

#[test]
fn test_withdrawal_debits_wallet_and_appends_payout_entry() {
    let (mut store, customer, provider, service) = setup_marketplace();
    let booking_id = create_test_booking(&mut store, customer, provider, service);

    confirm_payment(&mut store, booking_id);
    step(&mut store, booking_id, Command::Accept);
    step(&mut store, booking_id, Command::Complete);

    store
        .record_withdrawal(
            provider,
            Money::from_minor(4_000),
            &ConfirmationRef::new("tr_test_1"),
        )
        .expect("withdrawal");

    let balance = store.wallet_balance(provider).expect("balance");
    assert_eq!(balance, Money::from_minor(6_000));

    let entries = store.entries_for_provider(provider).expect("entries");
    let payout = entries
        .iter()
        .find(|entry| entry.status == PaymentStatus::Payout)
        .expect("payout entry");
    assert_eq!(payout.amount, Money::from_minor(-4_000));
    assert!(payout.booking.is_none());
    assert_eq!(
        payout.confirmation,
        Some(ConfirmationRef::new("tr_test_1"))
    );
}

#[test]
fn test_withdrawal_beyond_balance_is_rejected() {
    let (mut store, _, provider, _) = setup_marketplace();

    let result = store.record_withdrawal(
        provider,
        Money::from_minor(100),
        &ConfirmationRef::new("tr_test_1"),
    );

    assert_eq!(
        result,
        Err(PersistenceError::BalanceGuardFailed {
            user_id: provider.value(),
        })
    );
}
