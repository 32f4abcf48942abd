// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary side-effect tests: ledger entries, wallet deltas, refunds.

use crate::tests::helpers::{accepted_booking, paid_booking, pending_booking, test_policy, test_price};
use crate::{Command, GatewayIntent, apply};
use tasklink_domain::{Booking, ConfirmationRef, Money, Party, PaymentStatus};

#[test]
fn test_complete_credits_full_price_to_wallet() {
    let booking: Booking = accepted_booking();
    let result = apply(&booking, test_price(), Command::Complete, &test_policy()).unwrap();

    let delta = result.wallet_delta.unwrap();
    assert_eq!(delta.provider, booking.provider);
    assert_eq!(delta.amount, Money::from_minor(10_000));
    assert!(result.entries.is_empty());
    assert!(result.gateway.is_none());
}

#[test]
fn test_provider_cancel_debits_wallet_and_records_fee() {
    let booking: Booking = accepted_booking();
    let result = apply(
        &booking,
        test_price(),
        Command::Cancel {
            by: Party::Provider,
        },
        &test_policy(),
    )
    .unwrap();

    let delta = result.wallet_delta.unwrap();
    assert_eq!(delta.provider, booking.provider);
    assert_eq!(delta.amount, Money::from_minor(-500));

    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].amount, Money::from_minor(-500));
    assert_eq!(result.entries[0].status, PaymentStatus::CancellationFee);
    assert!(result.entries[0].confirmation.is_none());
    assert!(result.gateway.is_none());
    assert_eq!(result.notices[0].recipient, booking.customer);
}

#[test]
fn test_customer_cancel_issues_refund_intent() {
    let booking: Booking = accepted_booking();
    let result = apply(
        &booking,
        test_price(),
        Command::Cancel {
            by: Party::Customer,
        },
        &test_policy(),
    )
    .unwrap();

    assert_eq!(
        result.gateway,
        Some(GatewayIntent::Refund {
            confirmation: ConfirmationRef::new("pi_test_1"),
            amount: Money::from_minor(500),
        })
    );

    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].amount, Money::from_minor(-500));
    assert_eq!(result.entries[0].status, PaymentStatus::Refunded);
    assert!(result.wallet_delta.is_none());
    assert_eq!(result.notices[0].recipient, booking.provider);
}

#[test]
fn test_customer_cancel_of_pending_paid_booking_also_charges_fee() {
    let booking: Booking = paid_booking();
    let result = apply(
        &booking,
        test_price(),
        Command::Cancel {
            by: Party::Customer,
        },
        &test_policy(),
    )
    .unwrap();

    assert!(result.gateway.is_some());
    assert_eq!(result.entries.len(), 1);
}

#[test]
fn test_unpaid_cancel_has_no_monetary_side_effects() {
    let booking: Booking = pending_booking();
    let result = apply(
        &booking,
        test_price(),
        Command::Cancel {
            by: Party::Customer,
        },
        &test_policy(),
    )
    .unwrap();

    assert!(result.entries.is_empty());
    assert!(result.wallet_delta.is_none());
    assert!(result.gateway.is_none());
    assert_eq!(result.notices.len(), 1);
}

#[test]
fn test_fee_rounds_down_on_odd_prices() {
    let booking: Booking = accepted_booking();
    let result = apply(
        &booking,
        Money::from_minor(999),
        Command::Cancel {
            by: Party::Provider,
        },
        &test_policy(),
    )
    .unwrap();

    // 5% of 999 truncates to 49.
    assert_eq!(result.entries[0].amount, Money::from_minor(-49));
}
