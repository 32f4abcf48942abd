// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{GatewayIntent, LedgerIntent, Notice, TransitionResult, WalletDelta};
use tasklink_domain::{
    Booking, BookingStatus, DomainError, FeePolicy, Money, Party, PaymentStatus,
    validate_reject_reason,
};

/// Applies a lifecycle command to a booking, producing the new booking
/// record and the side effects the transition entails.
///
/// The function is pure: it performs no I/O and mutates nothing. Status
/// guards are checked against the current booking; monetary side effects
/// are computed from the service price and the fee policy.
///
/// # Arguments
///
/// * `booking` - The current booking record (immutable)
/// * `price` - The price of the booked service, in minor units
/// * `command` - The transition to apply
/// * `policy` - The platform fee policy
///
/// # Errors
///
/// Returns an error if the command violates domain rules, most commonly a
/// conflict naming the booking's current status.
#[allow(clippy::too_many_lines)]
pub fn apply(
    booking: &Booking,
    price: Money,
    command: Command,
    policy: &FeePolicy,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::ConfirmPayment { confirmation } => {
            // Replay / spoofed-confirmation guards
            if booking.is_paid {
                return Err(CoreError::DomainViolation(DomainError::AlreadyPaid {
                    booking_id: booking.id.value(),
                }));
            }
            if booking.session_ref.is_none() {
                return Err(CoreError::DomainViolation(DomainError::MissingSessionRef {
                    booking_id: booking.id.value(),
                }));
            }

            let mut new_booking: Booking = booking.clone();
            new_booking.is_paid = true;
            new_booking.confirmation_ref = Some(confirmation.clone());
            new_booking.version = booking.version + 1;

            let entry: LedgerIntent = LedgerIntent {
                booking: Some(booking.id),
                customer: booking.customer,
                provider: booking.provider,
                service: booking.service,
                amount: price,
                status: PaymentStatus::Paid,
                confirmation: Some(confirmation),
            };

            Ok(TransitionResult {
                booking: new_booking,
                entries: vec![entry],
                wallet_delta: None,
                gateway: None,
                notices: vec![Notice {
                    recipient: booking.provider,
                    message: String::from("You have a new booking request"),
                }],
            })
        }
        Command::Accept => {
            booking
                .status
                .validate_transition(BookingStatus::Accepted)?;

            let mut new_booking: Booking = booking.clone();
            new_booking.status = BookingStatus::Accepted;
            new_booking.version = booking.version + 1;

            Ok(TransitionResult {
                booking: new_booking,
                entries: Vec::new(),
                wallet_delta: None,
                gateway: None,
                notices: vec![Notice {
                    recipient: booking.customer,
                    message: String::from("Your booking request has been accepted"),
                }],
            })
        }
        Command::Reject { reason } => {
            booking
                .status
                .validate_transition(BookingStatus::Rejected)?;
            let reason: String = validate_reject_reason(reason.as_deref())?;

            let mut new_booking: Booking = booking.clone();
            new_booking.status = BookingStatus::Rejected;
            new_booking.reject_reason = Some(reason.clone());
            new_booking.version = booking.version + 1;

            Ok(TransitionResult {
                booking: new_booking,
                entries: Vec::new(),
                wallet_delta: None,
                gateway: None,
                notices: vec![Notice {
                    recipient: booking.customer,
                    message: format!("Your booking request has been rejected: {reason}"),
                }],
            })
        }
        Command::Complete => {
            booking
                .status
                .validate_transition(BookingStatus::Completed)?;

            let credit: Money = policy.completion_credit(price)?;

            let mut new_booking: Booking = booking.clone();
            new_booking.status = BookingStatus::Completed;
            new_booking.version = booking.version + 1;

            Ok(TransitionResult {
                booking: new_booking,
                entries: Vec::new(),
                wallet_delta: Some(WalletDelta {
                    provider: booking.provider,
                    amount: credit,
                }),
                gateway: None,
                notices: vec![Notice {
                    recipient: booking.provider,
                    message: String::from(
                        "Booking completed, the payout was credited to your wallet",
                    ),
                }],
            })
        }
        Command::Cancel { by } => {
            booking
                .status
                .validate_transition(BookingStatus::Cancelled)?;

            let mut new_booking: Booking = booking.clone();
            new_booking.status = BookingStatus::Cancelled;
            new_booking.version = booking.version + 1;

            // Fee flows only exist once a payment has been captured; an
            // unpaid booking cancels cleanly.
            let fee: Money = if booking.is_paid {
                policy.cancellation_fee(price)?
            } else {
                Money::ZERO
            };

            let mut entries: Vec<LedgerIntent> = Vec::new();
            let mut wallet_delta: Option<WalletDelta> = None;
            let mut gateway: Option<GatewayIntent> = None;

            if fee.is_positive() {
                match by {
                    Party::Customer => {
                        // The fee amount is refunded to the customer through
                        // the gateway (fee-retention interpretation).
                        let confirmation = booking.confirmation_ref.clone().ok_or_else(|| {
                            CoreError::Internal(format!(
                                "paid booking {} has no confirmation reference",
                                booking.id.value()
                            ))
                        })?;
                        gateway = Some(GatewayIntent::Refund {
                            confirmation,
                            amount: fee,
                        });
                        entries.push(LedgerIntent {
                            booking: Some(booking.id),
                            customer: booking.customer,
                            provider: booking.provider,
                            service: booking.service,
                            amount: fee.negated(),
                            status: PaymentStatus::Refunded,
                            confirmation: booking.confirmation_ref.clone(),
                        });
                    }
                    Party::Provider => {
                        // Provider-initiated cancellation debits the fee
                        // from the provider wallet as a penalty.
                        wallet_delta = Some(WalletDelta {
                            provider: booking.provider,
                            amount: fee.negated(),
                        });
                        entries.push(LedgerIntent {
                            booking: Some(booking.id),
                            customer: booking.customer,
                            provider: booking.provider,
                            service: booking.service,
                            amount: fee.negated(),
                            status: PaymentStatus::CancellationFee,
                            confirmation: None,
                        });
                    }
                }
            }

            let notices: Vec<Notice> = match by {
                Party::Customer => vec![Notice {
                    recipient: booking.provider,
                    message: String::from("The booking was cancelled by the customer"),
                }],
                Party::Provider => vec![Notice {
                    recipient: booking.customer,
                    message: String::from("The booking was cancelled by the provider"),
                }],
            };

            Ok(TransitionResult {
                booking: new_booking,
                entries,
                wallet_delta,
                gateway,
                notices,
            })
        }
    }
}
