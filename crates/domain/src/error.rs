// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::money::Money;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The booking is in a state that accepts no such transition.
    BookingAlready {
        /// The conflicting current status.
        status: BookingStatus,
    },
    /// The booking has already been marked paid.
    AlreadyPaid {
        /// The booking identifier.
        booking_id: i64,
    },
    /// The booking carries no checkout session reference, so a payment
    /// confirmation cannot be matched to it.
    MissingSessionRef {
        /// The booking identifier.
        booking_id: i64,
    },
    /// The payment gateway reports the session as not paid.
    PaymentIncomplete {
        /// The session reference that was checked.
        session_ref: String,
    },
    /// A rejection was requested without the required reason text.
    MissingRejectReason,
    /// A withdrawal exceeds the provider's wallet balance.
    InsufficientFunds {
        /// The current wallet balance.
        balance: Money,
        /// The requested withdrawal amount.
        requested: Money,
    },
    /// A monetary amount is not positive where one is required.
    InvalidAmount {
        /// The offending amount.
        amount: Money,
    },
    /// Monetary arithmetic overflowed.
    AmountOverflow,
    /// A booking status string could not be parsed.
    InvalidBookingStatus {
        /// The unparseable status string.
        status: String,
    },
    /// A payment status string could not be parsed.
    InvalidPaymentStatus {
        /// The unparseable status string.
        status: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookingAlready { status } => {
                write!(f, "Booking already {status}")
            }
            Self::AlreadyPaid { booking_id } => {
                write!(f, "Booking {booking_id} is already paid")
            }
            Self::MissingSessionRef { booking_id } => {
                write!(f, "Booking {booking_id} has no checkout session reference")
            }
            Self::PaymentIncomplete { session_ref } => {
                write!(f, "Payment for session '{session_ref}' is not completed")
            }
            Self::MissingRejectReason => {
                write!(f, "A reason is required to reject a booking")
            }
            Self::InsufficientFunds { balance, requested } => {
                write!(
                    f,
                    "Insufficient funds: requested {requested} exceeds balance {balance}"
                )
            }
            Self::InvalidAmount { amount } => {
                write!(f, "Amount must be positive, got {amount}")
            }
            Self::AmountOverflow => write!(f, "Monetary arithmetic overflow"),
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: '{status}'")
            }
            Self::InvalidPaymentStatus { status } => {
                write!(f, "Invalid payment status: '{status}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
