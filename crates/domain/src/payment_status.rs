// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger entry status classification.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a ledger entry.
///
/// An entry is immutable once created; the status records what kind of
/// monetary event it represents, not a mutable workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// A captured charge for a booking.
    Paid,
    /// A refund issued to the customer through the payment gateway.
    Refunded,
    /// A cancellation fee retained by the platform or debited from a
    /// provider wallet.
    CancellationFee,
    /// A withdrawal transfer to a provider payout account.
    Payout,
}

impl PaymentStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::CancellationFee => "cancellation_fee",
            Self::Payout => "payout",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            "cancellation_fee" => Ok(Self::CancellationFee),
            "payout" => Ok(Self::Payout),
            _ => Err(DomainError::InvalidPaymentStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_round_trip() {
        for status in [
            PaymentStatus::Paid,
            PaymentStatus::Refunded,
            PaymentStatus::CancellationFee,
            PaymentStatus::Payout,
        ] {
            assert_eq!(PaymentStatus::parse_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_invalid_payment_status() {
        assert!(PaymentStatus::parse_str("settled").is_err());
    }
}
