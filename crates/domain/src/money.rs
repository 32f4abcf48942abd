// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary amounts in minor currency units.
//!
//! All money in the system is an integer count of minor units (cents).
//! The sign encodes direction on ledger entries: positive amounts are
//! charges/credits, negative amounts are payouts/withdrawals.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units.
///
/// Amounts are signed; ledger entries use negative amounts for money
/// leaving the platform (payouts, withdrawals, retained fees).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a count of minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the amount as minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns the negated amount.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the sum does not fit in an `i64`.
    pub fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(DomainError::AmountOverflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the difference does not fit in an `i64`.
    pub fn checked_sub(self, other: Self) -> Result<Self, DomainError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(DomainError::AmountOverflow)
    }

    /// Computes a basis-point fraction of this amount, truncating toward zero.
    ///
    /// Used for fee computation: 500 basis points is 5%.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the result does not fit in an `i64`.
    pub fn basis_points(self, bps: u32) -> Result<Self, DomainError> {
        let wide: i128 = i128::from(self.0) * i128::from(bps) / 10_000;
        i64::try_from(wide)
            .map(Self)
            .map_err(|_| DomainError::AmountOverflow)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
