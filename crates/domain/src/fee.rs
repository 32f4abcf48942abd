// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Platform fee policy.
//!
//! Fee rates are a policy input constructed at startup, not constants baked
//! into the lifecycle engine. The defaults match the observed product
//! behavior: a 5% cancellation fee, a 5% fee retained on withdrawals, and
//! no platform commission on the completion payout path.

use crate::error::DomainError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Basis-point fee rates applied by the lifecycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Fee charged when a booking is cancelled, as basis points of the
    /// service price. Customer-initiated cancellations refund this amount
    /// through the gateway; provider-initiated cancellations debit it from
    /// the provider wallet.
    pub cancellation_fee_bps: u32,
    /// Platform commission retained when a completed booking is credited to
    /// the provider wallet. Zero in the observed product.
    pub completion_commission_bps: u32,
    /// Platform fee retained on withdrawals: the transfer moves the
    /// requested amount minus this fee, while the wallet is debited the
    /// full requested amount.
    pub withdrawal_fee_bps: u32,
}

impl FeePolicy {
    /// Creates a fee policy from explicit basis-point rates.
    #[must_use]
    pub const fn new(
        cancellation_fee_bps: u32,
        completion_commission_bps: u32,
        withdrawal_fee_bps: u32,
    ) -> Self {
        Self {
            cancellation_fee_bps,
            completion_commission_bps,
            withdrawal_fee_bps,
        }
    }

    /// The cancellation fee for a booking at the given service price.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee computation overflows.
    pub fn cancellation_fee(&self, price: Money) -> Result<Money, DomainError> {
        price.basis_points(self.cancellation_fee_bps)
    }

    /// The amount credited to the provider wallet when a booking completes:
    /// the full service price minus the completion commission.
    ///
    /// # Errors
    ///
    /// Returns an error if the computation overflows.
    pub fn completion_credit(&self, price: Money) -> Result<Money, DomainError> {
        let commission: Money = price.basis_points(self.completion_commission_bps)?;
        price.checked_sub(commission)
    }

    /// The amount actually transferred for a withdrawal request: the
    /// requested amount minus the withdrawal fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the computation overflows.
    pub fn withdrawal_transfer_amount(&self, requested: Money) -> Result<Money, DomainError> {
        let fee: Money = requested.basis_points(self.withdrawal_fee_bps)?;
        requested.checked_sub(fee)
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new(500, 0, 500)
    }
}
