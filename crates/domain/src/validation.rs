// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Free-standing validation rules used by the lifecycle engine.

use crate::error::DomainError;
use crate::money::Money;

/// Validates that a rejection carries a non-empty reason.
///
/// The reason is stored verbatim on the booking; only presence is checked.
///
/// # Errors
///
/// Returns `DomainError::MissingRejectReason` if the reason is absent or
/// blank.
pub fn validate_reject_reason(reason: Option<&str>) -> Result<String, DomainError> {
    match reason {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(DomainError::MissingRejectReason),
    }
}

/// Validates a withdrawal request against the current wallet balance.
///
/// The balance must never be debited below zero: the requested amount must
/// be positive and must not exceed the balance.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` for non-positive requests and
/// `DomainError::InsufficientFunds` when the request exceeds the balance.
pub fn validate_withdrawal(balance: Money, requested: Money) -> Result<(), DomainError> {
    if !requested.is_positive() {
        return Err(DomainError::InvalidAmount { amount: requested });
    }
    if requested > balance {
        return Err(DomainError::InsufficientFunds { balance, requested });
    }
    Ok(())
}
