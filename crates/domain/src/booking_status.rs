// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! This module defines the booking lifecycle states and legal transitions.
//! Transitions are one-directional; the terminal set accepts no further
//! transitions and any attempt is reported as a conflict naming the
//! current state.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking lifecycle states.
///
/// Happy path is `Pending` → `Accepted` → `Completed`. A pending booking
/// may be rejected by the provider; a pending or accepted booking may be
/// cancelled by either party. `Completed`, `Cancelled`, and `Rejected`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created by the customer, awaiting payment confirmation and a
    /// provider decision.
    Pending,
    /// Provider accepted the request.
    Accepted,
    /// Provider marked the work done and was paid out.
    Completed,
    /// Cancelled by the customer or the provider.
    Cancelled,
    /// Declined by the provider, with a required reason.
    Rejected,
}

/// Fixed evaluation order for status guards.
///
/// When a transition is illegal, the first matching state in this order is
/// the one named in the conflict error. This matters only for user-facing
/// error text, not for correctness.
const GUARD_ORDER: [BookingStatus; 5] = [
    BookingStatus::Pending,
    BookingStatus::Accepted,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
    BookingStatus::Rejected,
];

impl BookingStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (accepts no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }

    /// Validates that a transition from this status to another is permitted.
    ///
    /// Guards are evaluated in the fixed order `GUARD_ORDER` so conflict
    /// errors always name the same state for a given booking.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BookingAlready` naming the current state if the
    /// transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid: bool = match self {
            Self::Pending => matches!(
                new_status,
                Self::Accepted | Self::Rejected | Self::Cancelled
            ),
            Self::Accepted => matches!(new_status, Self::Completed | Self::Cancelled),
            // Terminal states accept nothing
            Self::Completed | Self::Cancelled | Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(Self::conflict_for(*self))
        }
    }

    /// Builds the conflict error for an illegal transition, reporting the
    /// first state in guard order that matches the current status.
    fn conflict_for(current: Self) -> DomainError {
        for candidate in GUARD_ORDER {
            if candidate == current {
                return DomainError::BookingAlready { status: candidate };
            }
        }
        // GUARD_ORDER covers every variant
        DomainError::BookingAlready { status: current }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
