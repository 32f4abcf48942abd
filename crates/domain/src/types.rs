// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core identifier and record types for the booking workflow.

use crate::booking_status::BookingStatus;
use serde::{Deserialize, Serialize};

/// Identifier of a user (customer or provider).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new user identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Identifier of a provider-owned service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ServiceId(i64);

impl ServiceId {
    /// Creates a new service identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Identifier of a booking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Creates a new booking identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// External checkout session reference issued by the payment gateway.
///
/// Stored on the booking at creation and used for idempotent confirmation
/// matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRef(String);

impl SessionRef {
    /// Creates a session reference.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the reference string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// External payment confirmation reference issued by the payment gateway
/// once a session is paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationRef(String);

impl ConfirmationRef {
    /// Creates a confirmation reference.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the reference string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Books services and pays for them.
    Customer,
    /// Offers services and accrues a wallet balance.
    Provider,
}

impl Role {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Provider => "provider",
        }
    }
}

/// The party initiating a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The customer who created the booking.
    Customer,
    /// The provider the booking was made with.
    Provider,
}

/// A geographic point attached to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// One service engagement between a customer and a provider.
///
/// The customer, provider, and service references are fixed at creation.
/// Bookings are never physically deleted; `is_deleted` soft-deletes while
/// preserving the payment audit trail. `version` supports compare-and-swap
/// updates in the ledger store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The booking identifier.
    pub id: BookingId,
    /// The customer who requested the service.
    pub customer: UserId,
    /// The provider the service was requested from.
    pub provider: UserId,
    /// The requested service.
    pub service: ServiceId,
    /// Scheduled date (ISO 8601).
    pub scheduled_for: String,
    /// Geolocation of the engagement.
    pub location: GeoPoint,
    /// Free-text address.
    pub address: String,
    /// Free-text note from the customer.
    pub note: String,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// True once an external payment confirmation has been recorded.
    pub is_paid: bool,
    /// Reason text, present only for rejected bookings.
    pub reject_reason: Option<String>,
    /// Checkout session reference from the payment gateway.
    pub session_ref: Option<SessionRef>,
    /// Payment confirmation reference from the payment gateway.
    pub confirmation_ref: Option<ConfirmationRef>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Optimistic concurrency version, incremented on every update.
    pub version: i64,
}
