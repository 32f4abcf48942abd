// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.

use serde::{Deserialize, Serialize};

use tasklink_domain::{
    Booking, BookingId, BookingStatus, Party, PaymentStatus, Role, ServiceId, UserId,
};
use tasklink_ledger::LedgerEntryRecord;

/// Request to create a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Email address, unique across accounts.
    pub email: String,
    /// Whether the account books services or offers them.
    pub role: Role,
}

/// Result of creating a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResult {
    /// The assigned user ID.
    pub user_id: UserId,
}

/// Request to create a service offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    /// The provider offering the service.
    pub provider_id: UserId,
    /// Service title.
    pub title: String,
    /// Price in minor currency units.
    pub price_minor: i64,
}

/// Result of creating a service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServiceResult {
    /// The assigned service ID.
    pub service_id: ServiceId,
}

/// Request to create a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The customer requesting the service.
    pub customer_id: UserId,
    /// The service being booked.
    pub service_id: ServiceId,
    /// Scheduled date (ISO 8601).
    pub scheduled_for: String,
    /// Latitude of the engagement location.
    pub latitude: f64,
    /// Longitude of the engagement location.
    pub longitude: f64,
    /// Free-text address.
    pub address: String,
    /// Free-text note for the provider.
    #[serde(default)]
    pub note: String,
}

/// Result of creating a booking: the booking plus the checkout session
/// the customer must complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingResult {
    /// The assigned booking ID.
    pub booking_id: BookingId,
    /// The gateway checkout session reference.
    pub session_id: String,
    /// The URL the customer is sent to in order to pay.
    pub checkout_url: String,
}

/// Request to confirm a payment after the customer returns from checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    /// The checkout session reference to confirm.
    pub session_id: String,
}

/// Provider decision on a pending booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    /// Accept the booking request.
    Accept,
    /// Reject the booking request.
    Reject,
}

/// Request carrying a provider decision on a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingActionRequest {
    /// The decision.
    pub action: BookingAction,
    /// Reason text, required for rejections.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request to cancel a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    /// The party initiating the cancellation.
    pub by: Party,
}

/// Request to withdraw funds from a provider wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// The provider withdrawing.
    pub provider_id: UserId,
    /// Requested amount in minor currency units.
    pub amount_minor: i64,
}

/// Result of a withdrawal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WithdrawResult {
    /// The provider has no payout account yet; one was created and the
    /// provider must complete onboarding before retrying.
    OnboardingRequired {
        /// The URL the provider visits to finish onboarding.
        onboarding_url: String,
    },
    /// The transfer was executed and the wallet debited.
    Transferred {
        /// The amount actually transferred, after the withdrawal fee.
        transferred_minor: i64,
        /// The gateway transfer reference.
        transfer_ref: String,
    },
}

/// A booking as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    /// The booking ID.
    pub booking_id: BookingId,
    /// The customer who requested the service.
    pub customer_id: UserId,
    /// The provider the service was requested from.
    pub provider_id: UserId,
    /// The requested service.
    pub service_id: ServiceId,
    /// Scheduled date (ISO 8601).
    pub scheduled_for: String,
    /// Free-text address.
    pub address: String,
    /// Free-text note from the customer.
    pub note: String,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Whether an external payment has been confirmed.
    pub is_paid: bool,
    /// Reason text, present only for rejected bookings.
    pub reject_reason: Option<String>,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id,
            customer_id: booking.customer,
            provider_id: booking.provider,
            service_id: booking.service,
            scheduled_for: booking.scheduled_for.clone(),
            address: booking.address.clone(),
            note: booking.note.clone(),
            status: booking.status,
            is_paid: booking.is_paid,
            reject_reason: booking.reject_reason.clone(),
        }
    }
}

/// One payment ledger entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntryView {
    /// The entry ID.
    pub entry_id: i64,
    /// The booking the entry belongs to, absent for withdrawals.
    pub booking_id: Option<BookingId>,
    /// Signed amount in minor currency units.
    pub amount_minor: i64,
    /// Classification of the monetary event.
    pub status: PaymentStatus,
    /// External gateway reference, when one exists.
    pub confirmation_ref: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&LedgerEntryRecord> for LedgerEntryView {
    fn from(record: &LedgerEntryRecord) -> Self {
        Self {
            entry_id: record.id,
            booking_id: record.booking,
            amount_minor: record.amount.minor(),
            status: record.status,
            confirmation_ref: record
                .confirmation
                .as_ref()
                .map(|c| c.value().to_string()),
            created_at: record.created_at.clone(),
        }
    }
}

/// A provider wallet: current balance plus the full entry history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletView {
    /// The provider who owns the wallet.
    pub provider_id: UserId,
    /// Current balance in minor currency units.
    pub balance_minor: i64,
    /// Ledger entries involving this provider, oldest first.
    pub entries: Vec<LedgerEntryView>,
}
