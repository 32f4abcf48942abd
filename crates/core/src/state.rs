// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tasklink_domain::{Booking, BookingId, ConfirmationRef, Money, PaymentStatus, ServiceId, UserId};

/// An immutable ledger entry to be appended as part of a transition.
///
/// Entries are never updated after creation; corrections are modeled as
/// new entries. The amount sign encodes direction: positive for charges
/// and credits, negative for payouts, withdrawals, and retained fees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerIntent {
    /// The booking this entry belongs to. `None` only for withdrawals.
    pub booking: Option<BookingId>,
    /// The customer involved in the monetary event.
    pub customer: UserId,
    /// The provider involved in the monetary event.
    pub provider: UserId,
    /// The service the money relates to.
    pub service: ServiceId,
    /// Signed amount in minor units.
    pub amount: Money,
    /// Classification of the monetary event.
    pub status: PaymentStatus,
    /// External confirmation reference, when the event corresponds to a
    /// gateway-side object.
    pub confirmation: Option<ConfirmationRef>,
}

/// A change to a provider's wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletDelta {
    /// The provider whose wallet is mutated.
    pub provider: UserId,
    /// Signed amount to apply to the balance.
    pub amount: Money,
}

/// A payment-gateway call the transition requires.
///
/// The orchestration layer executes the intent *before* committing the
/// ledger mutation, so a gateway failure leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayIntent {
    /// Refund part of a captured payment to the customer.
    Refund {
        /// The confirmation reference of the captured payment.
        confirmation: ConfirmationRef,
        /// The amount to refund, in minor units.
        amount: Money,
    },
}

/// A notification to deliver after the transition commits.
///
/// Delivery is best-effort and never blocks or fails the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The user to notify.
    pub recipient: UserId,
    /// Human-readable message text.
    pub message: String,
}

/// The result of a successful lifecycle transition.
///
/// The engine decides; collaborators execute. The orchestration layer
/// runs the gateway intent first, then commits the booking update, ledger
/// entries, and wallet delta in one transaction, then dispatches notices.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The booking record after the transition, with `version` already
    /// incremented. The ledger store uses the previous version for its
    /// compare-and-swap update.
    pub booking: Booking,
    /// Ledger entries to append.
    pub entries: Vec<LedgerIntent>,
    /// Wallet balance change, if any.
    pub wallet_delta: Option<WalletDelta>,
    /// Gateway call required before commit, if any.
    pub gateway: Option<GatewayIntent>,
    /// Notifications to dispatch after commit.
    pub notices: Vec<Notice>,
}
