// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tasklink_domain::{ConfirmationRef, Party};

/// A command represents a requested booking transition as data only.
///
/// Commands are the only way to request lifecycle changes; `apply` decides
/// whether the transition is legal and what side effects it entails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record an external payment confirmation for the booking.
    ///
    /// Issued by the payment gateway callback after the checkout session
    /// has been verified as paid.
    ConfirmPayment {
        /// The confirmation reference issued by the gateway.
        confirmation: ConfirmationRef,
    },
    /// Provider accepts the pending booking request.
    Accept,
    /// Provider rejects the pending booking request.
    Reject {
        /// Required reason text, stored verbatim on the booking.
        reason: Option<String>,
    },
    /// Provider marks the accepted booking as done, triggering the wallet
    /// payout credit.
    Complete,
    /// Customer or provider cancels the booking.
    Cancel {
        /// The party initiating the cancellation. Determines the direction
        /// of the cancellation fee.
        by: Party,
    },
}
