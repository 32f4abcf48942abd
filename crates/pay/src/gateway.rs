// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tasklink_domain::{BookingId, ConfirmationRef, Money, SessionRef};

use crate::error::GatewayError;

/// A checkout session created at the gateway for a booking charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// The gateway's session reference, stored on the booking.
    pub session_ref: SessionRef,
    /// The URL the customer is sent to in order to pay.
    pub url: String,
}

/// The gateway's answer when a checkout session is looked up after the
/// customer returns from payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedSession {
    /// Whether the session has actually been paid.
    pub paid: bool,
    /// The payment confirmation reference, present once paid.
    pub confirmation: Option<ConfirmationRef>,
}

/// Result of creating a payout account for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutOnboarding {
    /// The gateway's account reference, stored on the provider.
    pub account_ref: String,
    /// The URL the provider visits to finish onboarding.
    pub onboarding_url: String,
}

/// External payment provider operations used by the booking workflow.
///
/// Implementations must be cheap to share across request handlers.
pub trait PaymentGateway: Send + Sync {
    /// Creates a checkout session charging the given amount for a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot create the session.
    fn create_checkout_session(
        &self,
        amount: Money,
        booking: BookingId,
    ) -> Result<CheckoutSession, GatewayError>;

    /// Looks up a checkout session to learn whether it has been paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or the gateway cannot
    /// be reached.
    fn confirm_session(&self, session_ref: &SessionRef) -> Result<ConfirmedSession, GatewayError>;

    /// Refunds part of a captured payment back to the customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the confirmation reference is unknown or the
    /// refund is refused.
    fn refund(
        &self,
        confirmation: &ConfirmationRef,
        amount: Money,
    ) -> Result<ConfirmationRef, GatewayError>;

    /// Transfers funds to a provider's payout account and returns the
    /// transfer reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown or the transfer is
    /// refused.
    fn transfer(&self, account_ref: &str, amount: Money) -> Result<ConfirmationRef, GatewayError>;

    /// Creates a payout account for a provider and returns the onboarding
    /// link the provider must complete before funds can move.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot create the account.
    fn create_payout_account(&self, email: &str) -> Result<PayoutOnboarding, GatewayError>;
}
