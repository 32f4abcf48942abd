// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process gateway used by tests and the sandbox configuration.

use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use tasklink_domain::{BookingId, ConfirmationRef, Money, SessionRef};

use crate::error::GatewayError;
use crate::gateway::{CheckoutSession, ConfirmedSession, PaymentGateway, PayoutOnboarding};

#[derive(Debug, Clone)]
struct FakeSession {
    amount: i64,
    booking: i64,
    paid: bool,
    confirmation: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<String, FakeSession>,
    refunds: Vec<(String, i64)>,
    transfers: Vec<(String, i64)>,
    accounts: Vec<String>,
    fail_requests: bool,
}

/// A gateway that settles everything in process.
///
/// Checkout sessions start unpaid; tests flip them with
/// [`FakeGateway::mark_session_paid`] to simulate the customer completing
/// checkout. [`FakeGateway::fail_requests`] makes every subsequent call
/// fail, for exercising external-failure paths.
#[derive(Debug, Default)]
pub struct FakeGateway {
    inner: Mutex<Inner>,
}

fn gen_ref(prefix: &str) -> String {
    format!("{prefix}_{}", rand::random::<u64>())
}

impl FakeGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the customer completing checkout for a session.
    ///
    /// Returns the confirmation reference the session now carries.
    ///
    /// # Panics
    ///
    /// Panics if the session does not exist or the lock is poisoned.
    #[must_use]
    pub fn mark_session_paid(&self, session_ref: &SessionRef) -> ConfirmationRef {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let session = inner
            .sessions
            .get_mut(session_ref.value())
            .unwrap_or_else(|| panic!("unknown session {}", session_ref.value()));

        let confirmation: String = gen_ref("pi_fake");
        session.paid = true;
        session.confirmation = Some(confirmation.clone());
        debug!(
            session_ref = session_ref.value(),
            booking = session.booking,
            amount = session.amount,
            "Marked fake session paid"
        );
        ConfirmationRef::new(&confirmation)
    }

    /// Makes every subsequent gateway call fail with `RequestFailed`.
    pub fn fail_requests(&self, fail: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.fail_requests = fail;
    }

    /// Refunds issued so far, as (confirmation reference, amount) pairs.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn refunds(&self) -> Vec<(String, i64)> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.refunds.clone()
    }

    /// Transfers issued so far, as (account reference, amount) pairs.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn transfers(&self) -> Vec<(String, i64)> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.transfers.clone()
    }

    fn check_available(inner: &Inner) -> Result<(), GatewayError> {
        if inner.fail_requests {
            return Err(GatewayError::RequestFailed(String::from(
                "gateway unavailable",
            )));
        }
        Ok(())
    }
}

impl PaymentGateway for FakeGateway {
    fn create_checkout_session(
        &self,
        amount: Money,
        booking: BookingId,
    ) -> Result<CheckoutSession, GatewayError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Self::check_available(&inner)?;

        let session_ref: String = gen_ref("cs_fake");
        inner.sessions.insert(
            session_ref.clone(),
            FakeSession {
                amount: amount.minor(),
                booking: booking.value(),
                paid: false,
                confirmation: None,
            },
        );

        debug!(session_ref = %session_ref, booking = booking.value(), "Created fake checkout session");

        Ok(CheckoutSession {
            session_ref: SessionRef::new(&session_ref),
            url: format!("https://pay.invalid/checkout/{session_ref}"),
        })
    }

    fn confirm_session(&self, session_ref: &SessionRef) -> Result<ConfirmedSession, GatewayError> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Self::check_available(&inner)?;

        let session = inner
            .sessions
            .get(session_ref.value())
            .ok_or_else(|| GatewayError::UnknownReference(session_ref.value().to_string()))?;

        Ok(ConfirmedSession {
            paid: session.paid,
            confirmation: session
                .confirmation
                .as_deref()
                .map(ConfirmationRef::new),
        })
    }

    fn refund(
        &self,
        confirmation: &ConfirmationRef,
        amount: Money,
    ) -> Result<ConfirmationRef, GatewayError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Self::check_available(&inner)?;

        let known: bool = inner
            .sessions
            .values()
            .any(|session| session.confirmation.as_deref() == Some(confirmation.value()));
        if !known {
            return Err(GatewayError::UnknownReference(
                confirmation.value().to_string(),
            ));
        }

        inner
            .refunds
            .push((confirmation.value().to_string(), amount.minor()));

        Ok(ConfirmationRef::new(&gen_ref("re_fake")))
    }

    fn transfer(&self, account_ref: &str, amount: Money) -> Result<ConfirmationRef, GatewayError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Self::check_available(&inner)?;

        if !inner.accounts.iter().any(|acct| acct == account_ref) {
            return Err(GatewayError::UnknownReference(account_ref.to_string()));
        }

        inner.transfers.push((account_ref.to_string(), amount.minor()));

        Ok(ConfirmationRef::new(&gen_ref("tr_fake")))
    }

    fn create_payout_account(&self, email: &str) -> Result<PayoutOnboarding, GatewayError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Self::check_available(&inner)?;

        let account_ref: String = gen_ref("acct_fake");
        inner.accounts.push(account_ref.clone());

        debug!(account_ref = %account_ref, email, "Created fake payout account");

        Ok(PayoutOnboarding {
            onboarding_url: format!("https://pay.invalid/onboarding/{account_ref}"),
            account_ref,
        })
    }
}
