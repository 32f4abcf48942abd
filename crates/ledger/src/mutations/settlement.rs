// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional commit of lifecycle transitions and withdrawals.
//!
//! Every monetary mutation in this module runs inside a single database
//! transaction: the booking update, its ledger entries, and any wallet
//! delta all commit together or not at all.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::{debug, info};

use crate::data_models::NewLedgerEntryRow;
use crate::diesel_schema::{bookings, ledger_entries, users};
use crate::error::PersistenceError;
use tasklink::{LedgerIntent, TransitionResult};
use tasklink_domain::{ConfirmationRef, Money, PaymentStatus, UserId};

/// Commits a lifecycle transition atomically.
///
/// The booking row is updated with a compare-and-swap on the version
/// column: the update only matches if the stored version is still the one
/// the transition was computed from. A concurrent writer that got there
/// first makes the update match zero rows and the whole transaction rolls
/// back with a `VersionConflict`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `result` - The transition result to commit
///
/// # Errors
///
/// Returns `VersionConflict` if the booking changed since it was loaded,
/// `BalanceGuardFailed` if a wallet debit would overdraw the balance, or
/// a database error if any statement fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let booking = &result.booking;
        let expected_version: i64 = booking.version - 1;

        let updated: usize = diesel::update(
            bookings::table.filter(
                bookings::booking_id
                    .eq(booking.id.value())
                    .and(bookings::version.eq(expected_version)),
            ),
        )
        .set((
            bookings::status.eq(booking.status.as_str()),
            bookings::is_paid.eq(i32::from(booking.is_paid)),
            bookings::reject_reason.eq(booking.reject_reason.as_deref()),
            bookings::confirmation_ref.eq(booking.confirmation_ref.as_ref().map(ConfirmationRef::value)),
            bookings::version.eq(booking.version),
            bookings::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

        if updated != 1 {
            return Err(PersistenceError::VersionConflict {
                booking_id: booking.id.value(),
            });
        }

        for intent in &result.entries {
            insert_entry(conn, intent)?;
        }

        if let Some(delta) = &result.wallet_delta {
            apply_wallet_delta(conn, delta.provider, delta.amount)?;
        }

        info!(
            booking_id = booking.id.value(),
            status = booking.status.as_str(),
            version = booking.version,
            entries = result.entries.len(),
            "Committed transition"
        );

        Ok(())
    })
}

/// Commits a wallet withdrawal atomically.
///
/// The wallet is debited the full requested amount with a balance guard,
/// and a payout entry records the transfer. The gateway transfer has
/// already happened by the time this runs.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `provider` - The provider withdrawing funds
/// * `requested` - The amount debited from the wallet, in minor units
/// * `transfer_ref` - The gateway transfer reference
///
/// # Errors
///
/// Returns `BalanceGuardFailed` if the balance no longer covers the
/// requested amount, or a database error if any statement fails.
pub fn record_withdrawal(
    conn: &mut SqliteConnection,
    provider: UserId,
    requested: Money,
    transfer_ref: &ConfirmationRef,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        apply_wallet_delta(conn, provider, requested.negated())?;

        let row: NewLedgerEntryRow = NewLedgerEntryRow {
            booking_id: None,
            customer_id: None,
            provider_id: provider.value(),
            service_id: None,
            amount: requested.negated().minor(),
            status: PaymentStatus::Payout.as_str().to_string(),
            confirmation_ref: Some(transfer_ref.value().to_string()),
        };

        diesel::insert_into(ledger_entries::table)
            .values(&row)
            .execute(conn)?;

        info!(
            provider = provider.value(),
            amount = requested.minor(),
            "Recorded withdrawal"
        );

        Ok(())
    })
}

/// Inserts one ledger entry from a transition intent.
fn insert_entry(
    conn: &mut SqliteConnection,
    intent: &LedgerIntent,
) -> Result<(), PersistenceError> {
    let row: NewLedgerEntryRow = NewLedgerEntryRow {
        booking_id: intent.booking.map(|id| id.value()),
        customer_id: Some(intent.customer.value()),
        provider_id: intent.provider.value(),
        service_id: Some(intent.service.value()),
        amount: intent.amount.minor(),
        status: intent.status.as_str().to_string(),
        confirmation_ref: intent
            .confirmation
            .as_ref()
            .map(|r| r.value().to_string()),
    };

    diesel::insert_into(ledger_entries::table)
        .values(&row)
        .execute(conn)?;

    debug!(
        provider = intent.provider.value(),
        amount = intent.amount.minor(),
        status = intent.status.as_str(),
        "Appended ledger entry"
    );

    Ok(())
}

/// Applies a signed delta to a provider wallet.
///
/// Debits carry a balance guard in the WHERE clause so the check and the
/// update are one atomic statement.
fn apply_wallet_delta(
    conn: &mut SqliteConnection,
    provider: UserId,
    amount: Money,
) -> Result<(), PersistenceError> {
    let updated: usize = if amount.is_negative() {
        diesel::update(
            users::table.filter(
                users::user_id
                    .eq(provider.value())
                    .and(users::wallet_balance.ge(amount.negated().minor())),
            ),
        )
        .set(users::wallet_balance.eq(users::wallet_balance + amount.minor()))
        .execute(conn)?
    } else {
        diesel::update(users::table.filter(users::user_id.eq(provider.value())))
            .set(users::wallet_balance.eq(users::wallet_balance + amount.minor()))
            .execute(conn)?
    };

    if updated != 1 {
        if amount.is_negative() {
            return Err(PersistenceError::BalanceGuardFailed {
                user_id: provider.value(),
            });
        }
        return Err(PersistenceError::UserNotFound(provider.value()));
    }

    debug!(
        provider = provider.value(),
        delta = amount.minor(),
        "Applied wallet delta"
    );

    Ok(())
}
