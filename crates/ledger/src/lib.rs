// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking store and payment ledger for TaskLink.
//!
//! This crate persists user accounts, services, bookings, and the
//! append-only payment ledger. It is built on Diesel over `SQLite`.
//!
//! `SQLite` is the only backend: development and tests use a shared
//! in-memory database, deployments use a WAL-mode database file. No
//! external infrastructure is required.
//!
//! ## Concurrency model
//!
//! Bookings carry a version column. Lifecycle transitions commit with a
//! compare-and-swap on that column inside a single transaction, so two
//! racing writers cannot both apply a transition computed from the same
//! snapshot. Wallet debits carry a balance guard in the same statement
//! that performs the debit.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use tasklink::TransitionResult;
use tasklink_domain::{
    Booking, BookingId, ConfirmationRef, Money, Role, ServiceId, SessionRef, UserId,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{LedgerEntryRecord, ServiceRecord, UserRecord};
pub use error::PersistenceError;
pub use mutations::bookings::NewBooking;

/// Persistence adapter for the booking store and payment ledger.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be created, including when the
    /// email is already taken.
    pub fn create_user(
        &mut self,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<UserId, PersistenceError> {
        mutations::accounts::create_user(&mut self.conn, name, email, role)
    }

    /// Creates a new service offering for a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider does not exist or the insert fails.
    pub fn create_service(
        &mut self,
        provider: UserId,
        title: &str,
        price: Money,
    ) -> Result<ServiceId, PersistenceError> {
        mutations::accounts::create_service(&mut self.conn, provider, title, price)
    }

    /// Stores the payout account reference for a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn set_payout_account(
        &mut self,
        user: UserId,
        account_ref: &str,
    ) -> Result<(), PersistenceError> {
        mutations::accounts::set_payout_account(&mut self.conn, user, account_ref)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no such user exists.
    pub fn find_user(&mut self, user: UserId) -> Result<UserRecord, PersistenceError> {
        queries::accounts::find_user(&mut self.conn, user)
    }

    /// Retrieves a service by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceNotFound` if no such service exists.
    pub fn find_service(&mut self, service: ServiceId) -> Result<ServiceRecord, PersistenceError> {
        queries::accounts::find_service(&mut self.conn, service)
    }

    /// Retrieves the current wallet balance for a user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no such user exists.
    pub fn wallet_balance(&mut self, user: UserId) -> Result<Money, PersistenceError> {
        queries::accounts::wallet_balance(&mut self.conn, user)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Inserts a new pending booking and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced users or service do not exist or
    /// the insert fails.
    pub fn create_booking(&mut self, new_booking: &NewBooking) -> Result<BookingId, PersistenceError> {
        mutations::bookings::create_booking(&mut self.conn, new_booking)
    }

    /// Attaches the checkout session reference to a freshly created booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or the update fails.
    pub fn set_session_ref(
        &mut self,
        booking: BookingId,
        session_ref: &SessionRef,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::set_session_ref(&mut self.conn, booking, session_ref)
    }

    /// Soft-deletes a booking, preserving its ledger entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or the update fails.
    pub fn soft_delete_booking(&mut self, booking: BookingId) -> Result<(), PersistenceError> {
        mutations::bookings::soft_delete_booking(&mut self.conn, booking)
    }

    /// Retrieves a booking by ID. Soft-deleted bookings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if no live booking with that ID exists.
    pub fn find_booking(&mut self, booking: BookingId) -> Result<Booking, PersistenceError> {
        queries::bookings::find_booking(&mut self.conn, booking)
    }

    /// Retrieves the booking that owns a checkout session reference.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if no live booking carries that reference.
    pub fn find_booking_by_session(
        &mut self,
        session_ref: &SessionRef,
    ) -> Result<Booking, PersistenceError> {
        queries::bookings::find_booking_by_session(&mut self.conn, session_ref)
    }

    /// Lists the live bookings where the given user is the customer or the
    /// provider, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to decode.
    pub fn list_bookings_for_user(&mut self, user: UserId) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_for_user(&mut self.conn, user.value())
    }

    // ========================================================================
    // Settlement
    // ========================================================================

    /// Commits a lifecycle transition atomically: the booking update (with
    /// a compare-and-swap on the version column), its ledger entries, and
    /// any wallet delta all succeed or fail together.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` if the booking changed since it was
    /// loaded, `BalanceGuardFailed` if a wallet debit would overdraw the
    /// balance, or a database error if any statement fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<(), PersistenceError> {
        mutations::settlement::persist_transition(&mut self.conn, result)
    }

    /// Commits a wallet withdrawal atomically: a guarded debit of the full
    /// requested amount plus a payout ledger entry.
    ///
    /// # Errors
    ///
    /// Returns `BalanceGuardFailed` if the balance no longer covers the
    /// requested amount, or a database error if any statement fails.
    pub fn record_withdrawal(
        &mut self,
        provider: UserId,
        requested: Money,
        transfer_ref: &ConfirmationRef,
    ) -> Result<(), PersistenceError> {
        mutations::settlement::record_withdrawal(&mut self.conn, provider, requested, transfer_ref)
    }

    /// Lists all ledger entries for a booking, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to decode.
    pub fn entries_for_booking(
        &mut self,
        booking: BookingId,
    ) -> Result<Vec<LedgerEntryRecord>, PersistenceError> {
        queries::entries::entries_for_booking(&mut self.conn, booking)
    }

    /// Lists all ledger entries involving a provider, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to decode.
    pub fn entries_for_provider(
        &mut self,
        provider: UserId,
    ) -> Result<Vec<LedgerEntryRecord>, PersistenceError> {
        queries::entries::entries_for_provider(&mut self.conn, provider)
    }
}
