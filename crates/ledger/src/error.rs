// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested user was not found.
    UserNotFound(i64),
    /// The requested service was not found.
    ServiceNotFound(i64),
    /// The requested booking was not found.
    BookingNotFound(i64),
    /// No booking matches the given checkout session reference.
    SessionNotFound(String),
    /// A compare-and-swap booking update lost to a concurrent writer.
    VersionConflict { booking_id: i64 },
    /// A guarded wallet debit found an insufficient balance.
    BalanceGuardFailed { user_id: i64 },
    /// A stored row failed to decode into a domain value.
    InvalidRecord(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UserNotFound(id) => write!(f, "User not found: {id}"),
            Self::ServiceNotFound(id) => write!(f, "Service not found: {id}"),
            Self::BookingNotFound(id) => write!(f, "Booking not found: {id}"),
            Self::SessionNotFound(session_ref) => {
                write!(f, "No booking for session reference: {session_ref}")
            }
            Self::VersionConflict { booking_id } => {
                write!(f, "Concurrent update detected for booking {booking_id}")
            }
            Self::BalanceGuardFailed { user_id } => {
                write!(f, "Wallet debit rejected for user {user_id}: insufficient balance")
            }
            Self::InvalidRecord(msg) => write!(f, "Invalid stored record: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
