// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tasklink::CoreError;
use tasklink_domain::DomainError;
use tasklink_ledger::PersistenceError;
use tasklink_pay::GatewayError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Lower-layer errors are translated explicitly so internals
/// never leak to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation conflicts with the resource's current state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The wallet balance does not cover the requested amount.
    InsufficientFunds {
        /// A human-readable description of the shortfall.
        message: String,
    },
    /// An external dependency (the payment gateway) failed.
    ExternalFailure {
        /// A description of the external failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InsufficientFunds { message } => {
                write!(f, "Insufficient funds: {message}")
            }
            Self::ExternalFailure { message } => {
                write!(f, "External failure: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::BookingAlready { status } => ApiError::Conflict {
            message: format!("Booking already {status}"),
        },
        DomainError::AlreadyPaid { booking_id } => ApiError::Conflict {
            message: format!("Booking {booking_id} is already paid"),
        },
        DomainError::MissingSessionRef { booking_id } => ApiError::InvalidInput {
            field: String::from("session_id"),
            message: format!("Booking {booking_id} has no checkout session"),
        },
        DomainError::PaymentIncomplete { session_ref } => ApiError::InvalidInput {
            field: String::from("session_id"),
            message: format!("Checkout session '{session_ref}' has not been paid"),
        },
        DomainError::MissingRejectReason => ApiError::InvalidInput {
            field: String::from("reason"),
            message: String::from("A rejection must include a reason"),
        },
        DomainError::InsufficientFunds { balance, requested } => ApiError::InsufficientFunds {
            message: format!("Requested {requested} but the wallet balance is {balance}"),
        },
        DomainError::InvalidAmount { amount } => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("Amount must be positive, got {amount}"),
        },
        DomainError::AmountOverflow => ApiError::Internal {
            message: String::from("Amount computation overflowed"),
        },
        DomainError::InvalidBookingStatus { status } => ApiError::Internal {
            message: format!("Stored booking status '{status}' is not recognized"),
        },
        DomainError::InvalidPaymentStatus { status } => ApiError::Internal {
            message: format!("Stored payment status '{status}' is not recognized"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        PersistenceError::ServiceNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Service"),
            message: format!("Service {id} does not exist"),
        },
        PersistenceError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {id} does not exist"),
        },
        PersistenceError::SessionNotFound(session_ref) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("No booking for checkout session '{session_ref}'"),
        },
        PersistenceError::VersionConflict { booking_id } => ApiError::Conflict {
            message: format!("Booking {booking_id} was modified concurrently, retry"),
        },
        PersistenceError::BalanceGuardFailed { user_id } => ApiError::InsufficientFunds {
            message: format!("Wallet balance for user {user_id} no longer covers the amount"),
        },
        _ => ApiError::Internal {
            message: format!("Persistence failure: {err}"),
        },
    }
}

/// Translates a payment gateway error into an API error.
#[must_use]
pub fn translate_gateway_error(err: GatewayError) -> ApiError {
    ApiError::ExternalFailure {
        message: err.to_string(),
    }
}
