// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API layer for TaskLink.
//!
//! This crate orchestrates the booking workflow: it loads records from the
//! ledger store, runs the pure lifecycle engine, executes payment gateway
//! calls, commits transitions, and dispatches notifications. The transport
//! layer above it only decodes requests and encodes responses.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_gateway_error,
    translate_persistence_error,
};
pub use handlers::{
    booking_action, cancel_booking, complete_booking, confirm_payment, create_booking,
    create_service, create_user, get_booking, get_wallet, list_bookings, withdraw,
};
pub use request_response::{
    BookingAction, BookingActionRequest, BookingView, CancelBookingRequest, ConfirmPaymentRequest,
    CreateBookingRequest, CreateBookingResult, CreateServiceRequest, CreateServiceResult,
    CreateUserRequest, CreateUserResult, LedgerEntryView, WalletView, WithdrawRequest,
    WithdrawResult,
};
