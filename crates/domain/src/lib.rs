// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod booking_status;
mod error;
mod fee;
mod money;
mod payment_status;
mod types;
mod validation;

pub use booking_status::BookingStatus;
pub use error::DomainError;
pub use fee::FeePolicy;
pub use money::Money;
pub use payment_status::PaymentStatus;
pub use types::{
    Booking, BookingId, ConfirmationRef, GeoPoint, Party, Role, ServiceId, SessionRef, UserId,
};
pub use validation::{validate_reject_reason, validate_withdrawal};
