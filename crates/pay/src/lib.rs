// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment gateway contract for TaskLink.
//!
//! The workflow layer never talks to a payment provider directly; it goes
//! through the [`PaymentGateway`] trait. Production wires in a real
//! provider adapter, tests and the sandbox use [`FakeGateway`].

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
mod fake;
mod gateway;

pub use error::GatewayError;
pub use fake::FakeGateway;
pub use gateway::{CheckoutSession, ConfirmedSession, PaymentGateway, PayoutOnboarding};
