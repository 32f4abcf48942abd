// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors reported by a payment gateway.
///
/// Gateway failures are external failures: the workflow layer surfaces
/// them without committing any local state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The gateway could not be reached or returned a transport error.
    #[error("payment gateway request failed: {0}")]
    RequestFailed(String),
    /// The gateway understood the request but refused it.
    #[error("payment gateway rejected the operation: {0}")]
    Rejected(String),
    /// The referenced gateway object does not exist.
    #[error("unknown gateway reference: {0}")]
    UnknownReference(String),
}
