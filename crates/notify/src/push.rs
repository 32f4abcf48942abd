// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Push delivery for users without a live connection.

use thiserror::Error;
use tracing::info;

use tasklink_domain::UserId;

/// Errors reported by a push delivery backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// The push service could not be reached or refused the message.
    #[error("push delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Delivers a notification to a user's registered devices.
///
/// Implementations wrap an external push service. Delivery is best-effort;
/// the dispatcher logs and swallows errors.
pub trait PushSender: Send + Sync {
    /// Sends a push notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be handed to the push
    /// service.
    fn send(&self, recipient: UserId, message: &str) -> Result<(), PushError>;
}

/// A push sender that only logs.
///
/// Used in development and tests, and as the default until a real push
/// backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPushSender;

impl PushSender for LoggingPushSender {
    fn send(&self, recipient: UserId, message: &str) -> Result<(), PushError> {
        info!(recipient = recipient.value(), message, "Push notification");
        Ok(())
    }
}
