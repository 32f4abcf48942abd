// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Presence tracking and notification dispatch for TaskLink.
//!
//! Notifications are best-effort: a failed delivery is logged and
//! swallowed, never surfaced to the operation that produced it. Routing
//! is presence-based: users with a live connection get the message over
//! the realtime channel, everyone else gets a push notification.

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

mod broadcast;
mod dispatch;
mod presence;
mod push;

pub use broadcast::{Notification, NotificationBroadcaster};
pub use dispatch::Dispatcher;
pub use presence::PresenceDirectory;
pub use push::{LoggingPushSender, PushError, PushSender};
