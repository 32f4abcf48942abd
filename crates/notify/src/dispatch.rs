// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Presence-based notification routing.

use std::sync::Arc;
use tracing::warn;

use tasklink_domain::UserId;

use crate::broadcast::{Notification, NotificationBroadcaster};
use crate::presence::PresenceDirectory;
use crate::push::PushSender;

/// Routes notifications to the realtime channel or push delivery.
///
/// The dispatcher is constructed once at startup and handed to the
/// workflow layer; nothing reaches for a global. Dispatch never fails:
/// push errors are logged and swallowed so a notification problem can
/// never fail the operation that produced it.
#[derive(Clone)]
pub struct Dispatcher {
    presence: Arc<PresenceDirectory>,
    broadcaster: NotificationBroadcaster,
    push: Arc<dyn PushSender>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given presence directory, realtime
    /// broadcaster, and push backend.
    #[must_use]
    pub fn new(
        presence: Arc<PresenceDirectory>,
        broadcaster: NotificationBroadcaster,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            presence,
            broadcaster,
            push,
        }
    }

    /// Delivers one notification, choosing the channel by presence: the
    /// realtime stream if the recipient is connected, push otherwise.
    pub fn notify(&self, recipient: UserId, message: &str) {
        if self.presence.is_online(recipient) {
            self.broadcaster.publish(&Notification {
                recipient,
                message: message.to_string(),
            });
            return;
        }

        if let Err(e) = self.push.send(recipient, message) {
            warn!(
                recipient = recipient.value(),
                error = %e,
                "Push delivery failed, dropping notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::PushError;
    use std::sync::Mutex;

    /// Push sender that records what it was asked to deliver.
    struct RecordingPush {
        sent: Mutex<Vec<(i64, String)>>,
        fail: bool,
    }

    impl RecordingPush {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl PushSender for RecordingPush {
        fn send(&self, recipient: UserId, message: &str) -> Result<(), PushError> {
            if self.fail {
                return Err(PushError::DeliveryFailed(String::from("device gone")));
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient.value(), message.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_online_user_gets_realtime_delivery() {
        let presence = Arc::new(PresenceDirectory::new());
        let broadcaster = NotificationBroadcaster::new();
        let push = Arc::new(RecordingPush::new(false));
        let dispatcher = Dispatcher::new(Arc::clone(&presence), broadcaster.clone(), push.clone());

        presence.connect(UserId::new(7));
        let mut rx = broadcaster.subscribe();

        dispatcher.notify(UserId::new(7), "You have a new booking request");

        assert_eq!(
            rx.try_recv(),
            Ok(Notification {
                recipient: UserId::new(7),
                message: String::from("You have a new booking request"),
            })
        );
        assert!(push.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_offline_user_gets_push_delivery() {
        let presence = Arc::new(PresenceDirectory::new());
        let broadcaster = NotificationBroadcaster::new();
        let push = Arc::new(RecordingPush::new(false));
        let dispatcher = Dispatcher::new(presence, broadcaster, push.clone());

        dispatcher.notify(UserId::new(7), "The booking was cancelled by the customer");

        assert_eq!(
            push.sent.lock().unwrap().as_slice(),
            &[(
                7,
                String::from("The booking was cancelled by the customer")
            )]
        );
    }

    #[test]
    fn test_push_failure_is_swallowed() {
        let presence = Arc::new(PresenceDirectory::new());
        let broadcaster = NotificationBroadcaster::new();
        let push = Arc::new(RecordingPush::new(true));
        let dispatcher = Dispatcher::new(presence, broadcaster, push);

        // Must not panic or propagate.
        dispatcher.notify(UserId::new(7), "Your booking request has been accepted");
    }
}
