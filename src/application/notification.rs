//! Single-slot ephemeral notification with auto-expiry.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Visibility window of a notification unless cleared earlier.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// The live notification and the token of its expiry timer.
struct Live {
    id: u64,
    notification: Notification,
    expiry: CancellationToken,
}

#[derive(Default)]
struct Slot {
    current: Option<Live>,
    next_id: u64,
}

/// Holds at most one notification at a time.
///
/// Every [`set`](Self::set) replaces the previous value (last write wins, no
/// queueing) and starts an expiry timer bound to that specific notification.
/// A timer only ever clears the notification it was started for, so a manual
/// `clear` followed by a new `set` cannot be undone by the old timer.
///
/// Cloning is cheap and every clone shares the same slot.
#[derive(Clone)]
pub struct NotificationChannel {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationChannel {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    /// Publishes `message`, replacing any current notification.
    ///
    /// Must be called from within a Tokio runtime for auto-expiry to work;
    /// outside one the notification stays until cleared.
    pub fn set(&self, message: impl Into<String>, kind: NotificationKind) {
        let expiry = CancellationToken::new();
        let notification = Notification {
            message: message.into(),
            kind,
        };
        debug!(?kind, message = %notification.message, "Notification set");

        let id = {
            let mut slot = self.slot.lock();
            slot.next_id += 1;
            let id = slot.next_id;
            let previous = slot.current.replace(Live {
                id,
                notification,
                expiry: expiry.clone(),
            });
            if let Some(previous) = previous {
                previous.expiry.cancel();
            }
            id
        };

        self.schedule_expiry(id, expiry);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.set(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.set(message, NotificationKind::Error);
    }

    /// Empties the channel and cancels the pending expiry.
    pub fn clear(&self) {
        if let Some(live) = self.slot.lock().current.take() {
            live.expiry.cancel();
        }
    }

    /// Returns the visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.slot
            .lock()
            .current
            .as_ref()
            .map(|live| live.notification.clone())
    }

    fn schedule_expiry(&self, id: u64, expiry: CancellationToken) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No Tokio runtime, notification will not auto-expire");
            return;
        };

        let slot = Arc::downgrade(&self.slot);
        let deadline = Instant::now() + self.ttl;
        handle.spawn(async move {
            tokio::select! {
                _ = expiry.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => expire(&slot, id),
            }
        });
    }
}

/// Clears the slot only if it still holds notification `id`.
fn expire(slot: &Weak<Mutex<Slot>>, id: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let mut slot = slot.lock();
    if slot.current.as_ref().is_some_and(|live| live.id == id) {
        slot.current = None;
        debug!(id, "Notification expired");
    }
}
