//! User feedback raised when a remote operation settles.
//!
//! Presentation of notifications (toasts, dialogs) lives outside this crate; the
//! domain only emits them through [`NotificationSink`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::{Notification, NotificationKind, ProfilePayload};
use tracing::{info, warn};

use crate::storage::SyncError;

pub const CREATED_TITLE: &str = "You submitted the following values:";
pub const DELETED_TITLE: &str = "Deleted !";
pub const SUCCESS_DESCRIPTION: &str = "Action completed!";
pub const FAILURE_DESCRIPTION: &str = "Action failed!";

/// Receives notifications for the user
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Success notification for a created profile, showing the submitted values
pub fn profile_created(payload: &ProfilePayload) -> Notification {
    let description = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| format!("{:?}", payload));
    Notification::success(CREATED_TITLE, description)
}

pub fn profile_deleted() -> Notification {
    Notification::success(DELETED_TITLE, SUCCESS_DESCRIPTION)
}

/// Failure notification carrying the underlying error's message
pub fn sync_failed(error: &SyncError) -> Notification {
    Notification::failure(error.to_string(), FAILURE_DESCRIPTION)
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!("✅ {} {}", notification.title, notification.description)
            }
            NotificationKind::Failure => {
                warn!("❌ {} {}", notification.title, notification.description)
            }
        }
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
