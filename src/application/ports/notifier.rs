//! Platform notifier port interface

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::NotificationOptions;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Notifications are not supported on this platform")]
    CapabilityUnavailable,

    #[error("Failed to show notification: {0}")]
    ShowFailed(String),

    #[error("Permission request failed: {0}")]
    PermissionRequestFailed(String),
}

/// A notification the host is currently displaying.
pub trait DisplayedNotification: Send + Sync {
    /// Host-assigned identifier
    fn id(&self) -> u32;

    /// Retract the notification.
    ///
    /// Must be a no-op when it is already closed.
    fn close(&self);
}

/// Cloneable reference to a displayed notification.
///
/// The host owns the notification; dropping the handle does not close it.
#[derive(Clone)]
pub struct NotificationHandle {
    inner: Arc<dyn DisplayedNotification>,
}

impl NotificationHandle {
    pub fn new(inner: impl DisplayedNotification + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn id(&self) -> u32 {
        self.inner.id()
    }

    pub fn close(&self) {
        self.inner.close();
    }
}

impl fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHandle")
            .field("id", &self.id())
            .finish()
    }
}

/// Port for the host's notification capability
#[async_trait]
pub trait PlatformNotifier: Send + Sync {
    /// Whether the host exposes a notification capability at all.
    fn is_supported(&self) -> bool;

    /// The host's raw permission value (`"default"`, `"denied"`,
    /// `"granted"`), or `None` when it reports nothing.
    fn permission(&self) -> Option<String>;

    /// Ask the host to prompt the user.
    ///
    /// Resolves with the raw permission value once the user has decided.
    /// Hosts that gate prompting on user activation ignore calls made
    /// outside a user-initiated action.
    async fn request_permission(&self) -> Result<String, NotificationError>;

    /// Display a notification immediately.
    ///
    /// # Arguments
    /// * `title` - The notification title
    /// * `options` - Body plus whichever optional keys were supplied
    async fn show(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<NotificationHandle, NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl PlatformNotifier for Box<dyn PlatformNotifier> {
    fn is_supported(&self) -> bool {
        self.as_ref().is_supported()
    }

    fn permission(&self) -> Option<String> {
        self.as_ref().permission()
    }

    async fn request_permission(&self) -> Result<String, NotificationError> {
        self.as_ref().request_permission().await
    }

    async fn show(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<NotificationHandle, NotificationError> {
        self.as_ref().show(title, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotification {
        closes: Arc<AtomicUsize>,
    }

    impl DisplayedNotification for CountingNotification {
        fn id(&self) -> u32 {
            7
        }

        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn handle_clones_share_the_notification() {
        let closes = Arc::new(AtomicUsize::new(0));
        let handle = NotificationHandle::new(CountingNotification {
            closes: Arc::clone(&closes),
        });
        let copy = handle.clone();

        copy.close();
        handle.close();

        assert_eq!(handle.id(), 7);
        assert_eq!(closes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handle_debug_shows_id() {
        let handle = NotificationHandle::new(CountingNotification {
            closes: Arc::new(AtomicUsize::new(0)),
        });
        assert_eq!(format!("{:?}", handle), "NotificationHandle { id: 7 }");
    }
}
