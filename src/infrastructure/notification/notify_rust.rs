//! Cross-platform notification adapter using notify-rust
//!
//! Works on Windows, macOS, and freedesktop servers (Linux/BSD). Only
//! freedesktop servers can retract or replace a notification; elsewhere
//! closing is a no-op and tags are not coalesced.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{
    DisplayedNotification, NotificationError, NotificationHandle, PlatformNotifier,
};
use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::notification::NotificationOptions;
use crate::domain::permission::PermissionStatus;

type TagMap = Arc<Mutex<HashMap<String, u32>>>;

/// Cross-platform notifier using notify-rust
///
/// Desktop notification servers have no permission model, so permission is
/// always reported as granted.
pub struct NotifyRustNotifier {
    /// Application name for notifications
    app_name: String,
    supported: OnceLock<bool>,
    /// Id of the open notification for each tag
    tags: TagMap,
}

impl NotifyRustNotifier {
    /// Create a new notify-rust notifier
    pub fn new() -> Self {
        Self::with_app_name(DEFAULT_APP_NAME)
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            supported: OnceLock::new(),
            tags: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Look for a notification server on a blocking thread.
    ///
    /// The answer is cached, so `is_supported` never blocks afterwards.
    pub async fn probe(&self) -> bool {
        self.probe_with(probe_server).await
    }

    async fn probe_with(&self, probe: fn() -> bool) -> bool {
        if let Some(supported) = self.supported.get() {
            return *supported;
        }

        let found = tokio::task::spawn_blocking(probe)
            .await
            .unwrap_or_else(|e| {
                debug!(error = %e, "server probe did not complete");
                false
            });
        *self.supported.get_or_init(|| found)
    }

    fn tagged_id(&self, tag: &str) -> Option<u32> {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .copied()
    }

    fn remember_tag(&self, tag: &str, id: u32) {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tag.to_string(), id);
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformNotifier for NotifyRustNotifier {
    /// Cached result of [`NotifyRustNotifier::probe`]. Without an earlier
    /// probe the first call blocks on a D-Bus round trip.
    fn is_supported(&self) -> bool {
        *self.supported.get_or_init(probe_server)
    }

    fn permission(&self) -> Option<String> {
        Some(PermissionStatus::Granted.as_str().to_string())
    }

    async fn request_permission(&self) -> Result<String, NotificationError> {
        Ok(PermissionStatus::Granted.as_str().to_string())
    }

    async fn show(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<NotificationHandle, NotificationError> {
        let tag = options.tag.clone();
        let replaces = tag.as_deref().and_then(|t| self.tagged_id(t));
        let title = title.to_owned();
        let options = options.clone();
        let app_name = self.app_name.clone();

        // notify-rust operations can block, so run in spawn_blocking
        let handle = tokio::task::spawn_blocking(move || {
            present(&app_name, &title, &options, replaces)
        })
        .await
        .map_err(|e| NotificationError::ShowFailed(format!("Task join error: {}", e)))??;

        let Some(tag) = tag else {
            return Ok(handle);
        };
        self.remember_tag(&tag, handle.id());
        Ok(NotificationHandle::new(TaggedNotification {
            inner: handle,
            tag,
            tags: Arc::clone(&self.tags),
        }))
    }
}

/// A tagged notification that releases its tag when closed
struct TaggedNotification {
    inner: NotificationHandle,
    tag: String,
    tags: TagMap,
}

impl DisplayedNotification for TaggedNotification {
    fn id(&self) -> u32 {
        self.inner.id()
    }

    fn close(&self) {
        self.inner.close();

        let mut tags = self.tags.lock().unwrap_or_else(PoisonError::into_inner);
        // A later notification may have taken the tag over with a new id
        if tags.get(&self.tag) == Some(&self.inner.id()) {
            tags.remove(&self.tag);
        }
    }
}

fn build(app_name: &str, title: &str, options: &NotificationOptions) -> notify_rust::Notification {
    let mut notification = notify_rust::Notification::new();
    notification.appname(app_name).summary(title).body(&options.body);
    if let Some(icon) = &options.icon {
        notification.icon(icon);
    }
    if let Some(tag) = &options.tag {
        add_tag_hints(&mut notification, tag);
    }
    notification
}

#[cfg(all(unix, not(target_os = "macos")))]
mod platform {
    use notify_rust::Hint;

    use super::*;

    /// Hints that let servers stack notifications sharing a tag across processes
    pub(super) const TAG_HINTS: [&str; 2] = ["x-dunst-stack-tag", "x-canonical-private-synchronous"];

    pub(super) fn add_tag_hints(notification: &mut notify_rust::Notification, tag: &str) {
        for name in TAG_HINTS {
            notification.hint(Hint::Custom(name.to_string(), tag.to_string()));
        }
    }

    /// Notification on a freedesktop server, closable over D-Bus
    pub(super) struct DesktopNotification {
        id: u32,
        handle: Mutex<Option<notify_rust::NotificationHandle>>,
    }

    impl DisplayedNotification for DesktopNotification {
        fn id(&self) -> u32 {
            self.id
        }

        fn close(&self) {
            let handle = self
                .handle
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(handle) = handle {
                handle.close();
            }
        }
    }

    pub(super) fn present(
        app_name: &str,
        title: &str,
        options: &NotificationOptions,
        replaces: Option<u32>,
    ) -> Result<NotificationHandle, NotificationError> {
        let mut notification = build(app_name, title, options);
        if let Some(id) = replaces {
            notification.id(id);
        }
        let handle = notification
            .show()
            .map_err(|e| NotificationError::ShowFailed(e.to_string()))?;

        Ok(NotificationHandle::new(DesktopNotification {
            id: handle.id(),
            handle: Mutex::new(Some(handle)),
        }))
    }

    pub(super) fn probe_server() -> bool {
        match notify_rust::get_server_information() {
            Ok(info) => {
                debug!(server = %info.name, vendor = %info.vendor, version = %info.version, "notification server found");
                true
            }
            Err(e) => {
                debug!(error = %e, "no notification server");
                false
            }
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
mod platform {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    static NEXT_ID: AtomicU32 = AtomicU32::new(1);

    pub(super) fn add_tag_hints(_notification: &mut notify_rust::Notification, _tag: &str) {}

    /// Notification that cannot be retracted once shown
    pub(super) struct DesktopNotification {
        id: u32,
    }

    impl DisplayedNotification for DesktopNotification {
        fn id(&self) -> u32 {
            self.id
        }

        fn close(&self) {
            debug!(id = self.id, "closing is not supported on this platform");
        }
    }

    pub(super) fn present(
        app_name: &str,
        title: &str,
        options: &NotificationOptions,
        _replaces: Option<u32>,
    ) -> Result<NotificationHandle, NotificationError> {
        build(app_name, title, options)
            .show()
            .map_err(|e| NotificationError::ShowFailed(e.to_string()))?;

        Ok(NotificationHandle::new(DesktopNotification {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }))
    }

    pub(super) fn probe_server() -> bool {
        true
    }
}

use platform::{add_tag_hints, present, probe_server};
