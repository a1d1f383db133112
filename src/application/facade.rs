//! Notification facade use case
//!
//! Stateless operations over one injected [`PlatformNotifier`]: support and
//! permission queries, the permission prompt, building a notification, and
//! the fire-and-forget combination of all three.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::notification::NotificationRequest;
use crate::domain::permission::{DeniedPolicy, PermissionStatus};
use crate::domain::time::Duration;

use super::pending::{PendingNotification, PendingPermission};
use super::ports::{NotificationError, NotificationHandle, PlatformNotifier};

/// Result of [`NotificationFacade::fire`]
#[derive(Debug)]
pub enum FireOutcome {
    /// The host has no notification capability; nothing happened
    Unsupported,
    /// Permission was granted and the notification is on screen
    Shown(NotificationHandle),
    /// The user is being asked; the notification follows if they grant it
    Pending(PendingNotification),
    /// Permission is denied and the policy says not to ask again
    Suppressed,
    /// Permission was granted but the host failed to display it
    Failed,
}

impl FireOutcome {
    /// The handle, when the notification was shown synchronously
    pub fn handle(&self) -> Option<&NotificationHandle> {
        match self {
            FireOutcome::Shown(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FireOutcome::Pending(_))
    }
}

/// Facade over the host's notification capability
pub struct NotificationFacade<N>
where
    N: PlatformNotifier,
{
    notifier: Arc<N>,
    denied_policy: DeniedPolicy,
}

impl<N> NotificationFacade<N>
where
    N: PlatformNotifier + 'static,
{
    /// Create a facade over the given notifier
    pub fn new(notifier: N) -> Self {
        Self {
            notifier: Arc::new(notifier),
            denied_policy: DeniedPolicy::default(),
        }
    }

    /// Choose what `fire` does when permission is denied
    pub fn with_denied_policy(mut self, policy: DeniedPolicy) -> Self {
        self.denied_policy = policy;
        self
    }

    pub fn denied_policy(&self) -> DeniedPolicy {
        self.denied_policy
    }

    /// The injected notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Whether the host exposes a notification capability
    pub fn are_supported(&self) -> bool {
        self.notifier.is_supported()
    }

    /// Current permission, read from the host on every call.
    ///
    /// `Default` when unsupported or when the host reports anything
    /// unrecognized.
    pub fn current_permission(&self) -> PermissionStatus {
        if !self.are_supported() {
            return PermissionStatus::Default;
        }
        PermissionStatus::translate(self.notifier.permission().as_deref())
    }

    /// Ask the host to prompt the user for permission.
    ///
    /// Only effective when called from a user-initiated action on hosts that
    /// enforce it; this is not checked. Returns `None` when unsupported.
    /// Must be called from within a tokio runtime.
    pub fn ask_for_permission(&self) -> Option<PendingPermission> {
        if !self.are_supported() {
            error!("{}", NotificationError::CapabilityUnavailable);
            return None;
        }

        let notifier = Arc::clone(&self.notifier);
        let task = tokio::spawn(async move { request_permission(notifier.as_ref()).await });
        Some(PendingPermission::new(task))
    }

    /// Display a notification right away, without checking permission.
    ///
    /// If the request carries an auto-close delay, that exact notification
    /// is closed once it elapses. Returns `None` when unsupported or when the
    /// host fails to display it.
    pub async fn create(&self, request: NotificationRequest) -> Option<NotificationHandle> {
        if !self.are_supported() {
            error!("{}", NotificationError::CapabilityUnavailable);
            return None;
        }
        display(self.notifier.as_ref(), &request).await
    }

    /// Show a notification, asking for permission first if needed.
    ///
    /// With permission granted the handle comes back immediately. Otherwise
    /// the prompt runs in the background and the returned
    /// [`PendingNotification`] settles once the user has answered.
    pub async fn fire(&self, request: NotificationRequest) -> FireOutcome {
        if !self.are_supported() {
            debug!(title = %request.title, "notifications unsupported, skipping");
            return FireOutcome::Unsupported;
        }

        match (self.current_permission(), self.denied_policy) {
            (PermissionStatus::Granted, _) => {
                match display(self.notifier.as_ref(), &request).await {
                    Some(handle) => FireOutcome::Shown(handle),
                    None => FireOutcome::Failed,
                }
            }
            (PermissionStatus::Denied, DeniedPolicy::Skip) => {
                info!(title = %request.title, "permission denied, not asking again");
                FireOutcome::Suppressed
            }
            (status @ PermissionStatus::Denied, DeniedPolicy::Reask)
            | (status @ PermissionStatus::Default, _) => {
                debug!(%status, title = %request.title, "requesting permission before showing");
                let notifier = Arc::clone(&self.notifier);
                let task = tokio::spawn(async move {
                    match request_permission(notifier.as_ref()).await {
                        PermissionStatus::Granted => display(notifier.as_ref(), &request).await,
                        status => {
                            info!(%status, title = %request.title, "permission not granted, dropping notification");
                            None
                        }
                    }
                });
                FireOutcome::Pending(PendingNotification::new(task))
            }
        }
    }
}

/// Prompt and translate the answer; failures count as undecided
async fn request_permission<N>(notifier: &N) -> PermissionStatus
where
    N: PlatformNotifier + ?Sized,
{
    match notifier.request_permission().await {
        Ok(raw) => {
            let status = PermissionStatus::translate(Some(&raw));
            debug!(%status, "permission request resolved");
            status
        }
        Err(e) => {
            warn!(error = %e, "permission request failed");
            PermissionStatus::Default
        }
    }
}

async fn display<N>(notifier: &N, request: &NotificationRequest) -> Option<NotificationHandle>
where
    N: PlatformNotifier + ?Sized,
{
    let options = request.options();
    match notifier.show(&request.title, &options).await {
        Ok(handle) => {
            debug!(id = handle.id(), title = %request.title, "notification shown");
            if let Some(after) = request.auto_close {
                schedule_close(handle.clone(), after);
            }
            Some(handle)
        }
        Err(e) => {
            warn!(error = %e, title = %request.title, "failed to show notification");
            None
        }
    }
}

/// Close `handle` once `after` has elapsed, whether or not it is still open
fn schedule_close(handle: NotificationHandle, after: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(after.as_std()).await;
        debug!(id = handle.id(), "auto-closing notification");
        handle.close();
    });
}
