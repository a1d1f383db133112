//! Asynchronous results of permission prompts

use tokio::task::JoinHandle;
use tracing::warn;

use crate::domain::permission::PermissionStatus;

use super::ports::NotificationHandle;

/// A permission prompt that has not been answered yet.
///
/// Dropping it does not cancel the prompt.
#[derive(Debug)]
pub struct PendingPermission {
    task: JoinHandle<PermissionStatus>,
}

impl PendingPermission {
    pub(crate) fn new(task: JoinHandle<PermissionStatus>) -> Self {
        Self { task }
    }

    /// Whether the user has answered
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the user's decision
    pub async fn wait(self) -> PermissionStatus {
        match self.task.await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "permission request task did not complete");
                PermissionStatus::Default
            }
        }
    }
}

/// A notification waiting on a permission prompt.
///
/// Resolves to the displayed handle if the user grants permission, or `None`
/// otherwise. Dropping it lets the notification go ahead on its own.
#[derive(Debug)]
pub struct PendingNotification {
    task: JoinHandle<Option<NotificationHandle>>,
    settled: Option<Option<NotificationHandle>>,
}

impl PendingNotification {
    pub(crate) fn new(task: JoinHandle<Option<NotificationHandle>>) -> Self {
        Self {
            task,
            settled: None,
        }
    }

    /// Whether the prompt has been answered and the display step has run
    pub fn is_finished(&self) -> bool {
        self.settled.is_some() || self.task.is_finished()
    }

    /// Abandon the notification.
    ///
    /// Has no effect once it has already been displayed.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Wait for the prompt and the display step.
    ///
    /// Safe to call again, and safe to drop mid-wait: the pending work keeps
    /// running until it settles or is cancelled.
    pub async fn wait(&mut self) -> Option<NotificationHandle> {
        if let Some(handle) = &self.settled {
            return handle.clone();
        }

        let handle = match (&mut self.task).await {
            Ok(handle) => handle,
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                warn!(error = %e, "deferred notification task did not complete");
                None
            }
        };
        self.settled = Some(handle.clone());
        handle
    }
}
