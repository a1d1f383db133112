//! In-process notifier with a scriptable permission prompt
//!
//! Stands in for a real host in headless environments and tests: every
//! notification is recorded instead of displayed, and permission prompts stay
//! open until an answer is supplied.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::application::ports::{
    DisplayedNotification, NotificationError, NotificationHandle, PlatformNotifier,
};
use crate::domain::notification::NotificationOptions;
use crate::domain::permission::PermissionStatus;

/// A notification captured by [`MemoryNotifier`]
#[derive(Debug, Clone)]
pub struct RecordedNotification {
    pub id: u32,
    pub title: String,
    /// Options exactly as presented to the host
    pub options: NotificationOptions,
    closed: Arc<AtomicBool>,
    close_calls: Arc<AtomicUsize>,
}

impl RecordedNotification {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// How many times close was requested, including repeats
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

struct MemoryNotification {
    id: u32,
    closed: Arc<AtomicBool>,
    close_calls: Arc<AtomicUsize>,
}

impl DisplayedNotification for MemoryNotification {
    fn id(&self) -> u32 {
        self.id
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Notifier that records instead of displaying
pub struct MemoryNotifier {
    supported: bool,
    fail_show: AtomicBool,
    permission: Mutex<Option<String>>,
    /// Answer given to prompts; `None` keeps them waiting
    answer: watch::Sender<Option<PermissionStatus>>,
    prompts: AtomicUsize,
    next_id: AtomicU32,
    shown: Mutex<Vec<RecordedNotification>>,
}

impl MemoryNotifier {
    /// Supported notifier with no permission decision and unanswered prompts
    pub fn new() -> Self {
        let (answer, _) = watch::channel(None);
        Self {
            supported: true,
            fail_show: AtomicBool::new(false),
            permission: Mutex::new(None),
            answer,
            prompts: AtomicUsize::new(0),
            next_id: AtomicU32::new(1),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Supported notifier reporting the given raw permission value
    pub fn with_permission(raw: impl Into<String>) -> Self {
        let raw: String = raw.into();
        let notifier = Self::new();
        notifier.set_permission(Some(&raw));
        notifier
    }

    /// Notifier for a host without the capability
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Replace the raw permission value the host reports
    pub fn set_permission(&self, raw: Option<&str>) {
        *self
            .permission
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = raw.map(str::to_string);
    }

    /// Answer every open and future prompt with `status`
    pub fn answer_prompts_with(&self, status: PermissionStatus) {
        self.answer.send_replace(Some(status));
    }

    /// Make `show` fail until turned off again
    pub fn fail_show(&self, fail: bool) {
        self.fail_show.store(fail, Ordering::SeqCst);
    }

    /// Number of permission prompts requested so far
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// Every notification shown so far, oldest first
    pub fn notifications(&self) -> Vec<RecordedNotification> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformNotifier for MemoryNotifier {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> Option<String> {
        self.permission
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn request_permission(&self) -> Result<String, NotificationError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        debug!("memory notifier prompting for permission");

        let mut answers = self.answer.subscribe();
        let status = answers
            .wait_for(Option::is_some)
            .await
            .map(|answer| (*answer).unwrap_or_default())
            .map_err(|e| NotificationError::PermissionRequestFailed(e.to_string()))?;

        self.set_permission(Some(status.as_str()));
        Ok(status.as_str().to_string())
    }

    async fn show(
        &self,
        title: &str,
        options: &NotificationOptions,
    ) -> Result<NotificationHandle, NotificationError> {
        if self.fail_show.load(Ordering::SeqCst) {
            return Err(NotificationError::ShowFailed(
                "memory notifier set to fail".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let closed = Arc::new(AtomicBool::new(false));
        let close_calls = Arc::new(AtomicUsize::new(0));

        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedNotification {
                id,
                title: title.to_string(),
                options: options.clone(),
                closed: Arc::clone(&closed),
                close_calls: Arc::clone(&close_calls),
            });

        Ok(NotificationHandle::new(MemoryNotification {
            id,
            closed,
            close_calls,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(body: &str) -> NotificationOptions {
        NotificationOptions {
            body: body.to_string(),
            icon: None,
            tag: None,
        }
    }

    #[test]
    fn new_has_no_permission_decision() {
        let notifier = MemoryNotifier::new();
        assert!(notifier.is_supported());
        assert!(notifier.permission().is_none());
        assert_eq!(notifier.prompt_count(), 0);
    }

    #[test]
    fn with_permission_reports_raw_value() {
        let notifier = MemoryNotifier::with_permission("weird");
        assert_eq!(notifier.permission().as_deref(), Some("weird"));
    }

    #[tokio::test]
    async fn prompt_waits_for_answer() {
        let notifier = Arc::new(MemoryNotifier::new());
        let prompting = Arc::clone(&notifier);
        let task = tokio::spawn(async move { prompting.request_permission().await });

        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        notifier.answer_prompts_with(PermissionStatus::Granted);
        assert_eq!(task.await.unwrap().unwrap(), "granted");
        assert_eq!(notifier.permission().as_deref(), Some("granted"));
        assert_eq!(notifier.prompt_count(), 1);
    }

    #[tokio::test]
    async fn preset_answer_resolves_immediately() {
        let notifier = MemoryNotifier::new();
        notifier.answer_prompts_with(PermissionStatus::Denied);
        assert_eq!(notifier.request_permission().await.unwrap(), "denied");
    }

    #[tokio::test]
    async fn show_records_and_close_is_idempotent() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.show("T", &options("M")).await.unwrap();

        handle.close();
        handle.close();

        let recorded = notifier.notifications();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].title, "T");
        assert_eq!(recorded[0].id, handle.id());
        assert!(recorded[0].is_closed());
        assert_eq!(recorded[0].close_calls(), 2);
    }

    #[tokio::test]
    async fn fail_show_returns_error() {
        let notifier = MemoryNotifier::new();
        notifier.fail_show(true);
        assert!(matches!(
            notifier.show("T", &options("M")).await,
            Err(NotificationError::ShowFailed(_))
        ));
        assert!(notifier.notifications().is_empty());
    }
}
