//! Adapter for hosts without a notification capability

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationHandle, PlatformNotifier};
use crate::domain::notification::NotificationOptions;

/// Notifier that reports no capability
///
/// Used when notifications are disabled or no notification server exists.
pub struct UnsupportedNotifier;

impl UnsupportedNotifier {
    /// Create a new unsupported notifier
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnsupportedNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformNotifier for UnsupportedNotifier {
    fn is_supported(&self) -> bool {
        false
    }

    fn permission(&self) -> Option<String> {
        None
    }

    async fn request_permission(&self) -> Result<String, NotificationError> {
        Err(NotificationError::CapabilityUnavailable)
    }

    async fn show(
        &self,
        _title: &str,
        _options: &NotificationOptions,
    ) -> Result<NotificationHandle, NotificationError> {
        Err(NotificationError::CapabilityUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_no_capability() {
        let notifier = UnsupportedNotifier::new();
        assert!(!notifier.is_supported());
        assert!(notifier.permission().is_none());
        assert!(matches!(
            notifier.request_permission().await,
            Err(NotificationError::CapabilityUnavailable)
        ));

        let options = NotificationOptions {
            body: "M".to_string(),
            icon: None,
            tag: None,
        };
        assert!(notifier.show("T", &options).await.is_err());
    }
}
