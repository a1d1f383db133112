//! Notification request value object

use serde::Serialize;

use crate::domain::time::Duration;

/// Display options presented to the host.
///
/// Only keys the caller actually supplied are serialized, so the host keeps
/// its own defaults for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOptions {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Parameters for a single notification.
/// Built per call and consumed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Notification title (required)
    pub title: String,
    /// Notification body (required)
    pub message: String,
    /// Icon name, path or URL
    pub icon: Option<String>,
    /// Tag letting the host replace earlier notifications with the same tag
    pub tag: Option<String>,
    /// Close the notification automatically after this delay
    pub auto_close: Option<Duration>,
}

impl NotificationRequest {
    /// Create a request with only the mandatory title and message
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            icon: None,
            tag: None,
            auto_close: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_auto_close(mut self, after: Duration) -> Self {
        self.auto_close = Some(after);
        self
    }

    /// Set the auto-close delay in milliseconds; zero leaves it unset.
    pub fn with_auto_close_ms(mut self, ms: u64) -> Self {
        self.auto_close = Duration::from_millis(ms);
        self
    }

    /// Build the options handed to the host.
    ///
    /// Empty icon or tag strings count as not supplied.
    pub fn options(&self) -> NotificationOptions {
        NotificationOptions {
            body: self.message.clone(),
            icon: non_empty(self.icon.as_deref()),
            tag: non_empty(self.tag.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_keys(options: &NotificationOptions) -> Vec<String> {
        let value = serde_json::to_value(options).unwrap();
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn options_contain_only_body_when_nothing_optional_given() {
        let options = NotificationRequest::new("T", "M").options();
        assert_eq!(options.body, "M");
        assert_eq!(option_keys(&options), vec!["body"]);
    }

    #[test]
    fn options_include_supplied_icon_and_tag() {
        let options = NotificationRequest::new("T", "M")
            .with_icon("dialog-information")
            .with_tag("disk")
            .options();
        assert_eq!(option_keys(&options), vec!["body", "icon", "tag"]);
        assert_eq!(options.icon.as_deref(), Some("dialog-information"));
        assert_eq!(options.tag.as_deref(), Some("disk"));
    }

    #[test]
    fn empty_icon_and_tag_are_omitted() {
        let options = NotificationRequest::new("T", "M")
            .with_icon("")
            .with_tag("")
            .options();
        assert!(options.icon.is_none());
        assert!(options.tag.is_none());
        assert_eq!(option_keys(&options), vec!["body"]);
    }

    #[test]
    fn zero_auto_close_is_unset() {
        let request = NotificationRequest::new("T", "M").with_auto_close_ms(0);
        assert!(request.auto_close.is_none());

        let request = NotificationRequest::new("T", "M").with_auto_close_ms(500);
        assert_eq!(request.auto_close.map(|d| d.as_millis()), Some(500));
    }
}
