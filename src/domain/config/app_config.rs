//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::permission::DeniedPolicy;
use crate::domain::time::Duration;

/// Default application name reported to the notification server
pub const DEFAULT_APP_NAME: &str = "notification-facade";

/// Default notifier backend
pub const DEFAULT_BACKEND: &str = "desktop";

/// Default log level when neither RUST_LOG nor -v is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: Option<String>,
    pub backend: Option<String>,
    pub icon: Option<String>,
    pub timeout: Option<String>,
    pub denied_policy: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            backend: Some(DEFAULT_BACKEND.to_string()),
            icon: None,
            timeout: None,
            denied_policy: Some(DeniedPolicy::default().to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            backend: other.backend.or(self.backend),
            icon: other.icon.or(self.icon),
            timeout: other.timeout.or(self.timeout),
            denied_policy: other.denied_policy.or(self.denied_policy),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get app name, or the crate default if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get backend name, or "desktop" if not set
    pub fn backend_or_default(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Get the auto-close delay; unset or invalid means no auto-close
    pub fn timeout_or_default(&self) -> Option<Duration> {
        self.timeout.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get denied policy, or the default if not set/invalid
    pub fn denied_policy_or_default(&self) -> DeniedPolicy {
        self.denied_policy
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get log level, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
