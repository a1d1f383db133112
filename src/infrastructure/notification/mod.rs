//! Notification infrastructure module
//!
//! Provides desktop notification support using notify-rust, a disabled
//! backend for hosts without a notification server, and an in-memory notifier
//! for headless use.

mod memory;
mod notify_rust;
mod unsupported;

use std::fmt;
use std::str::FromStr;

pub use memory::{MemoryNotifier, RecordedNotification};
pub use notify_rust::NotifyRustNotifier;
pub use unsupported::UnsupportedNotifier;

use crate::application::ports::PlatformNotifier;

/// Available notifier backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifierBackend {
    /// Native desktop notifications via notify-rust
    #[default]
    Desktop,
    /// No notification capability
    None,
}

impl fmt::Display for NotifierBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierBackend::Desktop => write!(f, "desktop"),
            NotifierBackend::None => write!(f, "none"),
        }
    }
}

/// Error type for parsing a notifier backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBackendError {
    pub value: String,
}

impl fmt::Display for ParseBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid backend '{}'. Valid options: {}",
            self.value,
            VALID_BACKENDS.join(", ")
        )
    }
}

impl std::error::Error for ParseBackendError {}

/// Valid backend names
pub const VALID_BACKENDS: &[&str] = &["desktop", "none"];

impl FromStr for NotifierBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(NotifierBackend::Desktop),
            "none" => Ok(NotifierBackend::None),
            _ => Err(ParseBackendError {
                value: s.to_string(),
            }),
        }
    }
}

/// Create the notifier for the chosen backend.
///
/// The desktop server is probed here, off the runtime threads.
pub async fn create_notifier(backend: NotifierBackend, app_name: &str) -> Box<dyn PlatformNotifier> {
    match backend {
        NotifierBackend::Desktop => {
            let notifier = NotifyRustNotifier::with_app_name(app_name);
            notifier.probe().await;
            Box::new(notifier)
        }
        NotifierBackend::None => Box::new(UnsupportedNotifier::new()),
    }
}
