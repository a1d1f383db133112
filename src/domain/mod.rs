//! Domain layer - Core value objects and errors
//!
//! Contains the permission status and its translation, notification
//! requests, configuration and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;
pub mod permission;
pub mod time;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notification::{NotificationOptions, NotificationRequest};
pub use permission::{DeniedPolicy, PermissionStatus};
pub use time::Duration;
