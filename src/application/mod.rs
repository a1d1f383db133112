//! Application layer - Use cases and port interfaces
//!
//! Contains the notification facade and the trait definitions
//! for the host capability and configuration storage.

pub mod facade;
pub mod pending;
pub mod ports;

// Re-export use cases
pub use facade::{FireOutcome, NotificationFacade};
pub use pending::{PendingNotification, PendingPermission};
