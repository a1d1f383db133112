//! Notification domain module

mod request;

pub use request::{NotificationOptions, NotificationRequest};
