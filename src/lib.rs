//! notification-facade - desktop notifications with permission handling
//!
//! This crate wraps a host notification capability behind a small facade:
//! query support and permission, ask the user for permission, and show a
//! notification that can close itself after a delay.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Permission status and its translation, notification requests, config, errors
//! - **Application**: The facade and the port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (notify-rust, in-memory, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and output
//!
//! # Example
//!
//! ```no_run
//! use notification_facade::application::{FireOutcome, NotificationFacade};
//! use notification_facade::domain::NotificationRequest;
//! use notification_facade::infrastructure::NotifyRustNotifier;
//!
//! # async fn example() {
//! let facade = NotificationFacade::new(NotifyRustNotifier::new());
//! let request = NotificationRequest::new("Backup", "Finished").with_auto_close_ms(5000);
//! if let FireOutcome::Shown(handle) = facade.fire(request).await {
//!     println!("shown as {}", handle.id());
//! }
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
