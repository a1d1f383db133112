//! Time value objects

mod duration;

pub use duration::Duration;
