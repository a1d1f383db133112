//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_APP_NAME, DEFAULT_BACKEND, DEFAULT_LOG_LEVEL};
