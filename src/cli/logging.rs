//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Log level for the given `-v` count, falling back to the configured level
pub fn level_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_lowercase(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence over both `-v` and the config file.
pub fn init_tracing(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "notification_facade={}",
            level_for(verbose, configured)
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
