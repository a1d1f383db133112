//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::domain::permission::DeniedPolicy;
use crate::infrastructure::NotifierBackend;

/// notification-facade - desktop notifications from the command line
#[derive(Parser, Debug)]
#[command(name = "notification-facade")]
#[command(version)]
#[command(about = "Show desktop notifications with permission handling and auto-close")]
#[command(long_about = None)]
pub struct Cli {
    /// Notifier backend
    #[arg(short = 'b', long, value_name = "BACKEND", global = true)]
    pub backend: Option<BackendArg>,

    /// Config file to use instead of the XDG default
    #[arg(
        long,
        value_name = "PATH",
        env = "NOTIFICATION_FACADE_CONFIG",
        global = true
    )]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show whether notifications are supported and the current permission
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List permission keys and their numeric values
    Permissions,
    /// Ask for permission to show notifications
    Request,
    /// Display a notification now, without checking permission
    Show(NotifyArgs),
    /// Display a notification, asking for permission first if needed
    Fire(FireArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Notification content shared by `show` and `fire`
#[derive(Args, Debug, Clone)]
pub struct NotifyArgs {
    /// Notification title
    pub title: String,

    /// Notification body
    pub message: String,

    /// Icon name or path
    #[arg(short = 'i', long, value_name = "ICON")]
    pub icon: Option<String>,

    /// Replace earlier notifications with the same tag
    #[arg(short = 't', long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Close automatically after this long (e.g., 500ms, 5s, 1m)
    #[arg(short = 'T', long, value_name = "TIME")]
    pub timeout: Option<String>,
}

/// Arguments for `fire`
#[derive(Args, Debug, Clone)]
pub struct FireArgs {
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// What to do when permission was already denied
    #[arg(long, value_name = "POLICY")]
    pub denied_policy: Option<DeniedPolicyArg>,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Desktop,
    None,
}

impl From<BackendArg> for NotifierBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Desktop => NotifierBackend::Desktop,
            BackendArg::None => NotifierBackend::None,
        }
    }
}

/// Denied policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeniedPolicyArg {
    Reask,
    Skip,
}

impl From<DeniedPolicyArg> for DeniedPolicy {
    fn from(arg: DeniedPolicyArg) -> Self {
        match arg {
            DeniedPolicyArg::Reask => DeniedPolicy::Reask,
            DeniedPolicyArg::Skip => DeniedPolicy::Skip,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_name",
    "backend",
    "icon",
    "timeout",
    "denied_policy",
    "log_level",
];

/// Valid log levels
pub const VALID_LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
