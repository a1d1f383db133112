//! Command runners

use std::process::ExitCode;

use serde_json::json;
use tracing::debug;

use crate::application::ports::{ConfigStore, NotificationHandle, PlatformNotifier};
use crate::application::{FireOutcome, NotificationFacade};
use crate::domain::config::AppConfig;
use crate::domain::error::DurationParseError;
use crate::domain::notification::NotificationRequest;
use crate::domain::permission::{DeniedPolicy, PermissionStatus};
use crate::domain::time::Duration;
use crate::infrastructure::{create_notifier, NotifierBackend, XdgConfigStore};

use super::args::{Cli, Commands, NotifyArgs};
use super::config_cmd::handle_config_command;
use super::logging::init_tracing;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

const UNSUPPORTED: &str = "Notifications are not supported on this host";
const WAITING: &str = "Waiting for permission...";

/// Facade over whichever backend the configuration selects
pub type Facade = NotificationFacade<Box<dyn PlatformNotifier>>;

/// Run the parsed command line
pub async fn run(cli: Cli) -> ExitCode {
    let mut presenter = Presenter::new();
    let store = match cli.config.as_ref() {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    let cli_config = AppConfig {
        backend: cli.backend.map(|b| NotifierBackend::from(b).to_string()),
        denied_policy: match &cli.command {
            Commands::Fire(args) => args
                .denied_policy
                .map(|p| DeniedPolicy::from(p).to_string()),
            _ => None,
        },
        ..Default::default()
    };

    let config = load_merged_config(&store, cli_config, &presenter).await;
    init_tracing(cli.verbose, config.log_level_or_default());
    let facade = build_facade(&config, &presenter).await;

    match cli.command {
        Commands::Config { action } => match handle_config_command(action, &store, &presenter).await
        {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
        Commands::Status { json } => run_status(&facade, &presenter, json),
        Commands::Permissions => run_permissions(&presenter),
        Commands::Request => run_request(&facade, &mut presenter).await,
        Commands::Show(args) => match build_request(&args, &config) {
            Ok(request) => run_show(&facade, &presenter, request).await,
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
        },
        Commands::Fire(args) => match build_request(&args.notify, &config) {
            Ok(request) => run_fire(&facade, &mut presenter, request).await,
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
        },
    }
}

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Build the facade for the configured backend and policy
pub async fn build_facade(config: &AppConfig, presenter: &Presenter) -> Facade {
    let backend = config
        .backend_or_default()
        .parse::<NotifierBackend>()
        .unwrap_or_else(|e| {
            presenter.warn(&format!("{}; using {}", e, NotifierBackend::default()));
            NotifierBackend::default()
        });
    let app_name = config.app_name_or_default();
    debug!(%backend, app_name, "building notification facade");

    NotificationFacade::new(create_notifier(backend, app_name).await)
        .with_denied_policy(config.denied_policy_or_default())
}

/// Turn CLI arguments into a request, filling gaps from the config
pub fn build_request(
    args: &NotifyArgs,
    config: &AppConfig,
) -> Result<NotificationRequest, DurationParseError> {
    let mut request = NotificationRequest::new(&args.title, &args.message);

    if let Some(icon) = args.icon.as_ref().or(config.icon.as_ref()) {
        request = request.with_icon(icon);
    }
    if let Some(tag) = &args.tag {
        request = request.with_tag(tag);
    }

    request.auto_close = match &args.timeout {
        Some(timeout) => Some(timeout.parse::<Duration>()?),
        None => config.timeout_or_default(),
    };

    Ok(request)
}

fn run_status(facade: &Facade, presenter: &Presenter, as_json: bool) -> ExitCode {
    let supported = facade.are_supported();
    let permission = facade.current_permission();

    if as_json {
        let status = json!({
            "supported": supported,
            "permission": permission,
            "value": permission.value(),
        });
        presenter.output(&status.to_string());
    } else {
        presenter.key_value("supported", if supported { "yes" } else { "no" });
        presenter.key_value("permission", permission.as_str());
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn run_permissions(presenter: &Presenter) -> ExitCode {
    for (key, status) in PermissionStatus::PERMISSIONS {
        presenter.key_value(key, &status.value().to_string());
    }
    ExitCode::from(EXIT_SUCCESS)
}

async fn run_request(facade: &Facade, presenter: &mut Presenter) -> ExitCode {
    let Some(pending) = facade.ask_for_permission() else {
        presenter.error(UNSUPPORTED);
        return ExitCode::from(EXIT_ERROR);
    };

    presenter.start_spinner(WAITING);
    tokio::select! {
        status = pending.wait() => {
            presenter.spinner_success(&format!("Permission: {}", status));
            presenter.output(status.as_str());
            ExitCode::from(EXIT_SUCCESS)
        }
        _ = tokio::signal::ctrl_c() => {
            presenter.spinner_fail("Cancelled");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run_show(facade: &Facade, presenter: &Presenter, request: NotificationRequest) -> ExitCode {
    if !facade.are_supported() {
        presenter.error(UNSUPPORTED);
        return ExitCode::from(EXIT_ERROR);
    }

    let auto_close = request.auto_close;
    match facade.create(request).await {
        Some(handle) => {
            presenter.success(&format!("Notification {} shown", handle.id()));
            hold_until_closed(presenter, &handle, auto_close).await;
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            presenter.error("Failed to show notification");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run_fire(
    facade: &Facade,
    presenter: &mut Presenter,
    request: NotificationRequest,
) -> ExitCode {
    let auto_close = request.auto_close;

    let handle = match facade.fire(request).await {
        FireOutcome::Shown(handle) => handle,
        FireOutcome::Pending(mut pending) => {
            presenter.start_spinner(WAITING);
            let waited = tokio::select! {
                handle = pending.wait() => Some(handle),
                _ = tokio::signal::ctrl_c() => None,
            };
            match waited {
                Some(Some(handle)) => {
                    presenter.spinner_success("Permission granted");
                    handle
                }
                Some(None) => {
                    presenter.spinner_fail("Notification was not shown");
                    return ExitCode::from(EXIT_ERROR);
                }
                None => {
                    pending.cancel();
                    presenter.spinner_fail("Cancelled");
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
        FireOutcome::Unsupported => {
            presenter.error(UNSUPPORTED);
            return ExitCode::from(EXIT_ERROR);
        }
        FireOutcome::Suppressed => {
            presenter.warn("Permission denied; not asking again");
            return ExitCode::from(EXIT_ERROR);
        }
        FireOutcome::Failed => {
            presenter.error("Failed to show notification");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.success(&format!("Notification {} shown", handle.id()));
    hold_until_closed(presenter, &handle, auto_close).await;
    ExitCode::from(EXIT_SUCCESS)
}

/// Keep the process alive until an auto-close is due, then close.
/// Ctrl+C closes right away.
async fn hold_until_closed(
    presenter: &Presenter,
    handle: &NotificationHandle,
    auto_close: Option<Duration>,
) {
    let Some(after) = auto_close else {
        return;
    };

    presenter.info(&format!("Closing in {}", after));
    tokio::select! {
        _ = tokio::time::sleep(after.as_std()) => {}
        _ = tokio::signal::ctrl_c() => debug!("interrupted, closing early"),
    }
    handle.close();
}
