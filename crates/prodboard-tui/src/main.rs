//! `prodboard-tui`: terminal admin panel for a products REST API.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `prodboard-core`'s [`ProductStream`](prodboard_core::ProductStream).
//! The sidebar switches between the Products table and an Overview.
//!
//! Logs are written to a file (default `/tmp/prodboard-tui.log`) so they
//! never corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use prodboard_core::{Controller, ControllerConfig, TlsVerification};

use crate::app::App;

/// Terminal admin panel for managing products.
#[derive(Parser, Debug)]
#[command(name = "prodboard-tui", version, about)]
struct Cli {
    /// Configuration profile to use
    #[arg(short = 'p', long, env = "PRODBOARD_PROFILE")]
    profile: Option<String>,

    /// API endpoint (overrides profile), e.g. http://localhost:3000
    #[arg(short = 'e', long, env = "PRODBOARD_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token (overrides profile and keyring)
    #[arg(long, env = "PRODBOARD_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, env = "PRODBOARD_INSECURE")]
    insecure: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/prodboard-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Hold the returned guard so logs flush on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "prodboard_tui={log_level},prodboard_core={log_level},prodboard_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("prodboard-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Profile from the shared config file, then flag overrides on top.
fn build_controller_config(cli: &Cli) -> Result<ControllerConfig> {
    let cfg = prodboard_config::load_config_or_default();
    let (profile_name, profile) = prodboard_config::resolve_profile(&cfg, cli.profile.as_deref())?;
    let mut config =
        prodboard_config::profile_to_controller_config(&profile, &profile_name, &cfg.defaults)?;

    if let Some(ref endpoint) = cli.endpoint {
        config.url = url::Url::parse(endpoint)
            .wrap_err_with(|| format!("invalid endpoint URL: {endpoint}"))?;
    }
    if let Some(ref token) = cli.api_token {
        config.api_token = Some(SecretString::from(token.clone()));
    }
    if cli.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config = build_controller_config(&cli)?;
    info!(endpoint = %config.url, "starting prodboard-tui");

    let mut app = App::new(Controller::new(config));
    app.run().await?;

    Ok(())
}
