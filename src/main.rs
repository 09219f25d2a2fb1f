//! kanban - A terminal viewer for boards served by a Kanban REST API.
//!
//! This is the main binary that launches the TUI application.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use clap::Parser;
use kanban_api::ApiClient;
use kanban_config::Config;
use kanban_tui::{App, Route, terminal};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Browse Kanban boards in the terminal.
#[derive(Debug, Parser)]
#[command(name = "kanban", version, about)]
struct Cli {
    /// Base URL of the board API, e.g. `http://localhost:8080/api`.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Screen to open first: `/` or `/boards/{id}`.
    #[arg(long, value_name = "PATH", default_value = "/")]
    open: String,
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some((log_path, file)) = open_log_file() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %log_path.display(), "logging initialized");
        return;
    }

    // No log file: drop logs rather than write over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> Option<(PathBuf, fs::File)> {
    let path = dirs::data_dir()?.join("kanban").join("kanban.log");
    fs::create_dir_all(path.parent()?).ok()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    Some((path, file))
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::read_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::read().context("failed to load config")?,
    };

    // Validate once, after the flag is applied.
    if let Some(url) = &cli.api_url {
        config.api.base_url.clone_from(url);
        config
            .validate()
            .with_context(|| format!("invalid --api-url {url}"))?;
    } else {
        config.validate().context("invalid configuration")?;
    }

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;
    tracing::info!(base_url = %config.api.base_url, "configuration loaded");

    let client = Arc::new(ApiClient::with_timeout(
        &config.api.base_url,
        config.api.timeout(),
    )?);

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(client, Route::parse(&cli.open));
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
