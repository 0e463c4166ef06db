//! `garage`: terminal front end for the add-on vehicle spawner menu.
//!
//! Built on [ratatui](https://ratatui.rs). A catalog file (TOML or JSON)
//! stands in for the game: it lists the add-on models, the official DLC
//! packs and the label tables the menu resolves names through. Spawns are
//! recorded in memory and listed while the menu is closed.
//!
//! Logs go to a file (default `/tmp/garage.log`) so the terminal UI stays
//! intact. Menu settings are persisted to the config file on every toggle.

mod action;
mod app;
mod catalog_file;
mod event;
mod host;
mod menu_view;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use garage_config::FileSettingsStore;

use crate::app::App;
use crate::host::TerminalHost;

/// Browse, search and spawn vehicles from a catalog file.
#[derive(Parser, Debug)]
#[command(name = "garage", version, about)]
struct Cli {
    /// Catalog file (TOML, or JSON by extension). Defaults to `catalog` in
    /// the config file.
    #[arg(short, long, env = "GARAGE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Config file path (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/garage.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Nothing may be written to stdout/stderr while the
/// terminal is in raw mode. Hold the guard until exit so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("garage={level},garage_core={level},garage_config={level}"))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("garage.log"));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, log_filename));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config_path = cli.config.clone().unwrap_or_else(garage_config::config_path);
    let config = garage_config::load_config_from(&config_path)
        .wrap_err_with(|| format!("loading config {}", config_path.display()))?;

    let catalog = cli.catalog.clone().or(config.catalog).ok_or_else(|| {
        eyre!(
            "no catalog file: pass --catalog or set `catalog` in {}",
            config_path.display()
        )
    })?;
    info!(catalog = %catalog.display(), config = %config_path.display(), "starting garage");

    let host = TerminalHost::open(&catalog)?;
    let mut app = App::new(host, config.settings, FileSettingsStore::new(config_path));
    app.run().await?;

    Ok(())
}
