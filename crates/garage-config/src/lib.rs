//! Configuration for the garage menu.
//!
//! A single TOML file holds the catalog location and the persisted menu
//! settings. Startup loading layers compiled defaults, the file, and
//! `GARAGE_` environment overrides. [`FileSettingsStore`] plugs the same
//! file into the core's `SettingsStore` seam so toggles are written
//! through; it reads and writes the file layer only, so the environment
//! never leaks into the file or overrides a saved toggle.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use garage_core::{CoreError, MenuSettings, SettingsStore};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Catalog file to load when none is given on the command line.
    pub catalog: Option<PathBuf>,

    /// Menu options, written back on every toggle.
    #[serde(default)]
    pub settings: MenuSettings,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "garage", "garage").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("garage");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` plus environment. A missing file yields
/// defaults.
///
/// Nested keys use a double underscore, e.g.
/// `GARAGE_SETTINGS__MERGE_DLCS=true`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = file_figment(path)
        .merge(Env::prefixed("GARAGE_").split("__"))
        .extract()?;
    Ok(config)
}

/// Defaults plus the file at `path`, without environment overrides.
fn load_file_config(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = file_figment(path).extract()?;
    Ok(config)
}

fn file_figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

// ── Settings persistence ────────────────────────────────────────────

/// Settings store backed by the `[settings]` table of a config file.
/// Other keys in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, settings: &MenuSettings) -> Result<(), ConfigError> {
        let mut config = if self.path.exists() {
            load_file_config(&self.path)?
        } else {
            Config::default()
        };
        config.settings = settings.clone();
        save_config_to(&config, &self.path)
    }
}

impl SettingsStore for FileSettingsStore {
    fn save(&mut self, settings: &MenuSettings) -> Result<(), CoreError> {
        self.write(settings).map_err(|e| CoreError::SettingsSave { message: e.to_string() })
    }

    fn read(&mut self) -> Result<MenuSettings, CoreError> {
        load_file_config(&self.path)
            .map(|config| config.settings)
            .map_err(|e| CoreError::SettingsRead { message: e.to_string() })
    }
}
