//! Configuration loading and management.

use std::path::{Path, PathBuf};

use ep_core::Granularity;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Period used by `summary` when none is given.
    #[serde(default)]
    pub default_period: Granularity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            default_period: Granularity::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: built-in defaults, the user config file, the file
    /// given on the command line, then `EP_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        sources(config_path).extract()
    }
}

/// Builds the layered configuration sources.
fn sources(config_path: Option<&Path>) -> Figment {
    let user_file = dirs_config_path().map(|dir| dir.join("config.toml"));
    let files = user_file.into_iter().chain(config_path.map(Path::to_path_buf));

    files
        .fold(
            Figment::from(Serialized::defaults(Config::default())),
            |figment, file| figment.merge(Toml::file(file)),
        )
        .merge(Env::prefixed("EP_"))
}

fn default_database_path() -> PathBuf {
    dirs_data_path()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ep.db")
}

/// The user config directory, e.g. `~/.config/ep`.
fn dirs_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("ep"))
}

/// The data directory holding the database.
///
/// On Linux: `~/.local/share/ep`
pub fn dirs_data_path() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join("ep"))
}
