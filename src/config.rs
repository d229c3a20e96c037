//! Configuration file handling for watchlist.
//!
//! Loads the remote store credentials from `~/.watchlist.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_TABLE;

/// File name of the config file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".watchlist.toml";

/// Example shown to the user when the config is missing or incomplete.
const EXAMPLE_CONFIG: &str = "supabase_url = \"https://<project>.supabase.co\"\nsupabase_key = \"<anon or service key>\"";

/// Raw file contents. Required fields are optional here so a missing one
/// can be reported by name instead of as a generic parse error.
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    supabase_url: Option<String>,
    supabase_key: Option<String>,
    table: Option<String>,
}

/// Loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project URL of the remote store, e.g. `https://abc.supabase.co`.
    pub supabase_url: String,
    /// Access key sent with every request.
    pub supabase_key: String,
    /// Table holding the watchlist rows.
    pub table: String,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// Unlike most settings files this one is mandatory: a missing file or
    /// a missing required field is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path().ok_or(ConfigError::NoHomeDir)?,
        };

        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse config contents. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let required = |value: Option<String>, field: &'static str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingField {
                    path: path.to_path_buf(),
                    field,
                })
        };

        let supabase_url = required(raw.supabase_url, "supabase_url")?;
        let supabase_key = required(raw.supabase_key, "supabase_key")?;
        let table = raw
            .table
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        log::debug!("Loaded config from {} (table: {})", path.display(), table);

        Ok(Config {
            supabase_url,
            supabase_key,
            table,
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory; pass --config <PATH>")]
    NoHomeDir,

    #[error("Config file '{}' not found. Create it with:\n\n{}\n", .path.display(), EXAMPLE_CONFIG)]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{}': {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file '{}' is missing '{}'. Expected:\n\n{}\n", .path.display(), .field, EXAMPLE_CONFIG)]
    MissingField { path: PathBuf, field: &'static str },
}

/// Get the default config file path (`~/.watchlist.toml`).
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}
