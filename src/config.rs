//! Application-level configuration loading: storage policy, CORS origin, and
//! database location.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ARCADE_BACK_CONFIG_PATH";
/// Default SQLite database file.
const DEFAULT_DATABASE_PATH: &str = "data/arcade.db";

/// How the application reacts to primary storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoragePolicy {
    /// Retry the failing operation against the in-memory store and keep
    /// serving from memory for the rest of the process lifetime.
    Fallback,
    /// Surface storage failures as generic server errors while a supervisor
    /// task tries to restore the primary store.
    Strict,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    storage_policy: StoragePolicy,
    allowed_origin: Option<String>,
    database_path: PathBuf,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        policy = ?app_config.storage_policy,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Configured storage failure policy.
    pub fn storage_policy(&self) -> StoragePolicy {
        self.storage_policy
    }

    /// Exact origin allowed by CORS, or `None` for a permissive layer.
    pub fn allowed_origin(&self) -> Option<&str> {
        self.allowed_origin.as_deref()
    }

    /// SQLite database file path, honoring the `DATABASE_PATH` override.
    pub fn database_path(&self) -> PathBuf {
        env::var_os("DATABASE_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.database_path.clone())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_policy: StoragePolicy::Fallback,
            allowed_origin: None,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    storage_policy: Option<StoragePolicy>,
    allowed_origin: Option<String>,
    database_path: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            storage_policy: value.storage_policy.unwrap_or(defaults.storage_policy),
            allowed_origin: value.allowed_origin.filter(|origin| !origin.is_empty()),
            database_path: value.database_path.unwrap_or(defaults.database_path),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
