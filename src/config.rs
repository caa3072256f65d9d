//! Board configuration read from the environment.
//!
//! - `TASKBOARD_BACKEND`: `http` (default), `file`, or `memory`.
//! - `TASKBOARD_API_URL`: task service base URL for the `http` backend.
//!   Defaults to `http://localhost:8080/api`.
//! - `TASKBOARD_HTTP_TIMEOUT_SECS`: request timeout in whole seconds.
//!   Defaults to `30`.
//! - `TASKBOARD_DATA_DIR`: directory of the `file` backend. Defaults to
//!   `.taskboard`.
//! - `TASKBOARD_STORAGE_KEY`: blob key of the `file` backend. Defaults to
//!   `tasks`.

use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::task::adapters::{
    blob::DEFAULT_STORAGE_KEY,
    http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
};

/// Selects the persistence backend.
pub const BACKEND_VAR: &str = "TASKBOARD_BACKEND";
/// Base URL of the task service.
pub const API_URL_VAR: &str = "TASKBOARD_API_URL";
/// HTTP request timeout in seconds.
pub const HTTP_TIMEOUT_VAR: &str = "TASKBOARD_HTTP_TIMEOUT_SECS";
/// Directory of the file backend.
pub const DATA_DIR_VAR: &str = "TASKBOARD_DATA_DIR";
/// Blob key of the file backend.
pub const STORAGE_KEY_VAR: &str = "TASKBOARD_STORAGE_KEY";

const DEFAULT_DATA_DIR: &str = ".taskboard";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("invalid value for {variable}: {reason}")]
    InvalidValue {
        /// Offending variable.
        variable: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            variable,
            reason: reason.into(),
        }
    }
}

/// Where the board keeps its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// The remote task service.
    Http {
        /// Base URL, e.g. `http://localhost:8080/api`.
        base_url: String,
        /// Per-request timeout.
        timeout: Duration,
    },
    /// A JSON blob in a local directory.
    File {
        /// Store directory.
        data_dir: Utf8PathBuf,
        /// Blob key inside the directory.
        storage_key: String,
    },
    /// A process-local tree, lost on exit.
    Memory,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Http {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Board configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardConfig {
    backend: BackendConfig,
}

impl BoardConfig {
    /// Creates a configuration for `backend`.
    #[must_use]
    pub const fn new(backend: BackendConfig) -> Self {
        Self { backend }
    }

    /// Returns the selected backend.
    #[must_use]
    pub const fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable or `None` when it is unset. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let backend = match read(BACKEND_VAR).as_deref().map(str::to_ascii_lowercase) {
            None => http_backend(&read)?,
            Some(kind) => match kind.as_str() {
                "http" => http_backend(&read)?,
                "file" => BackendConfig::File {
                    data_dir: read(DATA_DIR_VAR).map_or_else(
                        || Utf8PathBuf::from(DEFAULT_DATA_DIR),
                        Utf8PathBuf::from,
                    ),
                    storage_key: read(STORAGE_KEY_VAR)
                        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned()),
                },
                "memory" => BackendConfig::Memory,
                other => {
                    return Err(ConfigError::invalid(
                        BACKEND_VAR,
                        format!("unknown backend '{other}', expected http, file, or memory"),
                    ));
                }
            },
        };
        Ok(Self { backend })
    }
}

fn http_backend(read: &impl Fn(&str) -> Option<String>) -> Result<BackendConfig, ConfigError> {
    let base_url = read(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::invalid(
            API_URL_VAR,
            format!("'{base_url}' is not an http(s) URL"),
        ));
    }
    let timeout = match read(HTTP_TIMEOUT_VAR) {
        None => DEFAULT_TIMEOUT,
        Some(raw) => match raw.parse::<u64>() {
            Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
            _ => {
                return Err(ConfigError::invalid(
                    HTTP_TIMEOUT_VAR,
                    format!("'{raw}' is not a positive number of seconds"),
                ));
            }
        },
    };
    Ok(BackendConfig::Http { base_url, timeout })
}
