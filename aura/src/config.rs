//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with defaults,
//! and the monitor configuration assembled from them.

use crate::health::prober::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::health::scheduler::DEFAULT_PROBE_INTERVAL_SECS;
use std::path::PathBuf;
use std::time::Duration;

/// Get an environment variable, treating an empty value as unset
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable or a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed to a specific type
///
/// Returns `default` if the variable is unset or does not parse.
///
/// # Example
/// ```
/// use aura::config::get_env_parse;
///
/// let secs: u64 = get_env_parse("AURA_PROBE_INTERVAL_SECS", 30);
/// ```
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match get_env(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    "Environment variable '{}' has an invalid value '{}', using default",
                    name,
                    raw
                );
                default
            }
        },
        None => default,
    }
}

/// データディレクトリを取得
///
/// `AURA_DATA_DIR` → `$HOME/.aura`（Windowsは`%USERPROFILE%\.aura`）→ 一時ディレクトリの順で決定する。
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = get_env("AURA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match get_env("HOME").or_else(|| get_env("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(".aura"),
        // HOMEが無い環境（サービス・最小コンテナなど）でも起動できるようにする
        None => std::env::temp_dir().join("aura"),
    }
}

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Directory holding the saved endpoints and logs
    pub data_dir: PathBuf,
    /// Interval between two probes of the same endpoint
    pub probe_interval: Duration,
    /// Timeout of a single probe request
    pub probe_timeout: Duration,
    /// Default log filter
    pub log_level: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::temp_dir().join("aura"),
            probe_interval: Duration::from_secs(DEFAULT_PROBE_INTERVAL_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            log_level: "info".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let interval_secs =
            get_env_parse("AURA_PROBE_INTERVAL_SECS", DEFAULT_PROBE_INTERVAL_SECS).max(1);
        let timeout_secs =
            get_env_parse("AURA_PROBE_TIMEOUT_SECS", DEFAULT_PROBE_TIMEOUT_SECS).max(1);

        Self {
            data_dir: default_data_dir(),
            probe_interval: Duration::from_secs(interval_secs),
            probe_timeout: Duration::from_secs(timeout_secs),
            log_level: get_env_or("AURA_LOG_LEVEL", "info"),
        }
    }

    /// Override the data directory (CLI flag).
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
