//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/lifelog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/lifelog/` (~/.config/lifelog/)
//! - Data: `$XDG_DATA_HOME/lifelog/` (~/.local/share/lifelog/)
//! - State/Logs: `$XDG_STATE_HOME/lifelog/` (~/.local/state/lifelog/)

use crate::analytics::{ReportConfig, ReportPeriod};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Report defaults
    #[serde(default)]
    pub reports: ReportsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report defaults.
///
/// Insight thresholds are fixed in code.
#[derive(Debug, Deserialize)]
pub struct ReportsConfig {
    /// Period used when none is given on the command line ("week" or "month")
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Number of entries in top/bottom rankings
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Number of emotions listed in the mood report
    #[serde(default = "default_top_emotions")]
    pub top_emotions: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
            top_n: default_top_n(),
            top_emotions: default_top_emotions(),
        }
    }
}

impl ReportsConfig {
    /// Parse the configured default period.
    ///
    /// An unknown value is an error rather than a silent fallback to "week".
    pub fn period(&self) -> Result<ReportPeriod> {
        self.default_period.parse()
    }

    /// Settings passed to report generation.
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            top_n: self.top_n,
            top_emotions: self.top_emotions,
        }
    }
}

fn default_period() -> String {
    "week".to_string()
}

fn default_top_n() -> usize {
    3
}

fn default_top_emotions() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/lifelog/config.toml` (~/.config/lifelog/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("lifelog").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    ///
    /// `$XDG_DATA_HOME/lifelog/` (~/.local/share/lifelog/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("lifelog")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/lifelog/` (~/.local/state/lifelog/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("lifelog")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/lifelog/data.db` (~/.local/share/lifelog/data.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/lifelog/lifelog.log` (~/.local/state/lifelog/lifelog.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("lifelog.log")
    }

    /// Ensure XDG base directory environment variables are set.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}
