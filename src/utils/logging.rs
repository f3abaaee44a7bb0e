//! Logging configuration and subscriber setup

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level, overridden by `RUST_LOG` when set
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include target module information
    pub target: bool,
    /// Use colored output (pretty and compact formats)
    pub colored: bool,
}

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    Pretty,
    /// Compact single-line text format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "unknown log level '{}' (expected error, warn, info, debug or trace)",
                other
            )),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "unknown log format '{}' (expected pretty, compact or json)",
                other
            )),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            target: false,
            colored: true,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Filter built from `RUST_LOG`, falling back to the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_str()))
    }

    /// Install the global subscriber, writing to stderr
    ///
    /// Stdout stays reserved for command output. Fails if a subscriber
    /// is already installed.
    pub fn initialize(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(self.config.target)
            .with_ansi(self.config.colored);

        match self.config.format {
            LogFormat::Pretty => builder.pretty().try_init()?,
            LogFormat::Compact => builder.compact().try_init()?,
            LogFormat::Json => builder.json().try_init()?,
        }

        tracing::debug!(
            "Logging initialized: level={}, format={:?}",
            self.config.level,
            self.config.format
        );
        Ok(())
    }

    /// Log version and platform information
    pub fn log_system_info(&self) {
        tracing::info!("=== torrent-aio {} ===", env!("CARGO_PKG_VERSION"));

        #[cfg(target_os = "macos")]
        tracing::debug!("Platform: macOS");
        #[cfg(target_os = "linux")]
        tracing::debug!("Platform: Linux");
        #[cfg(target_os = "windows")]
        tracing::debug!("Platform: Windows");
    }
}
