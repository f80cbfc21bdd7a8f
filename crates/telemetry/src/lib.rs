//! Structured logging and timing for Artprint tools
//!
//! - Subscriber setup with `RUST_LOG` support, compact or JSON output
//! - A per-process session id attached to the start-up event
//! - [`Timer`] for logging how long renders and API calls take

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt as fmt_layer, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = match config.format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt_layer::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .with_file(config.show_file)
                    .with_line_number(config.show_line_number)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt_layer::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .with_file(config.show_file)
                    .with_line_number(config.show_line_number)
                    .json(),
            )
            .try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`, expected compact or json")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Compact,
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Level from `-v` count and `--quiet`: quiet wins, then warn/info/debug/trace.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let log_level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        Self {
            log_level: log_level.to_string(),
            show_target: verbose >= 2,
            ..Self::default()
        }
    }

    /// Builder-style method to set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Timer for measuring operation duration
///
/// Logs at debug level when stopped, or when dropped without being stopped.
pub struct Timer {
    name: String,
    start: Instant,
    stopped: bool,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            stopped: false,
        }
    }

    /// Time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and log the duration
    pub fn stop(mut self) -> Duration {
        self.stopped = true;
        let duration = self.start.elapsed();
        log_duration(&self.name, duration);
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.stopped {
            log_duration(&self.name, self.start.elapsed());
        }
    }
}

fn log_duration(name: &str, duration: Duration) {
    tracing::debug!(
        operation = %name,
        duration_ms = duration.as_millis() as u64,
        "Timer completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer() {
        let timer = Timer::start("render_job");
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.elapsed().as_millis() >= 10);
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(!id.is_empty());
        // Should be a valid UUID
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(id, session_id());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(TelemetryConfig::from_verbosity(0, false).log_level, "info");
        assert_eq!(TelemetryConfig::from_verbosity(1, false).log_level, "debug");
        assert_eq!(TelemetryConfig::from_verbosity(3, false).log_level, "trace");
        assert_eq!(TelemetryConfig::from_verbosity(2, true).log_level, "error");
        assert!(TelemetryConfig::from_verbosity(2, false).show_target);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_init_twice_fails() {
        let first = init_with_config(TelemetryConfig::from_verbosity(0, true));
        let second = init_with_config(TelemetryConfig::default());
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
