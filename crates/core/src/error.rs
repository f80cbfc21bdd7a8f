//! Coded errors for file, configuration and snapshot failures
//!
//! The code drives the process exit status; context and suggestion are only
//! shown to the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Numeric error codes, grouped by category in blocks of a thousand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Files (1xxx)
    /// Any other I/O failure
    Io = 1000,
    /// Path does not exist
    FileNotFound = 1001,
    /// Path exists but cannot be read or written
    PermissionDenied = 1002,

    // Configuration (2xxx)
    /// Explicit config path does not exist
    ConfigNotFound = 2001,
    /// Config file is not valid TOML for the schema
    ConfigParse = 2002,
    /// Settings parse but cannot be rendered
    InvalidSettings = 2003,

    // Snapshots (3xxx)
    /// JSON encoding or decoding failed
    Serialization = 3000,
}

/// Coarse grouping of [`ErrorCode`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Reading or writing files
    Io,
    /// Loading or validating `artprint.toml`
    Configuration,
    /// Serializing API snapshots
    Snapshot,
}

impl ErrorCode {
    /// Numeric value, shown as `E####`
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Category the code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::Io | ErrorCode::FileNotFound | ErrorCode::PermissionDenied => {
                ErrorCategory::Io
            }
            ErrorCode::ConfigNotFound | ErrorCode::ConfigParse | ErrorCode::InvalidSettings => {
                ErrorCategory::Configuration
            }
            ErrorCode::Serialization => ErrorCategory::Snapshot,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with a code, optional context and an optional fix-it hint
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// What was being attempted
    pub context: Option<String>,
    /// Hint printed under the message
    pub suggestion: Option<String>,
    /// Underlying error, if any
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  while: {ctx}")?;
        }
        if let Some(hint) = &self.suggestion {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Error with no context, hint or source
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Set what was being attempted
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the hint shown to the user
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Artwork or texture path that does not name a file
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("no such file: {}", path.as_ref().display()),
        )
        .with_suggestion("Pass the path of an existing image file")
    }

    /// Explicit `--config` path that does not exist
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("config file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create artprint.toml or point --config at an existing file")
    }

    /// Settings that parse but cannot be rendered
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSettings, message)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self.code.category() {
            ErrorCategory::Configuration => exit_codes::CONFIG_ERROR,
            ErrorCategory::Io | ErrorCategory::Snapshot => exit_codes::FAILURE,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Non-zero exit statuses used by the CLI
pub mod exit_codes {
    /// Any failure that is not a configuration problem
    pub const FAILURE: i32 = 1;
    /// Missing, unparsable or invalid configuration
    pub const CONFIG_ERROR: i32 = 3;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::Io,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Serialization, format!("JSON error: {err}")).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParse, format!("TOML error: {err}")).with_source(err)
    }
}

/// Attach "while ..." context to a failing result
pub trait ResultExt<T> {
    /// Convert the error and attach `context`
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<Error>::into(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display_and_category() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E1001");
        assert_eq!(ErrorCode::Serialization.to_string(), "E3000");
        assert_eq!(ErrorCode::PermissionDenied.category(), ErrorCategory::Io);
        assert_eq!(ErrorCode::ConfigParse.category(), ErrorCategory::Configuration);
        assert_eq!(ErrorCode::Serialization.category(), ErrorCategory::Snapshot);
    }

    #[test]
    fn test_display_includes_context_and_hint() {
        let err = Error::file_not_found("/art/lemons.jpg").with_context("loading artwork");

        let shown = err.to_string();
        assert!(shown.starts_with("[E1001] no such file: /art/lemons.jpg"));
        assert!(shown.contains("\n  while: loading artwork"));
        assert!(shown.contains("\n  hint: "));
    }

    #[test]
    fn test_io_error_kinds() {
        let missing: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(missing.code, ErrorCode::FileNotFound);
        assert!(missing.source.is_some());

        let denied: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no").into();
        assert_eq!(denied.code, ErrorCode::PermissionDenied);

        let other: Error = std::io::Error::other("disk full").into();
        assert_eq!(other.code, ErrorCode::Io);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            Error::config_not_found("artprint.toml").exit_code(),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(
            Error::invalid_settings("canvas_width must be positive").exit_code(),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(Error::file_not_found("a.jpg").exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_context_converts_foreign_errors() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.context("reading artprint.toml").unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert_eq!(err.context.as_deref(), Some("reading artprint.toml"));
    }
}
