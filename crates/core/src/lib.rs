//! Core types for Artprint tools
//!
//! This crate provides functionality shared by the image and commerce pipelines:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML render job definitions with per-field defaults
//! - **Snapshots**: Pretty-printed JSON dumps of API responses
//!
//! # Example
//!
//! ```rust,no_run
//! use artprint_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid artprint.toml");
//! for job in &config.schema.jobs {
//!     let settings = config.schema.settings_for(job);
//!     println!("{} -> {}", job.artwork.title, settings.output_dir.display());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod snapshot;

pub use error::{Error, ErrorCategory, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Artwork, Config, RenderJob, RenderSettings};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::snapshot::write_json;
}
