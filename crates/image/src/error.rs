//! Error types for the image crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur while rendering or encoding mockups.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Source image could not be opened or decoded
    #[error("Failed to load image {path}: {source}")]
    LoadError {
        /// File that failed to load
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// Render settings that cannot produce an image
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    ProcessingError(#[from] image::ImageError),
}

impl ImageError {
    pub(crate) fn load(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::LoadError {
            path: path.into(),
            source,
        }
    }
}
