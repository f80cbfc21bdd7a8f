//! Re-encoding under a file-size ceiling.
//!
//! Quality starts at the top of the range and drops by a fixed step until the
//! encoded buffer fits or the floor is reached. Quality levels are coarse, so
//! a linear walk is at most ten encodes.

use crate::alpha::flatten_alpha;
use crate::error::Result;
use artprint_core::config::OutputFormat;
use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Quality levels to try, from `start` down to `floor` in `step` decrements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySearch {
    /// First quality tried
    pub start: u8,
    /// Decrement between attempts
    pub step: u8,
    /// Lowest quality tried
    pub floor: u8,
}

impl Default for QualitySearch {
    fn default() -> Self {
        Self {
            start: 100,
            step: 10,
            floor: 10,
        }
    }
}

impl QualitySearch {
    /// Quality levels in the order they are attempted.
    pub fn qualities(&self) -> impl Iterator<Item = u8> {
        let Self { start, step, floor } = *self;
        std::iter::successors(Some(start), move |q| {
            q.checked_sub(step).filter(|next| step > 0 && *next >= floor)
        })
    }
}

/// Result of searching for an encoding that fits the budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeAttempt {
    /// First buffer at or under the ceiling
    Fits {
        /// Encoded bytes
        bytes: Vec<u8>,
        /// Quality the bytes were encoded at
        quality: u8,
    },
    /// No quality level met the ceiling
    TooLarge {
        /// Smallest encoded size seen
        best_size: u64,
        /// Last quality tried
        floor_quality: u8,
    },
}

/// What happened on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// The file was written
    Written {
        /// Destination file
        path: PathBuf,
        /// File size in bytes
        size: u64,
        /// Quality used
        quality: u8,
    },
    /// Nothing was written
    ExceededBudget {
        /// Smallest encoded size seen
        best_size: u64,
        /// Last quality tried
        floor_quality: u8,
    },
}

impl EncodeOutcome {
    /// Whether a file was produced.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Encodes images so that the output stays under `max_bytes`.
#[derive(Debug, Clone)]
pub struct SizeConstrainedEncoder {
    format: OutputFormat,
    max_bytes: u64,
    search: QualitySearch,
}

impl SizeConstrainedEncoder {
    /// Create an encoder with the default 100 → 10 quality search.
    pub fn new(format: OutputFormat, max_bytes: u64) -> Self {
        Self {
            format,
            max_bytes,
            search: QualitySearch::default(),
        }
    }

    /// Override the quality search.
    pub fn with_search(mut self, search: QualitySearch) -> Self {
        self.search = search;
        self
    }

    /// Byte ceiling.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Find the first quality whose output fits the ceiling.
    ///
    /// Formats that ignore quality are encoded once.
    pub fn encode_within_budget(&self, img: &DynamicImage) -> Result<EncodeAttempt> {
        let attempts = if self.format.supports_quality() { usize::MAX } else { 1 };
        let prepared = prepare(img, self.format);

        let mut best_size = u64::MAX;
        let mut last_quality = self.search.start;

        for quality in self.search.qualities().take(attempts) {
            let bytes = encode_prepared(&prepared, self.format, quality)?;
            let size = bytes.len() as u64;
            debug!(quality, size, max_bytes = self.max_bytes, "Encoded candidate");

            if size <= self.max_bytes {
                return Ok(EncodeAttempt::Fits { bytes, quality });
            }
            best_size = best_size.min(size);
            last_quality = quality;
        }

        Ok(EncodeAttempt::TooLarge {
            best_size,
            floor_quality: last_quality,
        })
    }

    /// Encode and write to `path`, or write nothing if the ceiling cannot be met.
    pub fn write(&self, img: &DynamicImage, path: &Path) -> Result<EncodeOutcome> {
        match self.encode_within_budget(img)? {
            EncodeAttempt::Fits { bytes, quality } => {
                std::fs::write(path, &bytes)?;
                let size = bytes.len() as u64;
                info!(
                    path = %path.display(),
                    size_mb = %format!("{:.2}", size as f64 / (1024.0 * 1024.0)),
                    quality,
                    "Optimized image saved"
                );
                Ok(EncodeOutcome::Written {
                    path: path.to_path_buf(),
                    size,
                    quality,
                })
            }
            EncodeAttempt::TooLarge {
                best_size,
                floor_quality,
            } => {
                warn!(
                    path = %path.display(),
                    best_size,
                    floor_quality,
                    max_bytes = self.max_bytes,
                    "Image exceeds the size limit at the lowest quality; nothing written"
                );
                Ok(EncodeOutcome::ExceededBudget {
                    best_size,
                    floor_quality,
                })
            }
        }
    }
}

/// Encode an image at a single quality level.
pub fn encode_image(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    encode_prepared(&prepare(img, format), format, quality)
}

fn prepare(img: &DynamicImage, format: OutputFormat) -> DynamicImage {
    match format {
        OutputFormat::Jpeg => flatten_alpha(img, [255, 255, 255]),
        OutputFormat::Png | OutputFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8()),
    }
}

fn encode_prepared(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());

    let output_format = match format {
        OutputFormat::Jpeg => ImageOutputFormat::Jpeg(quality.clamp(1, 100)),
        OutputFormat::Png => ImageOutputFormat::Png,
        OutputFormat::WebP => ImageOutputFormat::WebP,
    };

    img.write_to(&mut buffer, output_format)?;
    Ok(buffer.into_inner())
}
