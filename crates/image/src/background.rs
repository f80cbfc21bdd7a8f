//! Canvas backgrounds.

use crate::error::{ImageError, Result};
use artprint_core::config::BackgroundConfig;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::error;

/// A resolved background, ready to paint.
#[derive(Debug, Clone)]
pub enum Background {
    /// Two-stop gradient from the top-left corner to the bottom-right corner
    Gradient {
        /// Color at the top-left corner
        from: [u8; 3],
        /// Color at the bottom-right corner
        to: [u8; 3],
    },
    /// Wall texture stretched over the canvas
    Wall {
        /// Decoded wall texture
        image: DynamicImage,
        /// Real-world height of the wall
        height_inches: f64,
    },
    /// Fully transparent canvas
    Transparent,
}

impl Default for Background {
    fn default() -> Self {
        Self::Gradient {
            from: [0xff, 0xff, 0xff],
            to: [0xd3, 0xd3, 0xd3],
        }
    }
}

impl Background {
    /// Resolve a configured background, decoding the wall texture if there is one.
    pub fn load(config: &BackgroundConfig) -> Result<Self> {
        Ok(match config {
            BackgroundConfig::Gradient { from, to } => Self::Gradient {
                from: from.0,
                to: to.0,
            },
            BackgroundConfig::Wall {
                image: path,
                height_inches,
            } => {
                let texture = image::open(path).map_err(|e| {
                    error!(path = %path.display(), error = %e, "Failed to load wall image");
                    ImageError::load(path, e)
                })?;
                Self::Wall {
                    image: texture,
                    height_inches: *height_inches,
                }
            }
            BackgroundConfig::Transparent => Self::Transparent,
        })
    }

    /// Real-world wall height, only known for wall textures.
    pub fn wall_height_inches(&self) -> Option<f64> {
        match self {
            Self::Wall { height_inches, .. } => Some(*height_inches),
            _ => None,
        }
    }

    /// Paint a fresh canvas of the given size.
    pub fn paint(&self, width: u32, height: u32) -> RgbaImage {
        match self {
            Self::Gradient { from, to } => linear_gradient(width, height, *from, *to),
            Self::Wall { image, .. } => {
                imageops::resize(&image.to_rgba8(), width, height, FilterType::Lanczos3)
            }
            Self::Transparent => RgbaImage::new(width, height),
        }
    }
}

/// Diagonal gradient: `from` at (0, 0), `to` at (width, height).
fn linear_gradient(width: u32, height: u32, from: [u8; 3], to: [u8; 3]) -> RgbaImage {
    let (w, h) = (width as f64, height as f64);
    let length_sq = (w * w + h * h).max(f64::EPSILON);

    RgbaImage::from_fn(width, height, |x, y| {
        let t = (((x as f64 + 0.5) * w + (y as f64 + 0.5) * h) / length_sq).clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2]), 255])
    })
}
