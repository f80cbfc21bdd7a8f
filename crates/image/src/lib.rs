//! Mockup image generation for Artprint.
//!
//! This crate provides:
//! - Cubic-Bézier easing curves
//! - Layered drop-shadow synthesis
//! - Inch-to-pixel artwork layout and anchoring
//! - Canvas compositing over gradient, wall-texture or transparent backgrounds
//! - Re-encoding under a file-size ceiling

#![warn(missing_docs)]

mod alpha;
mod background;
mod compose;
pub mod easing;
mod encode;
mod error;
pub mod layout;
pub mod shadow;

pub use alpha::{blend_over, flatten_alpha};
pub use background::Background;
pub use compose::{output_path, render_job, Compositor};
pub use easing::CubicBezier;
pub use encode::{encode_image, EncodeAttempt, EncodeOutcome, QualitySearch, SizeConstrainedEncoder};
pub use error::{ImageError, Result};
pub use layout::{fit_artwork, pixels_per_inch, resolve_origin, Placement, MAX_CANVAS_FRACTION};
pub use shadow::{css_box_shadow, shadow_layers, ShadowLayer, ShadowOptions};
