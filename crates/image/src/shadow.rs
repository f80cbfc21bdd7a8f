//! Layered drop-shadow synthesis.
//!
//! A soft, realistic shadow is built from several stacked shadows. Layer `i`
//! of `n` samples three easing curves at `i / n`: one for opacity, one for
//! how far the layer is pushed along the light angle, and one for its blur.

use crate::easing::CubicBezier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters shared by every layer of a shadow set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowOptions {
    /// Light angle in degrees; 0 casts straight down, 90 straight right
    pub angle: f64,
    /// Offset of the outermost layer, in pixels
    pub length: f64,
    /// Blur radius of the outermost layer, in pixels
    pub final_blur: f64,
    /// Spread applied to every layer, in pixels
    pub spread: f64,
    /// Opacity of the outermost layer
    pub final_transparency: f64,
    /// Curve distributing opacity across layers
    pub alpha_easing: CubicBezierPoints,
    /// Curve distributing offset across layers
    pub offset_easing: CubicBezierPoints,
    /// Curve distributing blur across layers
    pub blur_easing: CubicBezierPoints,
}

/// Control points `[x1, y1, x2, y2]` of an easing curve.
pub type CubicBezierPoints = [f64; 4];

impl Default for ShadowOptions {
    fn default() -> Self {
        Self {
            angle: 40.0,
            length: 150.0,
            final_blur: 100.0,
            spread: 0.0,
            final_transparency: 0.2,
            alpha_easing: [0.1, 0.5, 0.9, 0.5],
            offset_easing: [0.7, 0.1, 0.9, 0.3],
            blur_easing: [0.7, 0.1, 0.9, 0.3],
        }
    }
}

impl ShadowOptions {
    /// Settings used when painting shadows under a mockup artwork.
    pub fn compositing() -> Self {
        Self {
            final_blur: 300.0,
            ..Self::default()
        }
    }
}

/// One synthetic shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowLayer {
    /// Horizontal offset in pixels, positive to the right
    pub x_offset: f64,
    /// Vertical offset in pixels, positive downwards
    pub y_offset: f64,
    /// Blur radius in pixels; the Gaussian sigma is half of it
    pub blur: f64,
    /// Pixels the shadow rectangle grows by on every side
    pub spread: f64,
    /// Opacity in `[0, 1]`
    pub alpha: f64,
}

impl ShadowLayer {
    /// Distance the layer is pushed from the artwork.
    pub fn offset_magnitude(&self) -> f64 {
        self.x_offset.hypot(self.y_offset)
    }
}

impl fmt::Display for ShadowLayer {
    /// CSS `box-shadow` syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px rgba(0, 0, 0, {})",
            self.x_offset, self.y_offset, self.blur, self.spread, self.alpha
        )
    }
}

/// Generate `n` shadow layers, innermost first.
pub fn shadow_layers(n: usize, options: &ShadowOptions) -> Vec<ShadowLayer> {
    let curve = |[x1, y1, x2, y2]: CubicBezierPoints| CubicBezier::new(x1, y1, x2, y2);
    let alpha_easing = curve(options.alpha_easing);
    let offset_easing = curve(options.offset_easing);
    let blur_easing = curve(options.blur_easing);

    let radians = options.angle.to_radians();
    let (sin, cos) = radians.sin_cos();

    (1..=n)
        .map(|i| {
            let fraction = i as f64 / n as f64;
            let offset = offset_easing.ease(fraction).clamp(0.0, 1.0) * options.length;
            ShadowLayer {
                x_offset: offset * sin,
                y_offset: offset * cos,
                blur: blur_easing.ease(fraction).clamp(0.0, 1.0) * options.final_blur,
                spread: options.spread,
                alpha: alpha_easing.ease(fraction).clamp(0.0, 1.0) * options.final_transparency,
            }
        })
        .collect()
}

/// Render a layer set as a CSS `box-shadow` value.
pub fn css_box_shadow(layers: &[ShadowLayer]) -> String {
    layers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Fraction of a pixel column (or row) covered by a blurred edge-to-edge span.
///
/// `start..end` is the unblurred span; `sigma` the Gaussian standard deviation.
pub(crate) fn span_coverage(center: f64, start: f64, end: f64, sigma: f64) -> f64 {
    if sigma <= f64::EPSILON {
        return if center >= start && center < end { 1.0 } else { 0.0 };
    }
    let scale = sigma * std::f64::consts::SQRT_2;
    0.5 * (erf((center - start) / scale) - erf((center - end) / scale))
}

// Abramowitz & Stegun 7.1.26, absolute error below 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = x.signum();
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}
