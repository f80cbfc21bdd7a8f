//! Artwork sizing and placement on the canvas.
//!
//! All functions here are pure and testable without any I/O or images.

use artprint_core::config::Anchor;

/// Largest share of the canvas the artwork may cover on either axis.
pub const MAX_CANVAS_FRACTION: f64 = 0.8;

/// Where and how large the artwork is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge, may be negative when offsets push the artwork off-canvas
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Drawn width in pixels
    pub width: u32,
    /// Drawn height in pixels
    pub height: u32,
}

impl Placement {
    /// Size the artwork and resolve its origin.
    pub fn resolve(
        artwork_px: (u32, u32),
        artwork_inches: (f64, f64),
        canvas: (u32, u32),
        ppi: Option<f64>,
        anchor: Anchor,
        offset: (i32, i32),
    ) -> Self {
        let (w, h) = fit_artwork(artwork_px, artwork_inches, canvas, ppi);
        // Floor keeps the drawn size inside the 80% box.
        let width = (w.floor() as u32).max(1);
        let height = (h.floor() as u32).max(1);
        let (x, y) = resolve_origin(anchor, canvas, (width, height), offset);
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixels per real-world inch for a wall of the given height.
///
/// Returns `None` for a non-positive or non-finite wall height.
pub fn pixels_per_inch(canvas_height: u32, wall_height_inches: f64) -> Option<f64> {
    if wall_height_inches.is_finite() && wall_height_inches > 0.0 {
        Some(canvas_height as f64 / wall_height_inches)
    } else {
        None
    }
}

/// Compute the drawn artwork size, preserving its native pixel aspect ratio.
///
/// With a pixels-per-inch scale the artwork is drawn at its real height
/// (`height_inches * ppi`) and the width follows from the pixel aspect; the
/// physical width is not consulted. Without a scale, or when the height is
/// unknown, the artwork fills the largest box inside [`MAX_CANVAS_FRACTION`]
/// of the canvas. Either way the result never exceeds that fraction on
/// either axis.
///
/// # Example
/// ```
/// use artprint_image::fit_artwork;
///
/// // 30x31in artwork on a 144in wall rendered at 2048px
/// let ppi = artprint_image::pixels_per_inch(2048, 144.0);
/// let (w, h) = fit_artwork((3000, 3100), (30.0, 31.0), (2048, 2048), ppi);
/// assert!((h - 31.0 * 2048.0 / 144.0).abs() < 1e-6);
/// assert!((w / h - 3000.0 / 3100.0).abs() < 1e-9);
/// ```
pub fn fit_artwork(
    artwork_px: (u32, u32),
    artwork_inches: (f64, f64),
    canvas: (u32, u32),
    ppi: Option<f64>,
) -> (f64, f64) {
    let (px_w, px_h) = (artwork_px.0.max(1) as f64, artwork_px.1.max(1) as f64);
    let max_w = canvas.0 as f64 * MAX_CANVAS_FRACTION;
    let max_h = canvas.1 as f64 * MAX_CANVAS_FRACTION;
    let fill = (max_w / px_w).min(max_h / px_h);

    let height_in = artwork_inches.1;
    let scale = match ppi {
        Some(ppi) if height_in.is_finite() && height_in > 0.0 => {
            (height_in * ppi / px_h).min(fill)
        }
        _ => fill,
    };

    (px_w * scale, px_h * scale)
}

/// Resolve an anchor and pixel offsets into a top-left draw origin.
pub fn resolve_origin(
    anchor: Anchor,
    canvas: (u32, u32),
    size: (u32, u32),
    offset: (i32, i32),
) -> (i64, i64) {
    let free_x = canvas.0 as i64 - size.0 as i64;
    let free_y = canvas.1 as i64 - size.1 as i64;

    let (x, y) = match anchor {
        Anchor::TopLeft => (0, 0),
        Anchor::Top => (free_x / 2, 0),
        Anchor::TopRight => (free_x, 0),
        Anchor::Left => (0, free_y / 2),
        Anchor::Center => (free_x / 2, free_y / 2),
        Anchor::Right => (free_x, free_y / 2),
        Anchor::BottomLeft => (0, free_y),
        Anchor::Bottom => (free_x / 2, free_y),
        Anchor::BottomRight => (free_x, free_y),
    };

    (x + offset.0 as i64, y + offset.1 as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pixels_per_inch() {
        assert_eq!(pixels_per_inch(2048, 128.0), Some(16.0));
        assert_eq!(pixels_per_inch(2048, 0.0), None);
        assert_eq!(pixels_per_inch(2048, f64::NAN), None);
    }

    #[test]
    fn test_fit_without_wall_fills_80_percent() {
        // Landscape: width is the limiting axis
        let (w, h) = fit_artwork((4000, 2000), (0.0, 0.0), (2048, 2048), None);
        assert!((w - 1638.4).abs() < 1e-9);
        assert!((h - 819.2).abs() < 1e-9);

        // Portrait: height is the limiting axis
        let (w, h) = fit_artwork((1000, 2000), (0.0, 0.0), (2048, 2048), None);
        assert!((h - 1638.4).abs() < 1e-9);
        assert!((w - 819.2).abs() < 1e-9);
    }

    #[test]
    fn test_fit_on_wall_uses_physical_size() {
        // 144in wall on 2048px: 14.22 px/in; a 31in tall piece is ~441px
        let ppi = pixels_per_inch(2048, 144.0);
        let (w, h) = fit_artwork((3000, 3100), (30.0, 31.0), (2048, 2048), ppi);
        assert!((h - 31.0 * 2048.0 / 144.0).abs() < 1e-6);
        assert!((w / h - 3000.0 / 3100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_on_wall_follows_height_not_width() {
        // Square pixels but a 30x60in label: height wins, width follows the pixels
        let (w, h) = fit_artwork((1000, 1000), (30.0, 60.0), (2048, 2048), Some(10.0));
        assert!((h - 600.0).abs() < 1e-9);
        assert!((w - 600.0).abs() < 1e-9);

        // Wide pixels under a tall label still reach the physical height
        let (w, h) = fit_artwork((2000, 500), (10.0, 40.0), (4096, 4096), Some(10.0));
        assert!((h - 400.0).abs() < 1e-9);
        assert!((w - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_on_wall_clamped_to_canvas() {
        // 90x63in on a 96in wall would be 1920px wide; clamp to 80%
        let ppi = pixels_per_inch(2048, 96.0);
        let (w, h) = fit_artwork((9000, 6300), (90.0, 63.0), (2048, 2048), ppi);
        assert!((w - 1638.4).abs() < 1e-9);
        assert!(h <= 1638.4);
    }

    #[test]
    fn test_resolve_origin_center() {
        let canvas = (2048, 2048);
        let size = (1000, 500);
        assert_eq!(resolve_origin(Anchor::Center, canvas, size, (0, 0)), (524, 774));
        assert_eq!(resolve_origin(Anchor::Center, canvas, size, (10, -20)), (534, 754));
    }

    #[test]
    fn test_resolve_origin_edges() {
        let canvas = (100, 80);
        let size = (20, 10);
        assert_eq!(resolve_origin(Anchor::TopLeft, canvas, size, (0, 0)), (0, 0));
        assert_eq!(resolve_origin(Anchor::BottomRight, canvas, size, (0, 0)), (80, 70));
        assert_eq!(resolve_origin(Anchor::Top, canvas, size, (0, 0)), (40, 0));
        assert_eq!(resolve_origin(Anchor::Left, canvas, size, (-5, 0)), (-5, 35));
    }

    #[test]
    fn test_placement_resolve() {
        let placement = Placement::resolve(
            (4000, 2000),
            (0.0, 0.0),
            (2048, 2048),
            None,
            Anchor::Center,
            (0, 0),
        );
        assert_eq!(placement.width, 1638);
        assert_eq!(placement.height, 819);
        assert_eq!(placement.x, 205);
        assert_eq!(placement.y, 614);
    }

    proptest! {
        #[test]
        fn prop_fit_preserves_aspect_and_bounds(
            px_w in 1u32..10_000,
            px_h in 1u32..10_000,
            canvas_w in 16u32..4096,
            canvas_h in 16u32..4096,
            width_in in 1.0f64..200.0,
            height_in in 1.0f64..200.0,
            wall in prop::option::of(12.0f64..400.0),
        ) {
            let ppi = wall.and_then(|wall| pixels_per_inch(canvas_h, wall));
            let inches = (width_in, height_in);
            let (w, h) = fit_artwork((px_w, px_h), inches, (canvas_w, canvas_h), ppi);

            prop_assert!(w <= canvas_w as f64 * MAX_CANVAS_FRACTION + 1e-9);
            prop_assert!(h <= canvas_h as f64 * MAX_CANVAS_FRACTION + 1e-9);

            let native = px_w as f64 / px_h as f64;
            prop_assert!(((w / h) - native).abs() <= native * 1e-9);

            let placement = Placement::resolve(
                (px_w, px_h),
                inches,
                (canvas_w, canvas_h),
                ppi,
                Anchor::Center,
                (0, 0),
            );
            let max_w = (canvas_w as f64 * MAX_CANVAS_FRACTION).max(1.0);
            let max_h = (canvas_h as f64 * MAX_CANVAS_FRACTION).max(1.0);
            prop_assert!(placement.width as f64 <= max_w);
            prop_assert!(placement.height as f64 <= max_h);
        }
    }
}
