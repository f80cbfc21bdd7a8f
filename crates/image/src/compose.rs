//! Mockup compositing.
//!
//! A render paints three layers onto a fixed-size canvas: the background,
//! the stacked drop shadows, then the resized artwork.

use crate::alpha::blend_over;
use crate::background::Background;
use crate::encode::{EncodeOutcome, SizeConstrainedEncoder};
use crate::error::{ImageError, Result};
use crate::layout::{pixels_per_inch, Placement};
use crate::shadow::{shadow_layers, span_coverage, ShadowLayer, ShadowOptions};
use artprint_core::config::{Anchor, Artwork, RenderSettings};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

// Below half a step of an 8-bit channel a layer leaves no visible trace.
const MIN_VISIBLE_ALPHA: f64 = 0.5 / 255.0;

/// Renders artwork onto a mockup canvas.
#[derive(Debug, Clone)]
pub struct Compositor {
    width: u32,
    height: u32,
    background: Background,
    anchor: Anchor,
    offset: (i32, i32),
    shadow: ShadowOptions,
    shadow_layers: usize,
}

impl Compositor {
    /// Create a compositor for a canvas of the given size, with the default
    /// gradient background, centered placement and seven shadow layers.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Background::default(),
            anchor: Anchor::Center,
            offset: (0, 0),
            shadow: ShadowOptions::compositing(),
            shadow_layers: 7,
        }
    }

    /// Set the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Set the placement anchor and pixel offsets.
    pub fn with_anchor(mut self, anchor: Anchor, x_offset: i32, y_offset: i32) -> Self {
        self.anchor = anchor;
        self.offset = (x_offset, y_offset);
        self
    }

    /// Set the shadow parameters and layer count.
    pub fn with_shadow(mut self, options: ShadowOptions, layers: usize) -> Self {
        self.shadow = options;
        self.shadow_layers = layers;
        self
    }

    /// Where the artwork lands for the given pixel and physical dimensions.
    pub fn placement(&self, artwork_px: (u32, u32), artwork_inches: (f64, f64)) -> Placement {
        let ppi = self
            .background
            .wall_height_inches()
            .and_then(|wall| pixels_per_inch(self.height, wall));

        Placement::resolve(
            artwork_px,
            artwork_inches,
            (self.width, self.height),
            ppi,
            self.anchor,
            self.offset,
        )
    }

    /// Composite `artwork` (physically `width_inches` × `height_inches`).
    pub fn render(
        &self,
        artwork: &DynamicImage,
        width_inches: f64,
        height_inches: f64,
    ) -> Result<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::InvalidSettings(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }

        let placement = self.placement(artwork.dimensions(), (width_inches, height_inches));
        debug!(?placement, layers = self.shadow_layers, "Compositing artwork");

        let mut canvas = self.background.paint(self.width, self.height);

        for layer in shadow_layers(self.shadow_layers, &self.shadow) {
            paint_shadow(&mut canvas, &placement, &layer);
        }

        let resized = imageops::resize(
            &artwork.to_rgba8(),
            placement.width,
            placement.height,
            FilterType::Lanczos3,
        );
        imageops::overlay(&mut canvas, &resized, placement.x, placement.y);

        Ok(canvas)
    }
}

/// Paint one blurred rectangular shadow below the artwork rectangle.
fn paint_shadow(canvas: &mut RgbaImage, placement: &Placement, layer: &ShadowLayer) {
    if layer.alpha < MIN_VISIBLE_ALPHA {
        return;
    }

    let left = placement.x as f64 + layer.x_offset - layer.spread;
    let top = placement.y as f64 + layer.y_offset - layer.spread;
    let right = left + placement.width as f64 + 2.0 * layer.spread;
    let bottom = top + placement.height as f64 + 2.0 * layer.spread;
    // CSS blur radius is twice the Gaussian standard deviation.
    let sigma = layer.blur / 2.0;

    let (width, height) = canvas.dimensions();
    let columns: Vec<f64> = (0..width)
        .map(|x| span_coverage(x as f64 + 0.5, left, right, sigma))
        .collect();
    let rows: Vec<f64> = (0..height)
        .map(|y| span_coverage(y as f64 + 0.5, top, bottom, sigma))
        .collect();

    for (y, row) in rows.iter().enumerate() {
        let row_alpha = layer.alpha * row;
        if row_alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        for (x, column) in columns.iter().enumerate() {
            let alpha = row_alpha * column;
            if alpha >= MIN_VISIBLE_ALPHA {
                blend_over(canvas.get_pixel_mut(x as u32, y as u32), [0, 0, 0], alpha);
            }
        }
    }
}

/// Output file for an artwork: `<output_dir>/<name>-<id>.<ext>`.
///
/// Without a configured output name the artwork file stem is used on its own.
pub fn output_path(artwork: &Artwork, settings: &RenderSettings) -> PathBuf {
    let extension = settings.format.extension();
    let file_name = match settings.output_name.as_deref() {
        Some(name) => format!("{name}-{}.{extension}", artwork.id),
        None => {
            let stem = std::path::Path::new(&artwork.file_name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| artwork.id.clone());
            format!("{stem}.{extension}")
        }
    };
    settings.output_dir.join(file_name)
}

/// Load, composite and encode one artwork according to its settings.
///
/// Creates the output directory if it does not exist.
pub fn render_job(artwork: &Artwork, settings: &RenderSettings) -> Result<EncodeOutcome> {
    let started = Instant::now();
    let input = settings.input_dir.join(&artwork.file_name);

    let source = image::open(&input).map_err(|e| {
        error!(
            artwork = %artwork.id,
            path = %input.display(),
            error = %e,
            "Failed to load artwork"
        );
        ImageError::load(&input, e)
    })?;
    let background = Background::load(&settings.background)?;

    let canvas = Compositor::new(settings.canvas_width, settings.canvas_height)
        .with_background(background)
        .with_anchor(settings.position, settings.x_offset, settings.y_offset)
        .with_shadow(ShadowOptions::compositing(), settings.shadow_layers)
        .render(&source, artwork.width_inches, artwork.height_inches)?;

    std::fs::create_dir_all(&settings.output_dir)?;
    let path = output_path(artwork, settings);

    let outcome = SizeConstrainedEncoder::new(settings.format, settings.max_file_size)
        .write(&DynamicImage::ImageRgba8(canvas), &path)?;

    info!(
        artwork = %artwork.id,
        title = %artwork.title,
        written = outcome.is_written(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Render finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use artprint_core::config::{BackgroundConfig, OutputFormat};
    use image::{Rgba, RgbaImage};

    fn artwork_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255])))
    }

    fn small_shadow() -> ShadowOptions {
        ShadowOptions {
            length: 8.0,
            final_blur: 4.0,
            ..ShadowOptions::default()
        }
    }

    fn artwork(file_name: &str) -> Artwork {
        Artwork {
            id: "001".to_string(),
            title: "Lemons".to_string(),
            height_inches: 31.0,
            width_inches: 30.0,
            file_name: file_name.to_string(),
        }
    }

    #[test]
    fn test_transparent_background_stays_clear_outside_artwork() {
        let compositor = Compositor::new(200, 200)
            .with_background(Background::Transparent)
            .with_shadow(small_shadow(), 7);

        let canvas = compositor.render(&artwork_image(100, 50), 0.0, 0.0).unwrap();
        let placement = compositor.placement((100, 50), (0.0, 0.0));
        assert_eq!((placement.width, placement.height), (160, 80));

        // Artwork is opaque
        let cx = (placement.x + placement.width as i64 / 2) as u32;
        let cy = (placement.y + placement.height as i64 / 2) as u32;
        let center = canvas.get_pixel(cx, cy);
        assert_eq!(center[3], 255);
        assert!(center[0].abs_diff(200) <= 1);

        // Shadows fall down-right; everything above and left of the artwork is clear
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let above = (y as i64) < placement.y - 4;
                let left = (x as i64) < placement.x - 4;
                if above || left {
                    assert_eq!(canvas.get_pixel(x, y)[3], 0, "opaque pixel at {x},{y}");
                }
            }
        }

        // A shadow is visible just below the artwork
        let below = (placement.y + placement.height as i64 + 2) as u32;
        assert!(canvas.get_pixel(cx, below)[3] > 0);
    }

    #[test]
    fn test_shadow_darkens_gradient() {
        let compositor = Compositor::new(200, 200).with_shadow(small_shadow(), 7);
        let plain = Compositor::new(200, 200).with_shadow(small_shadow(), 0);

        let shaded = compositor.render(&artwork_image(100, 100), 0.0, 0.0).unwrap();
        let unshaded = plain.render(&artwork_image(100, 100), 0.0, 0.0).unwrap();

        let placement = compositor.placement((100, 100), (0.0, 0.0));
        let x = (placement.x + placement.width as i64 / 2) as u32;
        let y = (placement.y + placement.height as i64 + 3) as u32;
        assert!(shaded.get_pixel(x, y)[0] < unshaded.get_pixel(x, y)[0]);
        assert_eq!(shaded.get_pixel(2, 2), unshaded.get_pixel(2, 2));
    }

    #[test]
    fn test_wall_background_scales_by_inches() {
        let wall = RgbaImage::from_pixel(16, 16, Rgba([240, 235, 230, 255]));
        let compositor = Compositor::new(1000, 1000).with_background(Background::Wall {
            image: DynamicImage::ImageRgba8(wall),
            height_inches: 100.0,
        });

        // 10 px/in: a 30x20in piece is 300x200px
        let placement = compositor.placement((3000, 2000), (30.0, 20.0));
        assert_eq!((placement.width, placement.height), (300, 200));
        assert_eq!((placement.x, placement.y), (350, 400));
    }

    #[test]
    fn test_anchor_and_offset() {
        let compositor = Compositor::new(100, 100).with_anchor(Anchor::TopLeft, 5, 7);
        let placement = compositor.placement((10, 10), (0.0, 0.0));
        assert_eq!((placement.x, placement.y), (5, 7));
    }

    #[test]
    fn test_empty_canvas_rejected() {
        let err = Compositor::new(0, 100).render(&artwork_image(4, 4), 1.0, 1.0).unwrap_err();
        assert!(matches!(err, ImageError::InvalidSettings(_)));
    }

    #[test]
    fn test_output_path() {
        let mut settings = RenderSettings {
            output_dir: PathBuf::from("out"),
            format: OutputFormat::Jpeg,
            ..RenderSettings::default()
        };
        assert_eq!(
            output_path(&artwork("lemons.jpeg"), &settings),
            PathBuf::from("out/lemons.jpg")
        );

        settings.output_name = Some("product-image".to_string());
        settings.format = OutputFormat::WebP;
        assert_eq!(
            output_path(&artwork("lemons.jpeg"), &settings),
            PathBuf::from("out/product-image-001.webp")
        );
    }

    #[test]
    fn test_render_job_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("art-images");
        std::fs::create_dir_all(&input_dir).unwrap();
        artwork_image(60, 62).save(input_dir.join("lemons.png")).unwrap();

        let settings = RenderSettings {
            canvas_width: 128,
            canvas_height: 128,
            background: BackgroundConfig::Transparent,
            input_dir,
            output_dir: dir.path().join("output-images"),
            output_name: Some("product-image".to_string()),
            format: OutputFormat::Png,
            ..RenderSettings::default()
        };

        let outcome = render_job(&artwork("lemons.png"), &settings).unwrap();
        let EncodeOutcome::Written { path, quality, .. } = outcome else {
            panic!("expected a written file");
        };
        assert_eq!(quality, 100);
        assert!(path.ends_with("output-images/product-image-001.png"));

        let rendered = image::open(&path).unwrap();
        assert_eq!(rendered.dimensions(), (128, 128));
    }

    #[test]
    fn test_render_job_missing_artwork() {
        let dir = tempfile::tempdir().unwrap();
        let settings = RenderSettings {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            ..RenderSettings::default()
        };

        let err = render_job(&artwork("missing.jpg"), &settings).unwrap_err();
        assert!(matches!(err, ImageError::LoadError { .. }));
        assert!(!dir.path().join("out").exists());
    }
}
