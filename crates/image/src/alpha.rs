//! Alpha compositing helpers.

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

/// Blend a solid color over `dst` with the given opacity (source-over).
pub fn blend_over(dst: &mut Rgba<u8>, color: [u8; 3], alpha: f64) {
    let src_a = alpha.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let Rgba([r, g, b, a]) = *dst;
    let dst_a = a as f64 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let channel = |src: u8, dst: u8| -> u8 {
        let value = (src as f64 * src_a + dst as f64 * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };

    *dst = Rgba([
        channel(color[0], r),
        channel(color[1], g),
        channel(color[2], b),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Drop the alpha channel by compositing over a solid background.
///
/// Used before encoding to formats without transparency such as JPEG.
pub fn flatten_alpha(img: &DynamicImage, background: [u8; 3]) -> DynamicImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let output = ImageBuffer::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);

        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let mix = |c: u8, bg: u8| ((c as f32 * alpha) + (bg as f32 * inv_alpha)).round() as u8;

        Rgb([mix(r, background[0]), mix(g, background[1]), mix(b, background[2])])
    });

    DynamicImage::ImageRgb8(output)
}
