//! Optional post-composite transforms: grayscale and box blur.
//!
//! Both run after compositing and the final resize, in a fixed order
//! (grayscale first), and neither changes image dimensions.
//!
//! Grayscale uses integer luminance math, `(30*R + 59*G + 11*B) / 100`
//! rounded, so a second application reproduces the first exactly. Alpha
//! passes through untouched.
//!
//! The blur reads every sample from a snapshot of the pre-blur image. A
//! pixel's average must never include neighbor values the same pass already
//! overwrote; writing into a copy while reading the original guarantees
//! that.

use image::{Rgba, RgbaImage};

/// Kernel edge for [`box_blur`]: each output pixel averages a 5×5 forward
/// window clipped to the image bounds.
pub const BLUR_KERNEL: u32 = 5;

/// Independent post-processing toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Luminance-weighted desaturation.
    pub grayscale: bool,
    /// Fixed-kernel box blur.
    pub blur: bool,
}

impl RenderOptions {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Apply the requested transforms, grayscale before blur.
pub fn apply(image: &mut RgbaImage, options: RenderOptions) {
    if options.grayscale {
        grayscale(image);
    }
    if options.blur {
        *image = box_blur(image, BLUR_KERNEL);
    }
}

/// Replace each pixel's RGB with its luminance; alpha is preserved.
pub fn grayscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let y = (30 * r as u32 + 59 * g as u32 + 11 * b as u32 + 50) / 100;
        pixel.0 = [y as u8, y as u8, y as u8, a];
    }
}

/// Box-blur with a forward window of `kernel` pixels per axis.
///
/// Output pixel (x, y) is the truncated mean over `[x, x+kernel) ×
/// [y, y+kernel)` clipped to the image; edge pixels average fewer samples
/// rather than wrapping or padding. The result is fully opaque.
pub fn box_blur(image: &RgbaImage, kernel: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for sy in y..(y + kernel).min(height) {
                for sx in x..(x + kernel).min(width) {
                    let p = image.get_pixel(sx, sy).0;
                    sum[0] += p[0] as u32;
                    sum[1] += p[1] as u32;
                    sum[2] += p[2] as u32;
                    count += 1;
                }
            }
            out.put_pixel(
                x,
                y,
                Rgba([
                    (sum[0] / count) as u8,
                    (sum[1] / count) as u8,
                    (sum[2] / count) as u8,
                    0xff,
                ]),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_uses_luminance_weights() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([100, 50, 200, 128]));
        grayscale(&mut img);
        // (30*100 + 59*50 + 11*200 + 50) / 100 = (3000 + 2950 + 2200 + 50) / 100 = 82
        assert_eq!(*img.get_pixel(0, 0), Rgba([82, 82, 82, 128]));
    }

    #[test]
    fn grayscale_preserves_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([10, 200, 30, 7]));
        grayscale(&mut img);
        assert_eq!(img.get_pixel(1, 1).0[3], 7);
    }

    #[test]
    fn grayscale_is_idempotent() {
        let mut img = RgbaImage::from_fn(8, 8, |x, y| {
            Rgba([(x * 31) as u8, (y * 17) as u8, ((x + y) * 11) as u8, 255])
        });
        grayscale(&mut img);
        let once = img.clone();
        grayscale(&mut img);
        assert_eq!(img, once);
    }

    #[test]
    fn blur_preserves_dimensions() {
        let img = RgbaImage::new(37, 23);
        assert_eq!(box_blur(&img, BLUR_KERNEL).dimensions(), (37, 23));
    }

    #[test]
    fn blur_of_uniform_image_keeps_the_color() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([120, 60, 30, 255]));
        let out = box_blur(&img, BLUR_KERNEL);
        assert_eq!(*out.get_pixel(8, 8), Rgba([120, 60, 30, 255]));
        assert_eq!(*out.get_pixel(15, 15), Rgba([120, 60, 30, 255]));
    }

    #[test]
    fn blur_averages_the_forward_window() {
        // 1×6 row: [100, 0, 0, 0, 0, 0], kernel 5.
        let mut img = RgbaImage::new(6, 1);
        img.put_pixel(0, 0, Rgba([100, 100, 100, 255]));
        let out = box_blur(&img, BLUR_KERNEL);
        assert_eq!(out.get_pixel(0, 0).0[0], 20);
        assert_eq!(out.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn blur_reads_from_a_snapshot_not_its_own_output() {
        // If pixel (1, 0) saw the freshly written value of (0, 0), 20
        // instead of the original 100, its own average would be nonzero.
        let mut img = RgbaImage::new(6, 1);
        img.put_pixel(0, 0, Rgba([100, 100, 100, 255]));
        let out = box_blur(&img, BLUR_KERNEL);
        assert_eq!(out.get_pixel(1, 0).0[0], 0);
        assert_eq!(out.get_pixel(5, 0).0[0], 0);
    }

    #[test]
    fn edge_pixels_average_fewer_samples() {
        // Rightmost pixel of a 1×6 row only has itself in its window.
        let mut img = RgbaImage::new(6, 1);
        img.put_pixel(5, 0, Rgba([90, 90, 90, 255]));
        let out = box_blur(&img, BLUR_KERNEL);
        assert_eq!(out.get_pixel(5, 0).0[0], 90);
    }

    #[test]
    fn apply_combines_grayscale_and_blur() {
        // A uniform saturated red image: the combined transforms leave the
        // red luminance, fully opaque.
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        apply(
            &mut img,
            RenderOptions {
                grayscale: true,
                blur: true,
            },
        );
        // Luminance of pure red: (30*255 + 50) / 100 = 77.
        assert_eq!(*img.get_pixel(0, 0), Rgba([77, 77, 77, 255]));
    }

    #[test]
    fn apply_with_no_options_is_a_no_op() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([9, 8, 7, 6]));
        let before = img.clone();
        apply(&mut img, RenderOptions::none());
        assert_eq!(img, before);
    }
}
