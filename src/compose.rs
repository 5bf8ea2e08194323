//! Compositing: background plus ordered layers onto one canvas.
//!
//! Compositing always happens at the native artwork resolution
//! ([`NATIVE_WIDTH`] × [`NATIVE_HEIGHT`]) and the result is resized to the
//! requested output size as the very last step. Scaling each tiny part up
//! and the finished canvas down once keeps small outputs crisp; it also
//! makes selection resolution-independent: the chosen artwork is the same
//! whether the caller asks for 64×64 or 2048×2048.
//!
//! Every stretch and the final resize use Catmull-Rom (bicubic) filtering.
//! Layers are stretched to the full canvas, not to their own size: part
//! artwork is authored edge-to-edge on a shared square, so full-canvas
//! placement is what lines the anatomy up.
//!
//! Intermediate per-layer buffers live only inside one compose call and are
//! dropped on every exit path; a failed decode mid-stack abandons the
//! canvas and propagates; a partially drawn robot is never returned.

use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Native compositing resolution, the square all artwork is authored for.
pub const NATIVE_WIDTH: u32 = 1024;
pub const NATIVE_HEIGHT: u32 = 1024;

/// Filter for every stretch and resize in the pipeline.
const STRETCH_FILTER: FilterType = FilterType::CatmullRom;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("requested output dimensions are zero")]
    ZeroDimensions,
}

/// What to paint before any layer goes down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backdrop<'a> {
    /// Leave the canvas transparent.
    None,
    /// Flood-fill with a solid color.
    Fill(Rgba<u8>),
    /// Stretch this image file over the whole canvas.
    Image(&'a Path),
}

/// Compose a single avatar: backdrop, then each layer stretched to the
/// native canvas in the given order, then one resize to `width` × `height`.
pub fn compose(
    backdrop: Backdrop<'_>,
    layers: &[PathBuf],
    width: u32,
    height: u32,
) -> Result<RgbaImage, ComposeError> {
    if width == 0 || height == 0 {
        return Err(ComposeError::ZeroDimensions);
    }

    let mut canvas = paint_backdrop(NATIVE_WIDTH, NATIVE_HEIGHT, backdrop)?;
    for layer in layers {
        let art = load_rgba(layer)?;
        let stretched = imageops::resize(&art, NATIVE_WIDTH, NATIVE_HEIGHT, STRETCH_FILTER);
        imageops::overlay(&mut canvas, &stretched, 0, 0);
    }

    Ok(resize_to(canvas, width, height))
}

/// Allocate a `width` × `height` canvas with the backdrop painted.
///
/// Also the first step of an armada scene, which assembles at the requested
/// size directly instead of going through the native square.
pub fn paint_backdrop(
    width: u32,
    height: u32,
    backdrop: Backdrop<'_>,
) -> Result<RgbaImage, ComposeError> {
    if width == 0 || height == 0 {
        return Err(ComposeError::ZeroDimensions);
    }
    match backdrop {
        Backdrop::None => Ok(RgbaImage::new(width, height)),
        Backdrop::Fill(color) => Ok(RgbaImage::from_pixel(width, height, color)),
        Backdrop::Image(path) => {
            let art = load_rgba(path)?;
            let mut canvas = RgbaImage::new(width, height);
            let stretched = imageops::resize(&art, width, height, STRETCH_FILTER);
            imageops::overlay(&mut canvas, &stretched, 0, 0);
            Ok(canvas)
        }
    }
}

/// Place `top` onto `canvas` at the given offset, alpha-blended. Negative
/// offsets clip at the canvas edge.
pub fn overlay_at(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, top, x, y);
}

/// One final resize, skipped when the canvas is already the right size.
pub fn resize_to(canvas: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if canvas.dimensions() == (width, height) {
        canvas
    } else {
        imageops::resize(&canvas, width, height, STRETCH_FILTER)
    }
}

/// Load and decode an artwork file into RGBA.
fn load_rgba(path: &Path) -> Result<RgbaImage, ComposeError> {
    let img = ImageReader::open(path)
        .map_err(ComposeError::Io)?
        .decode()
        .map_err(|source| ComposeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(img.to_rgba8())
}
