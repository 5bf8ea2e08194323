//! Shared test utilities for the hexbot test suite.
//!
//! Builds small on-disk catalogs out of tiny generated PNGs so full-pipeline
//! tests can run against a real [`DirCatalog`](crate::catalog::DirCatalog)
//! in a temp directory. Part files are solid colors with transparent
//! regions laid out so that draw order is observable from single pixel
//! probes.

use image::{Rgba, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

/// Write a solid-color PNG.
pub fn write_png(path: &Path, color: Rgba<u8>, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(width, height, color)
        .save(path)
        .unwrap();
}

/// Write a PNG that is `color` where `opaque(x, y)` holds and fully
/// transparent elsewhere.
pub fn write_region_png(
    path: &Path,
    color: Rgba<u8>,
    width: u32,
    height: u32,
    opaque: impl Fn(u32, u32) -> bool,
) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if opaque(x, y) { color } else { Rgba([0, 0, 0, 0]) }
    });
    img.save(path).unwrap();
}

/// Colors used by the [`stub_catalog`] artwork, for pixel probes.
pub const HEAD_COLOR: Rgba<u8> = Rgba([0, 160, 0, 255]);
pub const EYES_COLOR: Rgba<u8> = Rgba([0, 0, 200, 255]);
pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([220, 30, 30, 255]);

/// One part set with two categories and one background set with one file:
///
/// ```text
/// sets/bots/0#head/0#01head.png     head color on the left half
/// sets/bots/1#eyes/0#02eyes.png     eyes color on the top-left quadrant
/// backgrounds/plain/0-solid.png     background color everywhere
/// ```
///
/// Layer keys sort the head (`01…`) under the eyes (`02…`). After a
/// background render the probe picture is: top-left quadrant = eyes,
/// bottom-left = head, right half = background.
pub fn stub_catalog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_region_png(
        &root.join("sets/bots/0#head/0#01head.png"),
        HEAD_COLOR,
        64,
        64,
        |x, _| x < 32,
    );
    write_region_png(
        &root.join("sets/bots/1#eyes/0#02eyes.png"),
        EYES_COLOR,
        64,
        64,
        |x, y| x < 32 && y < 32,
    );
    write_png(
        &root.join("backgrounds/plain/0-solid.png"),
        BACKGROUND_COLOR,
        64,
        64,
    );
    tmp
}

/// A larger catalog: two part sets (the canonical one with two colors),
/// multiple files per category, two background sets.
pub fn full_catalog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    for color in ["blue", "green"] {
        let tint = if color == "blue" {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([0, 255, 0, 255])
        };
        for (i, file) in ["0#01head-a.png", "1#01head-b.png"].iter().enumerate() {
            write_region_png(
                &root.join(format!("sets/robots/{color}/0#head/{file}")),
                tint,
                64,
                64,
                move |x, _| x < 32 + i as u32,
            );
        }
        write_region_png(
            &root.join(format!("sets/robots/{color}/1#eyes/0#02eyes.png")),
            Rgba([255, 255, 0, 255]),
            64,
            64,
            |x, y| x < 32 && y < 32,
        );
    }

    write_region_png(
        &root.join("sets/squids/0#head/0#01head.png"),
        Rgba([255, 0, 255, 255]),
        64,
        64,
        |x, _| x < 32,
    );
    write_region_png(
        &root.join("sets/squids/1#eyes/0#02eyes.png"),
        Rgba([0, 255, 255, 255]),
        64,
        64,
        |x, y| x < 32 && y < 32,
    );

    write_png(
        &root.join("backgrounds/plain/0-solid.png"),
        Rgba([64, 64, 64, 255]),
        64,
        64,
    );
    write_png(
        &root.join("backgrounds/stars/0-field.png"),
        Rgba([16, 16, 48, 255]),
        64,
        64,
    );

    tmp
}
