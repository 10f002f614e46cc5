//! QR code generation for the public menu URL.
//!
//! Encodes at error correction level H so venue logos or print damage do not
//! break scanning. The `qrcode` crate produces the module matrix; drawing and
//! coloring happen here so the quiet-zone margin and module colors follow the
//! config.

use crate::config::QrConfig;
use image::{Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(String),
    #[error("Invalid color {0:?}")]
    BadColor(String),
}

/// Render `text` as a colored QR bitmap, `options.width` pixels square.
pub fn encode(text: &str, options: &QrConfig) -> Result<RgbImage, QrError> {
    let dark = parse_hex(&options.dark)?;
    let light = parse_hex(&options.light)?;

    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)
        .map_err(|e| QrError::Encode(e.to_string()))?;

    let modules = code.width();
    let total = modules + 2 * options.margin as usize;
    let module_px = ((options.width as usize / total).max(1)) as u32;
    let canvas = total as u32 * module_px;

    let mut image = RgbImage::from_pixel(canvas, canvas, light);
    for y in 0..modules {
        for x in 0..modules {
            if code[(x, y)] != qrcode::Color::Dark {
                continue;
            }
            let px = (options.margin as usize + x) as u32 * module_px;
            let py = (options.margin as usize + y) as u32 * module_px;
            for dy in 0..module_px {
                for dx in 0..module_px {
                    image.put_pixel(px + dx, py + dy, dark);
                }
            }
        }
    }

    // Module size is a whole number of pixels, so the canvas can land under
    // the requested width; scale up to the exact size.
    if canvas != options.width {
        image = image::imageops::resize(
            &image,
            options.width,
            options.width,
            image::imageops::FilterType::Nearest,
        );
    }
    Ok(image)
}

fn parse_hex(value: &str) -> Result<Rgb<u8>, QrError> {
    let bad = || QrError::BadColor(value.to_string());
    let digits = value.strip_prefix('#').ok_or_else(bad)?;
    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(bad()),
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| bad());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> QrConfig {
        QrConfig::default()
    }

    #[test]
    fn encodes_at_requested_width() {
        let image = encode("https://livebar.example/menu", &options()).unwrap();
        assert_eq!(image.width(), 600);
        assert_eq!(image.height(), 600);
    }

    #[test]
    fn margin_corner_uses_light_color() {
        let image = encode("https://livebar.example/menu", &options()).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgb([0xff, 0xff, 0xff]));
    }

    #[test]
    fn modules_use_dark_color() {
        let image = encode("https://livebar.example/menu", &options()).unwrap();
        let dark = Rgb([0x8b, 0x5c, 0xf6]);
        assert!(image.pixels().any(|p| *p == dark));
    }

    #[test]
    fn zero_margin_starts_with_finder_pattern() {
        let mut opts = options();
        opts.margin = 0;
        let image = encode("x", &opts).unwrap();
        // Top-left finder pattern corner is a dark module.
        assert_eq!(*image.get_pixel(0, 0), Rgb([0x8b, 0x5c, 0xf6]));
    }

    #[test]
    fn short_hex_colors_accepted() {
        let mut opts = options();
        opts.dark = "#f0f".to_string();
        let image = encode("x", &opts).unwrap();
        assert!(image.pixels().any(|p| *p == Rgb([0xff, 0x00, 0xff])));
    }

    #[test]
    fn bad_color_is_rejected() {
        let mut opts = options();
        opts.dark = "purple".to_string();
        let err = encode("x", &opts).unwrap_err();
        assert!(matches!(err, QrError::BadColor(_)));
    }
}
