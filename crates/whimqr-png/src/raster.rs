use std::io::Cursor;

use image::imageops::{resize, FilterType};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use whimqr::Symbol;

use crate::error::QrPngError;

/// Rendering parameters for a symbol raster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Foreground color as a `#RRGGBB` literal.
    pub color: String,
    /// Pixels per module in the final image.
    pub scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            scale: 20,
        }
    }
}

/// Parses a `#RRGGBB` literal into an RGB pixel.
pub fn parse_color(literal: &str) -> Result<Rgb<u8>, QrPngError> {
    let invalid = || QrPngError::InvalidColor(literal.to_owned());
    let hex = literal.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Renders a symbol one pixel per module: dark modules take the given
/// foreground color, light modules white.
pub fn rasterize(symbol: &Symbol, color: &str) -> Result<RgbImage, QrPngError> {
    let foreground = parse_color(color)?;
    let size = symbol.size as u32;
    Ok(ImageBuffer::from_fn(size, size, |x, y| {
        if symbol.get_module(x as i32, y as i32) {
            foreground
        } else {
            Rgb([255, 255, 255])
        }
    }))
}

/// Nearest-neighbour upscale that keeps module edges sharp.
pub fn scale(img: &RgbImage, factor: u32) -> RgbImage {
    resize(
        img,
        img.width() * factor,
        img.height() * factor,
        FilterType::Nearest,
    )
}

/// Renders a symbol with the given options.
pub fn render(symbol: &Symbol, options: &RenderOptions) -> Result<RgbImage, QrPngError> {
    Ok(scale(&rasterize(symbol, &options.color)?, options.scale))
}

/// Serializes an image into PNG bytes.
pub fn to_png_bytes(img: &RgbImage) -> Result<Vec<u8>, QrPngError> {
    let mut w = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone()).write_to(&mut w, ImageFormat::Png)?;
    Ok(w.into_inner())
}

#[cfg(test)]
mod should {
    use super::*;
    use whimqr::{encode, EcLevel, Mask, Version};

    fn sample() -> Symbol {
        encode(b"HELLO", Version::new(1), EcLevel::High, Mask::new(0)).unwrap()
    }

    #[test]
    fn parse_hex_color_literals() {
        assert_eq!(parse_color("#888888").unwrap(), Rgb([136, 136, 136]));
        assert_eq!(parse_color("#FF0080").unwrap(), Rgb([255, 0, 128]));
        assert!(matches!(
            parse_color("888888"),
            Err(QrPngError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("#88gg88"),
            Err(QrPngError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("#8888"),
            Err(QrPngError::InvalidColor(_))
        ));
    }

    #[test]
    fn paint_dark_modules_in_the_foreground_color() {
        let symbol = sample();
        let img = rasterize(&symbol, "#888888").unwrap();
        assert_eq!(img.dimensions(), (21, 21));
        // Finder corner is dark, the separator next to it is light
        assert_eq!(img.get_pixel(0, 0), &Rgb([136, 136, 136]));
        assert_eq!(img.get_pixel(7, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn upscale_without_blending_edges() {
        let symbol = sample();
        let img = scale(&rasterize(&symbol, "#000000").unwrap(), 4);
        assert_eq!(img.dimensions(), (84, 84));
        for (x, y) in [(0, 0), (3, 3)] {
            assert_eq!(img.get_pixel(x, y), &Rgb([0, 0, 0]));
        }
        assert_eq!(img.get_pixel(7 * 4, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn serialize_to_png_bytes() {
        let img = rasterize(&sample(), "#000000").unwrap();
        let bytes = to_png_bytes(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn round_trip_render_options_through_json() {
        let options = RenderOptions {
            color: "#888888".to_owned(),
            scale: 8,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            serde_json::from_str::<RenderOptions>(&json).unwrap(),
            options
        );
        let defaults: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, RenderOptions::default());
    }
}
