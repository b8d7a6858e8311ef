use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::QrPngError;

/// Per-channel average of two equal-sized images.
///
/// Used to fold the two variants of a mixed symbol into one picture: pixels
/// where the variants agree keep their color, and the single ambiguous
/// module lands halfway between dark and light.
pub fn blend(a: &RgbImage, b: &RgbImage) -> Result<RgbImage, QrPngError> {
    if a.dimensions() != b.dimensions() {
        return Err(QrPngError::DimensionMismatch(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }
    Ok(ImageBuffer::from_fn(a.width(), a.height(), |x, y| {
        let pa = a.get_pixel(x, y);
        let pb = b.get_pixel(x, y);
        Rgb([
            midpoint(pa[0], pb[0]),
            midpoint(pa[1], pb[1]),
            midpoint(pa[2], pb[2]),
        ])
    }))
}

fn midpoint(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b)) / 2) as u8
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn average_each_channel() {
        let a = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let b = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        let mixed = blend(&a, &b).unwrap();
        assert_eq!(mixed.get_pixel(0, 0), &Rgb([127, 127, 127]));
    }

    #[test]
    fn keep_agreeing_pixels_unchanged() {
        let a = RgbImage::from_pixel(1, 1, Rgb([136, 10, 200]));
        let mixed = blend(&a, &a.clone()).unwrap();
        assert_eq!(mixed.get_pixel(0, 0), &Rgb([136, 10, 200]));
    }

    #[test]
    fn reject_mismatched_dimensions() {
        let a = RgbImage::new(2, 2);
        let b = RgbImage::new(3, 2);
        assert!(matches!(
            blend(&a, &b),
            Err(QrPngError::DimensionMismatch(2, 2, 3, 2))
        ));
    }
}
