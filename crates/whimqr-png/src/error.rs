use image::ImageError;
use thiserror::Error;
use whimqr::QrError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrPngError {
    #[error("image error: {0}")]
    Image(#[from] ImageError),

    #[error("qr error: {0}")]
    Qr(#[from] QrError),

    #[error("invalid color literal {0:?}, expected \"#RRGGBB\"")]
    InvalidColor(String),

    #[error("image dimensions differ: {0}x{1} vs {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),
}
