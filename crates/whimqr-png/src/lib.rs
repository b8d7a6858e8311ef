//! Image output for `whimqr` symbols.
//!
//! Renders module grids as RGB images with a caller-chosen foreground
//! color, upscales them without smoothing, and provides the two image
//! operations the perturbation products need: per-channel blending of a
//! mixed symbol's variants, and a Bayer-style camouflage tile that can be
//! stamped over a module of a randomized symbol.

mod blend;
mod error;
mod raster;
mod texture;

pub use blend::*;
pub use error::*;
pub use raster::*;
pub use texture::*;
