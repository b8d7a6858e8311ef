//! Builds QR Code symbols and deliberately spends their spare error
//! correction capacity.
//!
//! The encoder covers the QR Code Model 2 standard for byte mode: all 40
//! versions, all 4 error correction levels, and a caller-chosen mask
//! pattern. On top of a finished symbol two codeword-level tricks are
//! offered:
//!
//! - Block randomization: scramble the leading data codewords of a block
//!   right up to the Reed-Solomon correction limit while keeping the
//!   original parity. The symbol still scans as the original payload, and
//!   the headroom left over lets a caller paste a camouflage texture over
//!   one more module.
//! - Stream mixing: weave the codeword streams of two payloads that sit
//!   `2t + 1` codewords apart into a pair of symbols identical everywhere
//!   except one module whose two interpretations are a single bit apart.
//!   Printed as a mid-gray pixel, that module leaves the symbol decodable
//!   as either payload.
//!
//! # Examples
//!
//! ```
//! use whimqr::{encode, EcLevel, Mask, Version};
//!
//! let symbol = encode(b"http://example.com", Version::new(4), EcLevel::High, Mask::new(0))?;
//! assert_eq!(symbol.size, 33);
//!
//! let mut rng = rand::rng();
//! let capacity = symbol.correction_capacity()?;
//! let scrambled = symbol.with_randomized_block(0, capacity, &mut rng)?;
//! assert_eq!(scrambled.ec_codewords, symbol.ec_codewords);
//! # Ok::<(), whimqr::QrError>(())
//! ```

mod bit_buffer;
mod block;
mod ec_level;
mod error;
pub mod gf;
mod mask;
mod mode;
mod perturb;
mod symbol;
mod version;

pub use bit_buffer::*;
pub use block::{Block, BlockGroup, BlockLayout};
pub use ec_level::*;
pub use error::*;
pub use mask::*;
pub use mode::*;
pub use perturb::*;
pub use symbol::*;
pub use version::*;

/*---- Constants and tables ----*/

pub static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Version: (note that index 0 is for padding, and is set to an illegal value)
    //0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40    Error correction level
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

pub static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // Version: (note that index 0 is for padding, and is set to an illegal value)
    //0, 1, 2, 3, 4, 5, 6, 7, 8, 9,10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40    Error correction level
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];
