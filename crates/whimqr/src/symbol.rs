use crate::bit_buffer::{get_bit, BitBuffer, BitOrder};
use crate::block::{Block, BlockLayout};
use crate::ec_level::EcLevel;
use crate::error::QrError;
use crate::gf;
use crate::mask::Mask;
use crate::mode::{self, EncodingMode};
use crate::version::Version;

/// A finished QR symbol together with the codeword streams it was built
/// from.
///
/// Instances are immutable; the perturbation operations in this crate
/// produce a fresh `Symbol` from an existing one instead of editing in
/// place. The module grid is fully resolved (every cell dark or light) and
/// the reserved grid marks the function-pattern, format, version and timing
/// cells that masking never touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The version number, between 1 and 40 (inclusive).
    pub version: Version,

    /// The width and height in modules, equal to version * 4 + 17.
    pub size: i32,

    /// The error correction level used in this symbol.
    pub ec_level: EcLevel,

    /// The mask pattern applied to the data region.
    pub mask: Mask,

    /// Data codewords, concatenated in block declaration order.
    pub data_codewords: Vec<u8>,

    /// Reed-Solomon parity codewords, concatenated in block order.
    pub ec_codewords: Vec<u8>,

    /// The transmitted stream: data interleaved across blocks, then parity
    /// interleaved across blocks.
    pub interleaved: Vec<u8>,

    // Module grid (false = light, true = dark), row-major size*size.
    modules: Vec<bool>,

    // Cells that belong to function patterns and are exempt from masking.
    reserved: Vec<bool>,
}

/// Encodes a byte payload into a complete symbol at the given version,
/// error correction level and mask pattern.
pub fn encode(
    payload: &[u8],
    version: Version,
    ec_level: EcLevel,
    mask: Mask,
) -> Result<Symbol, QrError> {
    Symbol::encode(payload, version, ec_level, mask)
}

impl Symbol {
    /// Builds a symbol from a byte payload.
    ///
    /// The pipeline is: mode analysis, mode indicator and character count
    /// header, payload bits, terminator, byte alignment, filler codewords,
    /// block split with Reed-Solomon parity, interleave, matrix
    /// construction. Fails with `DataOverCapacity` when the payload does
    /// not fit the chosen version and level.
    pub fn encode(
        payload: &[u8],
        version: Version,
        ec_level: EcLevel,
        mask: Mask,
    ) -> Result<Self, QrError> {
        let mode = mode::analyze(payload);
        if mode != EncodingMode::Byte {
            return Err(QrError::UnsupportedMode(mode));
        }
        let layout = BlockLayout::for_params(version, ec_level)?;
        let capacity = layout.data_len() * 8;
        let count_bits = mode.char_count_bits(version);
        let datalen = 4 + usize::from(count_bits) + payload.len() * 8;
        if datalen > capacity {
            return Err(QrError::DataOverCapacity { datalen, capacity });
        }

        let mut bb = BitBuffer::new();
        bb.append_bits(mode.mode_bits(), 4);
        bb.append_bits(payload.len() as u32, count_bits);
        bb.append_bytes(payload);
        debug_assert_eq!(bb.len(), datalen);

        // Terminator, then zero bits up to the next byte boundary
        bb.append_bits(0, std::cmp::min(4, capacity - bb.len()) as u8);
        bb.append_bits(0, (bb.len().wrapping_neg() & 7) as u8);

        // Alternating filler bytes until the data capacity is reached
        let mut data = bb.to_bytes();
        for &filler in [0xEC, 0x11].iter().cycle() {
            if data.len() >= layout.data_len() {
                break;
            }
            data.push(filler);
        }

        let blocks = layout.split(&data);
        Self::from_blocks(version, ec_level, mask, &layout, &blocks)
    }

    // Assembles a symbol from already-split blocks. Shared by the encoder
    // and by the perturbation rebuild paths, which supply blocks whose
    // parity intentionally does not match their data.
    pub(crate) fn from_blocks(
        version: Version,
        ec_level: EcLevel,
        mask: Mask,
        layout: &BlockLayout,
        blocks: &[Block],
    ) -> Result<Self, QrError> {
        let data_codewords: Vec<u8> = blocks.iter().flat_map(|b| b.data.iter().copied()).collect();
        let ec_codewords: Vec<u8> = blocks.iter().flat_map(|b| b.parity.iter().copied()).collect();
        let interleaved = layout.interleave(blocks);
        let (modules, reserved) = MatrixBuilder::build(version, ec_level, mask, &interleaved)?;
        Ok(Self {
            version,
            size: version.side_length(),
            ec_level,
            mask,
            data_codewords,
            ec_codewords,
            interleaved,
            modules,
            reserved,
        })
    }

    /// Returns the color of the module at the given coordinates, `false`
    /// for light or `true` for dark.
    ///
    /// The top left corner has the coordinates (x=0, y=0). Out-of-bounds
    /// coordinates read as light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y) && self.module(x, y)
    }

    /// Whether the cell belongs to a function pattern, the format or
    /// version fields, and is therefore exempt from masking.
    pub fn is_reserved(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.reserved[(y * self.size + x) as usize]
    }

    /// The module grid as rows of 0 (light) and 1 (dark).
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|y| (0..self.size).map(|x| u8::from(self.module(x, y))).collect())
            .collect()
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[(y * self.size + x) as usize]
    }
}

// Draws the module and reserved grids for one symbol.
struct MatrixBuilder {
    size: i32,
    version: Version,
    modules: Vec<bool>,
    reserved: Vec<bool>,
}

impl MatrixBuilder {
    // Produces the (modules, reserved) grids for the given parameters and
    // interleaved codeword stream.
    fn build(
        version: Version,
        ec_level: EcLevel,
        mask: Mask,
        stream: &[u8],
    ) -> Result<(Vec<bool>, Vec<bool>), QrError> {
        let size = version.side_length();
        let cells = (size * size) as usize;
        let mut builder = Self {
            size,
            version,
            modules: vec![false; cells],
            reserved: vec![false; cells],
        };
        builder.draw_function_patterns(ec_level, mask);
        let placed = builder.draw_codewords(stream);
        let expected = stream.len() * 8;
        if placed != expected {
            return Err(QrError::MatrixUnderfilled { placed, expected });
        }
        builder.apply_mask(mask);
        Ok((builder.modules, builder.reserved))
    }

    fn module_mut(&mut self, x: i32, y: i32) -> &mut bool {
        &mut self.modules[(y * self.size + x) as usize]
    }

    // Sets the color of a module and marks it as reserved.
    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        *self.module_mut(x, y) = isdark;
        self.reserved[(y * self.size + x) as usize] = true;
    }

    // Draws and reserves all function modules: timing, finders, alignment,
    // format, version. The format word is written with the final mask value
    // here; masking skips reserved cells, so no rewrite pass is needed.
    fn draw_function_patterns(&mut self, ec_level: EcLevel, mask: Mask) {
        let size = self.size;

        // Timing patterns; the finder stamps overwrite their outer ends
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        // Three finder patterns with their separators
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        // Alignment patterns on every center pair except the finder corners
        let positions = self.alignment_pattern_positions();
        let numalign = positions.len();
        for i in 0..numalign {
            for j in 0..numalign {
                if !(i == 0 && j == 0 || i == 0 && j == numalign - 1 || i == numalign - 1 && j == 0)
                {
                    self.draw_alignment_pattern(positions[i], positions[j]);
                }
            }
        }

        self.draw_format_bits(ec_level, mask);
        self.draw_version();
    }

    // Draws two copies of the format word (EC bits, mask bits, BCH parity,
    // fixed XOR pattern), least significant bit first along the
    // standardized tracks, plus the fixed dark module.
    fn draw_format_bits(&mut self, ec_level: EcLevel, mask: Mask) {
        let data = u32::from(ec_level.format_bits() << 3 | mask.value());
        let bits = (data << 10 | gf::bch_remainder(data, gf::G15, 10)) ^ gf::FORMAT_MASK;
        debug_assert_eq!(bits >> 15, 0);

        // First copy, around the top-left finder
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        // Second copy, split between the other two finders
        let size = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true); // Always dark
    }

    // Draws two copies of the version word (6 version bits plus 12 BCH
    // parity bits) as 6x3 stripes, iff 7 <= version <= 40.
    fn draw_version(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let data = u32::from(self.version.value());
        let bits = data << 12 | gf::bch_remainder(data, gf::G18, 12);
        debug_assert_eq!(bits >> 18, 0);

        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    // Draws a 9*9 finder pattern including the border separator, with the
    // center module at (x, y). Modules can be out of bounds.
    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let xx = x + dx;
                let yy = y + dy;
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist = std::cmp::max(dx.abs(), dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    // Draws a 5*5 alignment pattern with the center module at (x, y).
    // All modules must be in bounds.
    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, std::cmp::max(dx.abs(), dy.abs()) != 1);
            }
        }
    }

    // Ascending list of alignment pattern center positions for this
    // version, used on both axes.
    fn alignment_pattern_positions(&self) -> Vec<i32> {
        let ver = self.version.value();
        if ver == 1 {
            Vec::new()
        } else {
            let numalign = i32::from(ver) / 7 + 2;
            let step: i32 = if ver == 32 {
                26
            } else {
                (i32::from(ver) * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
            };
            let mut result: Vec<i32> = (0..numalign - 1)
                .map(|i| self.size - 7 - i * step)
                .collect();
            result.push(6);
            result.reverse();
            result
        }
    }

    // Places the interleaved stream, most significant bit of each codeword
    // first, along the two-wide upward/downward zigzag that skips column 6.
    // Unreserved cells beyond the stream's end stay light (remainder bits).
    // Returns the number of bits placed.
    fn draw_codewords(&mut self, stream: &[u8]) -> usize {
        let bits = BitBuffer::from_bytes(stream, BitOrder::Msb).0;
        let mut i = 0;
        let mut right = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { self.size - 1 - vert } else { vert };
                    if !self.reserved[(y * self.size + x) as usize] && i < bits.len() {
                        *self.module_mut(x, y) = bits[i];
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        i
    }

    // XORs every non-reserved module with the mask predicate.
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let flip = mask.invert(y, x) && !self.reserved[(y * self.size + x) as usize];
                *self.module_mut(x, y) ^= flip;
            }
        }
    }
}
