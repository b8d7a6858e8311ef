use crate::ec_level::EcLevel;
use crate::error::QrError;
use crate::gf;
use crate::version::Version;
use crate::{ECC_CODEWORDS_PER_BLOCK, NUM_ERROR_CORRECTION_BLOCKS};

/// One run of equally-sized blocks in a version's layout. When a version
/// mixes two block sizes, the shorter run is declared first and the long
/// run's blocks carry one extra data codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    pub count: usize,
    pub total_per_block: usize,
    pub data_per_block: usize,
}

/// The Reed-Solomon block structure of one (version, EC level) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    version: Version,
    groups: Vec<BlockGroup>,
    parity_per_block: usize,
}

/// A block's data codewords together with its Reed-Solomon parity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub data: Vec<u8>,
    pub parity: Vec<u8>,
}

// Returns the number of data bits that can be stored in a symbol of the
// given version after all function modules are excluded. This includes
// remainder bits, so it might not be a multiple of 8.
pub(crate) fn num_raw_data_modules(ver: Version) -> usize {
    let ver = usize::from(ver.value());
    let mut result: usize = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign: usize = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    debug_assert!((208..=29648).contains(&result));
    result
}

impl BlockLayout {
    /// Derives the block structure for the given parameters from the
    /// per-version tables and the raw codeword budget, cross-checking that
    /// the two agree.
    pub fn for_params(version: Version, ec_level: EcLevel) -> Result<Self, QrError> {
        let row = ec_level.ordinal();
        let col = usize::from(version.value());
        let numblocks = NUM_ERROR_CORRECTION_BLOCKS[row][col] as usize;
        let parity_per_block = ECC_CODEWORDS_PER_BLOCK[row][col] as usize;
        let raw_codewords = num_raw_data_modules(version) / 8;

        let short_total = raw_codewords / numblocks;
        let num_long = raw_codewords % numblocks;
        let num_short = numblocks - num_long;
        if short_total <= parity_per_block {
            return Err(QrError::TableMismatch {
                version: version.value(),
                expected: raw_codewords,
                actual: numblocks * parity_per_block,
            });
        }

        let mut groups = Vec::with_capacity(2);
        if num_short > 0 {
            groups.push(BlockGroup {
                count: num_short,
                total_per_block: short_total,
                data_per_block: short_total - parity_per_block,
            });
        }
        if num_long > 0 {
            groups.push(BlockGroup {
                count: num_long,
                total_per_block: short_total + 1,
                data_per_block: short_total + 1 - parity_per_block,
            });
        }

        let layout = Self {
            version,
            groups,
            parity_per_block,
        };
        if layout.total_len() != raw_codewords {
            return Err(QrError::TableMismatch {
                version: version.value(),
                expected: raw_codewords,
                actual: layout.total_len(),
            });
        }
        Ok(layout)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn groups(&self) -> &[BlockGroup] {
        &self.groups
    }

    pub fn block_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Total data codewords across all blocks.
    pub fn data_len(&self) -> usize {
        self.groups.iter().map(|g| g.count * g.data_per_block).sum()
    }

    /// Total codewords, data and parity, across all blocks.
    pub fn total_len(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.count * g.total_per_block)
            .sum()
    }

    /// Parity codewords per block; uniform across both groups.
    pub fn parity_per_block(&self) -> usize {
        self.parity_per_block
    }

    /// The per-block correction limit `t`: up to `t` wrong codewords in a
    /// block are recovered by the scanner.
    pub fn correction_capacity(&self) -> usize {
        self.parity_per_block / 2
    }

    /// Data codeword count of every block, in declaration order.
    pub fn data_lengths(&self) -> Vec<usize> {
        let mut lengths = Vec::with_capacity(self.block_count());
        for group in &self.groups {
            lengths.extend(std::iter::repeat(group.data_per_block).take(group.count));
        }
        lengths
    }

    /// Splits a full data stream into blocks and computes each block's
    /// Reed-Solomon parity.
    pub fn split(&self, data: &[u8]) -> Vec<Block> {
        debug_assert_eq!(data.len(), self.data_len());
        let generator = gf::rs_generator(self.parity_per_block);
        let mut blocks = Vec::with_capacity(self.block_count());
        let mut k = 0;
        for len in self.data_lengths() {
            let dat = data[k..k + len].to_vec();
            k += len;
            let parity = gf::rs_remainder(&dat, &generator);
            blocks.push(Block { data: dat, parity });
        }
        blocks
    }

    /// Produces the transmitted codeword stream: data codewords column-major
    /// across blocks (short blocks simply have no cell in the last column),
    /// then parity codewords column-major across blocks.
    pub fn interleave(&self, blocks: &[Block]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len());
        let columns = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
        for col in 0..columns {
            for block in blocks {
                if let Some(&cw) = block.data.get(col) {
                    out.push(cw);
                }
            }
        }
        for col in 0..self.parity_per_block {
            for block in blocks {
                out.push(block.parity[col]);
            }
        }
        out
    }

    /// Inverse of `interleave`: recovers per-block data and parity from a
    /// transmitted stream of `total_len` codewords.
    pub fn deinterleave(&self, stream: &[u8]) -> Result<Vec<Block>, QrError> {
        if stream.len() != self.total_len() {
            return Err(QrError::StreamLengthMismatch {
                left: stream.len(),
                right: self.total_len(),
            });
        }
        let lengths = self.data_lengths();
        let mut blocks: Vec<Block> = lengths
            .iter()
            .map(|&len| Block {
                data: Vec::with_capacity(len),
                parity: Vec::with_capacity(self.parity_per_block),
            })
            .collect();
        let mut cursor = stream.iter();
        let columns = lengths.iter().copied().max().unwrap_or(0);
        for col in 0..columns {
            for (block, &len) in blocks.iter_mut().zip(&lengths) {
                if col < len {
                    block.data.push(*cursor.next().expect("stream length checked"));
                }
            }
        }
        for _ in 0..self.parity_per_block {
            for block in &mut blocks {
                block.parity.push(*cursor.next().expect("stream length checked"));
            }
        }
        Ok(blocks)
    }
}
