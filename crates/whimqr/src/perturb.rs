//! Codeword-level operations that spend a finished symbol's spare error
//! correction budget.
//!
//! `Symbol::with_randomized_block` scrambles the head of one block while
//! keeping the original parity, so a scanner corrects the block back to the
//! payload it was encoded from. `diff` and `mix` compare and weave two full
//! codeword streams; `mix` is the half of the trick that makes one module
//! ambiguous between two decodable symbols.

use rand::Rng;

use crate::block::{Block, BlockLayout};
use crate::error::QrError;
use crate::symbol::Symbol;

/// Codeword Hamming distance between two streams, compared positionwise.
pub fn diff(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(ca, cb)| ca != cb).count()
}

/// The woven pair produced by [`mix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mixed {
    /// Stream within correction distance of the first input.
    pub left: Vec<u8>,
    /// Stream within correction distance of the second input.
    pub right: Vec<u8>,
    /// Index of the single codeword where `left` and `right` disagree; the
    /// two bytes there are exactly one bit apart.
    pub pivot: usize,
}

/// Weaves two codeword streams that differ in `2 * capacity + 1` positions
/// into a `left`/`right` pair sharing every codeword except one pivot.
///
/// The pivot is the first differing position whose bytes are one bit apart.
/// Of the remaining differing positions, the first `capacity` take the
/// first stream's codeword in both outputs and the rest take the second
/// stream's, so `left` stays within `capacity` errors of `a` and `right`
/// within `capacity` errors of `b`. Fails with `NoMixablePivot` when no
/// differing position is a single-bit flip.
pub fn mix(a: &[u8], b: &[u8], capacity: usize) -> Result<Mixed, QrError> {
    if a.len() != b.len() {
        return Err(QrError::StreamLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let mut left = Vec::with_capacity(a.len());
    let mut right = Vec::with_capacity(a.len());
    let mut pivot = None;
    let mut count = 0usize;
    for (i, (&ca, &cb)) in a.iter().zip(b).enumerate() {
        if ca == cb {
            left.push(ca);
            right.push(ca);
        } else if pivot.is_none() && (ca ^ cb).count_ones() == 1 {
            pivot = Some(i);
            left.push(ca);
            right.push(cb);
        } else {
            let keep = if count < capacity { ca } else { cb };
            left.push(keep);
            right.push(keep);
            count += 1;
        }
    }
    match pivot {
        Some(pivot) => Ok(Mixed { left, right, pivot }),
        None => Err(QrError::NoMixablePivot),
    }
}

impl Symbol {
    /// The per-block correction limit `t` for this symbol's parameters.
    pub fn correction_capacity(&self) -> Result<usize, QrError> {
        Ok(BlockLayout::for_params(self.version, self.ec_level)?.correction_capacity())
    }

    /// Number of Reed-Solomon blocks in this symbol.
    pub fn block_count(&self) -> Result<usize, QrError> {
        Ok(BlockLayout::for_params(self.version, self.ec_level)?.block_count())
    }

    /// Returns a symbol whose block `index` has its first `n` data
    /// codewords replaced by uniformly drawn different bytes.
    ///
    /// The parity codewords are deliberately left as computed for the
    /// original data, so a scanner's error correction recovers the original
    /// payload as long as `n` stays within the block's correction limit.
    pub fn with_randomized_block<R: Rng + ?Sized>(
        &self,
        index: usize,
        n: usize,
        rng: &mut R,
    ) -> Result<Symbol, QrError> {
        let layout = BlockLayout::for_params(self.version, self.ec_level)?;
        let lengths = layout.data_lengths();
        if index >= lengths.len() {
            return Err(QrError::BlockIndexOutOfRange {
                index,
                count: lengths.len(),
            });
        }
        if n > lengths[index] {
            return Err(QrError::RandomizedPrefixTooLong {
                n,
                len: lengths[index],
            });
        }

        let start: usize = lengths[..index].iter().sum();
        let mut data = self.data_codewords.clone();
        for cw in &mut data[start..start + n] {
            *cw = loop {
                let candidate: u8 = rng.random();
                if candidate != *cw {
                    break candidate;
                }
            };
        }

        let blocks = rebind_parity(&lengths, layout.parity_per_block(), &data, &self.ec_codewords);
        Symbol::from_blocks(self.version, self.ec_level, self.mask, &layout, &blocks)
    }

    /// Returns a symbol rebuilt from a caller-supplied interleaved stream,
    /// keeping this symbol's version, level and mask.
    pub fn with_codeword_stream(&self, stream: &[u8]) -> Result<Symbol, QrError> {
        let layout = BlockLayout::for_params(self.version, self.ec_level)?;
        let blocks = layout.deinterleave(stream)?;
        Symbol::from_blocks(self.version, self.ec_level, self.mask, &layout, &blocks)
    }
}

// Pairs a mutated data stream back up with the parity it is meant to keep.
fn rebind_parity(
    lengths: &[usize],
    parity_per_block: usize,
    data: &[u8],
    parity: &[u8],
) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(lengths.len());
    let mut k = 0;
    for (&len, chunk) in lengths.iter().zip(parity.chunks(parity_per_block)) {
        blocks.push(Block {
            data: data[k..k + len].to_vec(),
            parity: chunk.to_vec(),
        });
        k += len;
    }
    blocks
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::ec_level::EcLevel;
    use crate::mask::Mask;
    use crate::symbol::encode;
    use crate::version::Version;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn url_symbol() -> Symbol {
        encode(
            b"http://example.com",
            Version::new(4),
            EcLevel::High,
            Mask::new(0),
        )
        .unwrap()
    }

    #[test]
    fn count_differing_codewords() {
        assert_eq!(diff(&[1, 2, 3], &[1, 2, 3]), 0);
        assert_eq!(diff(&[1, 2, 3], &[1, 9, 9]), 2);
    }

    #[test]
    fn randomize_only_the_requested_prefix() {
        let symbol = url_symbol();
        let mut rng = StdRng::seed_from_u64(7);
        let scrambled = symbol.with_randomized_block(0, 8, &mut rng).unwrap();

        for i in 0..8 {
            assert_ne!(scrambled.data_codewords[i], symbol.data_codewords[i]);
        }
        assert_eq!(&scrambled.data_codewords[8..], &symbol.data_codewords[8..]);
        assert_eq!(scrambled.ec_codewords, symbol.ec_codewords);
        assert_eq!(diff(&scrambled.interleaved, &symbol.interleaved), 8);
        assert_eq!(scrambled.version, symbol.version);
        assert_eq!(scrambled.mask, symbol.mask);
    }

    #[test]
    fn randomize_a_middle_block_without_touching_neighbours() {
        let symbol = url_symbol();
        let mut rng = StdRng::seed_from_u64(11);
        let scrambled = symbol.with_randomized_block(2, 3, &mut rng).unwrap();

        assert_eq!(&scrambled.data_codewords[..18], &symbol.data_codewords[..18]);
        for i in 18..21 {
            assert_ne!(scrambled.data_codewords[i], symbol.data_codewords[i]);
        }
        assert_eq!(&scrambled.data_codewords[21..], &symbol.data_codewords[21..]);
    }

    #[test]
    fn bound_randomization_by_the_block_length() {
        let symbol = url_symbol();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            symbol.with_randomized_block(4, 1, &mut rng),
            Err(QrError::BlockIndexOutOfRange { index: 4, count: 4 })
        );
        assert_eq!(
            symbol.with_randomized_block(0, 10, &mut rng),
            Err(QrError::RandomizedPrefixTooLong { n: 10, len: 9 })
        );
    }

    #[test]
    fn weave_streams_around_a_single_bit_pivot() {
        let capacity = 2;
        let a = vec![0u8; 10];
        let mut b = a.clone();
        b[1] = 0x01; // one bit apart: the pivot
        b[3] = 0x03;
        b[5] = 0x03;
        b[7] = 0x03;
        b[9] = 0x03;
        assert_eq!(diff(&a, &b), 2 * capacity + 1);

        let mixed = mix(&a, &b, capacity).unwrap();
        assert_eq!(mixed.pivot, 1);
        assert_eq!(mixed.left[1], a[1]);
        assert_eq!(mixed.right[1], b[1]);
        // Outside the pivot the two outputs agree
        for i in (0..10).filter(|&i| i != 1) {
            assert_eq!(mixed.left[i], mixed.right[i]);
        }
        assert!(diff(&mixed.left, &a) <= capacity);
        assert!(diff(&mixed.left, &b) >= capacity + 1);
        assert!(diff(&mixed.right, &b) <= capacity);
        assert!(diff(&mixed.right, &a) >= capacity + 1);
    }

    #[test]
    fn report_streams_with_no_single_bit_difference() {
        let a = vec![0u8; 4];
        let b = vec![0x03u8; 4];
        assert_eq!(mix(&a, &b, 1), Err(QrError::NoMixablePivot));
        assert_eq!(
            mix(&[0], &[0, 1], 1),
            Err(QrError::StreamLengthMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn rebuild_from_a_mixed_stream() {
        let symbol = url_symbol();
        let capacity = symbol.correction_capacity().unwrap();
        assert_eq!(capacity, 8);
        assert_eq!(symbol.block_count().unwrap(), 4);

        // Flip a single bit in one codeword: a valid pivot stream
        let mut other = symbol.interleaved.clone();
        other[0] ^= 0x10;
        let mixed = mix(&symbol.interleaved, &other, 0).unwrap();
        assert_eq!(mixed.pivot, 0);

        let left = symbol.with_codeword_stream(&mixed.left).unwrap();
        let right = symbol.with_codeword_stream(&mixed.right).unwrap();
        assert_eq!(left.interleaved, symbol.interleaved);
        assert_eq!(right.interleaved, other);
        // The two rebuilt symbols differ in exactly the pivot's modules
        let diff_modules: usize = (0..left.size)
            .flat_map(|y| (0..left.size).map(move |x| (x, y)))
            .filter(|&(x, y)| left.get_module(x, y) != right.get_module(x, y))
            .count();
        assert_eq!(diff_modules, 1);
    }
}
