use thiserror::Error;

use crate::mode::EncodingMode;

/// Errors raised while encoding a symbol or reworking its codewords.
///
/// Parameter and capacity errors describe caller input and are recoverable.
/// `TableMismatch` and `MatrixUnderfilled` are consistency failures inside
/// the encoder itself; an operation that returns one of them must be
/// treated as aborted. `NoMixablePivot` is an ordinary negative result for
/// search loops that probe many candidate payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QrError {
    #[error("version out of range: {0} (expected 1..=40)")]
    VersionOutOfRange(u8),

    #[error("error correction level out of range: {0} (expected 0..=3)")]
    EcLevelOutOfRange(u8),

    #[error("mask pattern out of range: {0} (expected 0..=7)")]
    MaskOutOfRange(u8),

    #[error("unsupported encoding mode {0:?}, only byte mode is implemented")]
    UnsupportedMode(EncodingMode),

    #[error("data length = {datalen} bits, max capacity = {capacity} bits")]
    DataOverCapacity { datalen: usize, capacity: usize },

    #[error("block table mismatch for version {version}: {actual} codewords against a budget of {expected}")]
    TableMismatch {
        version: u8,
        expected: usize,
        actual: usize,
    },

    #[error("block index {index} out of range, layout has {count} blocks")]
    BlockIndexOutOfRange { index: usize, count: usize },

    #[error("randomized prefix of {n} codewords exceeds block data length {len}")]
    RandomizedPrefixTooLong { n: usize, len: usize },

    #[error("codeword streams differ in length: {left} vs {right}")]
    StreamLengthMismatch { left: usize, right: usize },

    #[error("no pair of differing codewords is exactly one bit apart")]
    NoMixablePivot,

    #[error("module grid underfilled: placed {placed} of {expected} codeword bits")]
    MatrixUnderfilled { placed: usize, expected: usize },
}
