use crate::version::Version;

/// Describes how a symbol's data bits are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl EncodingMode {
    // Returns the 4-bit mode indicator value for this mode.
    pub fn mode_bits(self) -> u32 {
        use EncodingMode::*;
        match self {
            Numeric => 0x1,
            Alphanumeric => 0x2,
            Byte => 0x4,
            Kanji => 0x8,
        }
    }

    // Returns the bit width of the character count field for this mode in a
    // symbol at the given version number. The result is in the range [8, 16].
    pub fn char_count_bits(self, ver: Version) -> u8 {
        use EncodingMode::*;
        (match self {
            Numeric => [10, 12, 14],
            Alphanumeric => [9, 11, 13],
            Byte => [8, 16, 16],
            Kanji => [8, 10, 12],
        })[usize::from((ver.value() + 7) / 17)]
    }
}

/// Classifies a payload into the encoding mode used for it.
///
/// Always selects byte mode. TODO: detect all-numeric and all-alphanumeric
/// payloads once those segment encoders are implemented.
pub fn analyze(_payload: &[u8]) -> EncodingMode {
    EncodingMode::Byte
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn always_analyze_as_byte_mode() {
        assert_eq!(analyze(b"12345"), EncodingMode::Byte);
        assert_eq!(analyze("漢字".as_bytes()), EncodingMode::Byte);
    }

    #[test]
    fn widen_the_byte_count_field_at_version_ten() {
        assert_eq!(EncodingMode::Byte.char_count_bits(Version::new(1)), 8);
        assert_eq!(EncodingMode::Byte.char_count_bits(Version::new(9)), 8);
        assert_eq!(EncodingMode::Byte.char_count_bits(Version::new(10)), 16);
        assert_eq!(EncodingMode::Byte.char_count_bits(Version::new(40)), 16);
    }
}
