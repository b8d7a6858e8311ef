use crate::error::QrError;

/// The error correction level in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum EcLevel {
    /// The QR Code can tolerate about  7% erroneous codewords.
    Low,
    /// The QR Code can tolerate about 15% erroneous codewords.
    Medium,
    /// The QR Code can tolerate about 25% erroneous codewords.
    Quartile,
    /// The QR Code can tolerate about 30% erroneous codewords.
    High,
}

impl EcLevel {
    // Returns the table row index (in the range 0 to 3).
    pub fn ordinal(self) -> usize {
        use EcLevel::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    // Returns the 2-bit field written into the format info track.
    pub fn format_bits(self) -> u8 {
        use EcLevel::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }

    /// The inverse of `ordinal`, for values coming from user input.
    pub fn from_ordinal(n: u8) -> Result<Self, QrError> {
        use EcLevel::*;
        match n {
            0 => Ok(Low),
            1 => Ok(Medium),
            2 => Ok(Quartile),
            3 => Ok(High),
            _ => Err(QrError::EcLevelOutOfRange(n)),
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn round_trip_through_ordinals() {
        for n in 0..4 {
            assert_eq!(EcLevel::from_ordinal(n).unwrap().ordinal(), n as usize);
        }
        assert_eq!(EcLevel::from_ordinal(4), Err(QrError::EcLevelOutOfRange(4)));
    }

    #[test]
    fn emit_the_standard_format_bit_pairs() {
        assert_eq!(EcLevel::Low.format_bits(), 0b01);
        assert_eq!(EcLevel::Medium.format_bits(), 0b00);
        assert_eq!(EcLevel::Quartile.format_bits(), 0b11);
        assert_eq!(EcLevel::High.format_bits(), 0b10);
    }
}
