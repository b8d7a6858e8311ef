use crate::error::QrError;

/// A QR version number between 1 and 40 (inclusive).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// Panics if the number is outside the range [1, 40].
    pub fn new(ver: u8) -> Self {
        assert!(
            (Version::MIN.value()..=Version::MAX.value()).contains(&ver),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Checked constructor for values coming from user input.
    pub fn try_new(ver: u8) -> Result<Self, QrError> {
        if (Version::MIN.value()..=Version::MAX.value()).contains(&ver) {
            Ok(Self(ver))
        } else {
            Err(QrError::VersionOutOfRange(ver))
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub fn value(self) -> u8 {
        self.0
    }

    /// Module side length of a symbol at this version, in the range [21, 177].
    pub fn side_length(self) -> i32 {
        i32::from(self.0) * 4 + 17
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn accept_the_full_standard_range() {
        assert_eq!(Version::try_new(1).unwrap(), Version::MIN);
        assert_eq!(Version::try_new(40).unwrap(), Version::MAX);
    }

    #[test]
    fn reject_out_of_range_values() {
        assert_eq!(Version::try_new(0), Err(QrError::VersionOutOfRange(0)));
        assert_eq!(Version::try_new(41), Err(QrError::VersionOutOfRange(41)));
    }

    #[test]
    fn grow_four_modules_per_version() {
        assert_eq!(Version::new(1).side_length(), 21);
        assert_eq!(Version::new(2).side_length(), 25);
        assert_eq!(Version::new(40).side_length(), 177);
    }
}
