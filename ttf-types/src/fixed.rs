//! fixed-point numerical types

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// Version fields in `head` and `maxp` use this type. They are only ever
/// skipped by the parser, but the value is decodable for inspection.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixed(i32);

impl Fixed {
    const FRACT_BITS: u32 = 16;
    const ONE: i32 = 1 << Self::FRACT_BITS;

    /// Creates a new fixed point value from the raw 16.16 representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw 16.16 representation.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a fixed point value from an integer.
    pub const fn from_i32(value: i32) -> Self {
        Self(value << Self::FRACT_BITS)
    }

    /// Returns the value as a 64-bit float.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::ONE as f64
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

crate::newtype_scalar!(Fixed, [u8; 4]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn version_one() {
        let version = Fixed::read(&[0, 1, 0, 0]).unwrap();
        assert_eq!(version, Fixed::from_i32(1));
        assert_eq!(version.to_f64(), 1.0);
    }

    #[test]
    fn maxp_half_version() {
        // maxp version 0.5 is stored as 0x00005000
        let version = Fixed::read(&[0, 0, 0x50, 0]).unwrap();
        assert_eq!(version.to_f64(), 0.3125);
        assert_eq!(version.to_bits(), 0x5000);
    }
}
