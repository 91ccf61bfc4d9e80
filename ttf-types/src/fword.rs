//! 16-bit signed and unsigned font-units

/// 16-bit signed quantity in font design units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FWord(i16);

/// 16-bit unsigned quantity in font design units.
///
/// Advance widths are stored this way. The value only becomes meaningful
/// once divided by the font's units-per-em.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UfWord(u16);

impl FWord {
    pub const fn new(raw: i16) -> Self {
        Self(raw)
    }

    pub const fn to_i16(self) -> i16 {
        self.0
    }

    /// Converts this value to em units for the given units-per-em.
    pub fn to_em(self, units_per_em: u16) -> f32 {
        self.0 as f32 / units_per_em as f32
    }
}

impl UfWord {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// Converts this value to em units for the given units-per-em.
    pub fn to_em(self, units_per_em: u16) -> f32 {
        self.0 as f32 / units_per_em as f32
    }
}

impl std::fmt::Display for FWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for UfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i16> for FWord {
    fn from(value: i16) -> Self {
        Self(value)
    }
}

impl From<u16> for UfWord {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

crate::newtype_scalar!(FWord, [u8; 2]);
crate::newtype_scalar!(UfWord, [u8; 2]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn em_conversion() {
        assert_eq!(UfWord::new(1024).to_em(2048), 0.5);
        assert_eq!(FWord::new(-500).to_em(1000), -0.5);
    }

    #[test]
    fn read_as_raw_u16() {
        // the same bytes decode differently depending on signedness
        let bytes = [0xFF, 0x38];
        assert_eq!(UfWord::read(&bytes).unwrap().to_u16(), 65336);
        assert_eq!(FWord::read(&bytes).unwrap().to_i16(), -200);
    }
}
