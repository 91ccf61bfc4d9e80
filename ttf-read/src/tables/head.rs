//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::Tag;

use crate::{Cursor, FontRead, ReadError};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

/// The fields of the [font header](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// needed for outline decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Head {
    /// Font design units per em; always non-zero.
    pub units_per_em: u16,
    /// `0` for short (`Offset16`) `loca` entries, anything else for long.
    pub index_to_loc_format: i16,
}

impl Head {
    /// `true` if `loca` entries are 32-bit byte offsets.
    pub fn is_long_loca(&self) -> bool {
        self.index_to_loc_format != 0
    }
}

impl<'a> FontRead<'a> for Head {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        cursor.skip_fixed(); // version
        cursor.skip_fixed(); // fontRevision
        cursor.advance::<u32>(); // checksumAdjustment
        cursor.advance::<u32>(); // magicNumber
        cursor.advance::<u16>(); // flags
        let units_per_em = cursor.read::<u16>()?;
        if units_per_em == 0 {
            return Err(ReadError::MalformedData("unitsPerEm must be non-zero"));
        }
        // created, modified, bounding box, macStyle, lowestRecPPEM and
        // fontDirectionHint
        cursor.advance_by(30);
        let index_to_loc_format = cursor.read::<i16>()?;
        Ok(Self {
            units_per_em,
            index_to_loc_format,
        })
    }
}
