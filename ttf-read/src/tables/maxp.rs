//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::Tag;

use crate::{Cursor, FontRead, ReadError};

/// 'maxp'
pub const TAG: Tag = Tag::new(b"maxp");

/// [`maxp`](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp)
///
/// Only the glyph count is read; the version 1.0 memory hints that may
/// follow it are irrelevant for outlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Maxp {
    pub num_glyphs: u16,
}

impl<'a> FontRead<'a> for Maxp {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        cursor.skip_fixed(); // version
        let num_glyphs = cursor.read::<u16>()?;
        Ok(Self { num_glyphs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontData;
    use ttf_test_data::tables;

    #[test]
    fn read_maxp() {
        let buf = tables::maxp(37);
        let maxp = Maxp::read(&mut FontData::new(&buf).cursor()).unwrap();
        assert_eq!(maxp.num_glyphs, 37);
    }
}
