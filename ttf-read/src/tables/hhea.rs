//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::Tag;

use crate::{Cursor, FontRead, ReadError};

/// 'hhea'
pub const TAG: Tag = Tag::new(b"hhea");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hhea {
    /// Number of advance widths in the `hmtx` table.
    pub number_of_h_metrics: u16,
}

impl<'a> FontRead<'a> for Hhea {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        // version, line metrics, caret slope, reserved words and
        // metricDataFormat
        cursor.advance_by(34);
        let number_of_h_metrics = cursor.read::<u16>()?;
        Ok(Self {
            number_of_h_metrics,
        })
    }
}
