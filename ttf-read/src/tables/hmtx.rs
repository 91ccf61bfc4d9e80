//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use types::{GlyphId, Tag, UfWord};

use crate::{Cursor, FontReadWithArgs, ReadArgs, ReadError};

/// 'hmtx'
pub const TAG: Tag = Tag::new(b"hmtx");

/// Advance widths for every glyph in the font.
///
/// Glyphs past the last long metric share its advance, as in monospaced
/// fonts; those trailing glyphs only store a left side bearing, which we
/// don't need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hmtx {
    advances: Vec<UfWord>,
}

impl Hmtx {
    /// The advance width of the given glyph, in font units.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<UfWord> {
        self.advances.get(glyph_id.to_u32() as usize).copied()
    }

    pub fn advances(&self) -> &[UfWord] {
        &self.advances
    }

    pub fn len(&self) -> usize {
        self.advances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }
}

impl ReadArgs for Hmtx {
    /// `(number_of_h_metrics, num_glyphs)`
    type Args = (u16, u16);
}

impl<'a> FontReadWithArgs<'a> for Hmtx {
    fn read_with_args(cursor: &mut Cursor<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let (number_of_h_metrics, num_glyphs) = *args;
        if number_of_h_metrics == 0 {
            return Err(ReadError::MalformedData(
                "hhea.numberOfHMetrics must be at least 1",
            ));
        }
        let mut advances =
            Vec::with_capacity(number_of_h_metrics.max(num_glyphs) as usize);
        let mut last = UfWord::default();
        for _ in 0..number_of_h_metrics {
            last = cursor.read_funit()?;
            advances.push(last);
            cursor.skip_funit(); // lsb
        }
        for _ in number_of_h_metrics..num_glyphs {
            advances.push(last);
        }
        Ok(Self { advances })
    }
}
