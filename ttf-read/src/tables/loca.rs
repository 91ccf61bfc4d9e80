//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use types::{GlyphId, Tag};

use crate::{Cursor, FontReadWithArgs, ReadArgs, ReadError};

/// 'loca'
pub const TAG: Tag = Tag::new(b"loca");

/// The [loca] table, resolved to absolute offsets into the font data.
///
/// Entry `i` is the offset of glyph `i`'s record in `glyf`, already added to
/// the `glyf` table's own offset so it can be seeked to directly.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loca {
    offsets: Vec<u32>,
    /// The trailing entry marking the end of the last glyph, if present.
    end: Option<u32>,
}

/// Arguments for reading [`Loca`].
#[derive(Clone, Copy, Debug)]
pub struct LocaArgs {
    /// `true` for 32-bit entries (`head.indexToLocFormat != 0`).
    pub is_long: bool,
    /// Number of glyphs from `maxp`.
    pub num_glyphs: u16,
    /// Absolute offset of the `glyf` table.
    pub glyf_offset: u32,
}

impl Loca {
    /// Number of glyphs with a location.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The absolute offset of the glyph's record.
    pub fn get(&self, gid: GlyphId) -> Option<u32> {
        self.offsets.get(gid.to_u32() as usize).copied()
    }

    /// The absolute byte range of the glyph's record.
    ///
    /// This needs the following entry, so returns `None` for the last glyph
    /// if the font omitted the trailing `loca` entry. It is also `None` when
    /// the following entry is smaller, as the record's length is unknown.
    pub fn glyph_range(&self, gid: GlyphId) -> Option<Range<u32>> {
        let idx = gid.to_u32() as usize;
        let start = *self.offsets.get(idx)?;
        let end = match self.offsets.get(idx + 1) {
            Some(next) => *next,
            None if idx + 1 == self.offsets.len() => self.end?,
            None => return None,
        };
        (end >= start).then_some(start..end)
    }

    /// `true` if the glyph is known to have no outline data.
    pub fn is_empty_glyph(&self, gid: GlyphId) -> bool {
        self.glyph_range(gid)
            .map(|range| range.is_empty())
            .unwrap_or(false)
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

impl ReadArgs for Loca {
    type Args = LocaArgs;
}

impl<'a> FontReadWithArgs<'a> for Loca {
    fn read_with_args(cursor: &mut Cursor<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let read_entry = |cursor: &mut Cursor<'a>| -> Result<u32, ReadError> {
            let raw = if args.is_long {
                cursor.read::<u32>()?
            } else {
                cursor.read::<u16>()? as u32 * 2
            };
            args.glyf_offset
                .checked_add(raw)
                .ok_or(ReadError::MalformedData("loca offset overflows"))
        };
        let mut offsets = Vec::with_capacity(args.num_glyphs as usize);
        for _ in 0..args.num_glyphs {
            offsets.push(read_entry(cursor)?);
        }
        // fonts are supposed to store one extra entry, but we only rely on it
        // for detecting empty glyphs.
        let end = read_entry(cursor).ok();
        Ok(Self { offsets, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontData;
    use ttf_test_data::be_buffer;

    fn read(buf: &[u8], is_long: bool, num_glyphs: u16) -> Result<Loca, ReadError> {
        let args = LocaArgs {
            is_long,
            num_glyphs,
            glyf_offset: 1000,
        };
        Loca::read_with_args(&mut FontData::new(buf).cursor(), &args)
    }

    #[test]
    fn short_entries_are_doubled() {
        let buf = be_buffer! { 0_u16, 10_u16, 10_u16, 25_u16 };
        let loca = read(&buf, false, 3).unwrap();
        assert_eq!(loca.offsets(), &[1000, 1020, 1020]);
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Some(1020..1020));
        assert!(loca.is_empty_glyph(GlyphId::new(1)));
        assert_eq!(loca.glyph_range(GlyphId::new(2)), Some(1020..1050));
        assert!(!loca.is_empty_glyph(GlyphId::new(2)));
    }

    #[test]
    fn long_entries() {
        let buf = be_buffer! { 0_u32, 12_u32, 40_u32 };
        let loca = read(&buf, true, 2).unwrap();
        assert_eq!(loca.offsets(), &[1000, 1012]);
        assert_eq!(loca.get(GlyphId::new(1)), Some(1012));
        assert_eq!(loca.get(GlyphId::new(2)), None);
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Some(1012..1040));
    }

    #[test]
    fn missing_trailing_entry() {
        let buf = be_buffer! { 0_u16, 10_u16 };
        let loca = read(&buf, false, 2).unwrap();
        assert_eq!(loca.len(), 2);
        assert_eq!(loca.glyph_range(GlyphId::new(0)), Some(1000..1020));
        assert_eq!(loca.glyph_range(GlyphId::new(1)), None);
        assert!(!loca.is_empty_glyph(GlyphId::new(1)));
    }

    #[test]
    fn decreasing_entries_have_no_range() {
        let buf = be_buffer! { 0_u32, 40_u32, 20_u32 };
        let loca = read(&buf, true, 2).unwrap();
        assert_eq!(loca.glyph_range(GlyphId::new(0)), Some(1000..1040));
        assert_eq!(loca.glyph_range(GlyphId::new(1)), None);
        // the record is decoded, so corrupt data is reported rather than hidden
        assert!(!loca.is_empty_glyph(GlyphId::new(1)));
    }

    #[test]
    fn truncated() {
        let buf = be_buffer! { 0_u16, 10_u16 };
        assert_eq!(read(&buf, false, 3), Err(ReadError::OutOfBounds));
    }
}
