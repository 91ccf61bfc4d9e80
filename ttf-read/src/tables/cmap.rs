//! The [cmap (Character to Glyph Index Mapping)][cmap] table
//!
//! Only [format 4][fmt4] subtables are decoded.
//!
//! [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
//! [fmt4]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values

use types::{GlyphId, Tag};

use crate::{Cursor, FontData, FontRead, ReadError};

/// 'cmap'
pub const TAG: Tag = Tag::new(b"cmap");

/// The Unicode platform.
pub const PLATFORM_UNICODE: u16 = 0;

/// The Unicode platform encoding used for variation sequences (format 14).
pub const ENCODING_VARIATION_SEQUENCES: u16 = 14;

/// Describes one subtable of the cmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Byte offset from the start of the cmap table.
    pub subtable_offset: u32,
}

impl EncodingRecord {
    /// `true` for Unicode platform subtables that map codepoints to glyphs.
    ///
    /// Variation sequence subtables share the Unicode platform but never map
    /// single codepoints, so they are excluded.
    pub fn is_unicode_mapping(&self) -> bool {
        self.platform_id == PLATFORM_UNICODE && self.encoding_id != ENCODING_VARIATION_SEQUENCES
    }
}

impl<'a> FontRead<'a> for EncodingRecord {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        Ok(Self {
            platform_id: cursor.read()?,
            encoding_id: cursor.read()?,
            subtable_offset: cursor.read()?,
        })
    }
}

/// The cmap header: its location and the list of subtables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cmap {
    offset: u32,
    encoding_records: Vec<EncodingRecord>,
}

impl Cmap {
    /// The absolute offset of the table; subtable offsets are relative to this.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn encoding_records(&self) -> &[EncodingRecord] {
        &self.encoding_records
    }

    /// The absolute offset of the subtable described by `record`.
    pub fn subtable_position(&self, record: &EncodingRecord) -> Option<usize> {
        (self.offset as usize).checked_add(record.subtable_offset as usize)
    }

    /// Decode the subtable described by `record`, then return `cursor` to
    /// where it was.
    pub fn read_subtable<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        record: &EncodingRecord,
    ) -> Result<Cmap4<'a>, ReadError> {
        let position = self
            .subtable_position(record)
            .ok_or(ReadError::OutOfBounds)?;
        cursor.seek_push(position);
        let result = Cmap4::read(cursor);
        cursor.pop();
        result.map(|subtable| Cmap4 {
            cmap_offset: self.offset as usize,
            ..subtable
        })
    }
}

impl<'a> FontRead<'a> for Cmap {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        let offset = u32::try_from(cursor.position()).map_err(|_| ReadError::OutOfBounds)?;
        cursor.advance::<u16>(); // version
        let num_tables = cursor.read::<u16>()?;
        let encoding_records = (0..num_tables)
            .map(|_| EncodingRecord::read(cursor))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            offset,
            encoding_records,
        })
    }
}

/// Whether a segment's `endCode` is itself mapped.
///
/// The format defines segment ranges as inclusive. Fonts are decoded with
/// the end excluded unless asked otherwise, which drops the last codepoint
/// of every segment; single-codepoint segments map nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentEnd {
    #[default]
    Exclusive,
    Inclusive,
}

/// Where a non-zero `idRangeOffset` is measured from.
///
/// The format measures it from the `idRangeOffset` entry itself. Fonts are
/// decoded measuring it from the start of the cmap table unless asked
/// otherwise, so the glyph id for `codepoint` in segment `i` is read at
/// `cmap + idRangeOffset[i] + 2 * (codepoint - startCode[i])`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeOffsetBase {
    #[default]
    CmapBase,
    Slot,
}

/// The terminating segment's codepoint, which is never mapped.
const SENTINEL: u16 = 0xFFFF;

/// A decoded [format 4] subtable.
///
/// [format 4]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cmap4<'a> {
    data: FontData<'a>,
    end_code: Vec<u16>,
    start_code: Vec<u16>,
    id_delta: Vec<u16>,
    id_range_offsets: Vec<i16>,
    /// absolute position of `idRangeOffset[0]`
    id_range_offsets_pos: usize,
    /// absolute position of the enclosing cmap table
    cmap_offset: usize,
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        let format = cursor.read::<u16>()?;
        if format != 4 {
            return Err(ReadError::InvalidFormat(format.into()));
        }
        cursor.advance::<u16>(); // length
        cursor.advance::<u16>(); // language
        let seg_count = (cursor.read::<u16>()? / 2) as usize;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let end_code = cursor.read_array(seg_count)?;
        cursor.advance::<u16>(); // reservedPad
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets_pos = cursor.position();
        let id_range_offsets = cursor.read_array(seg_count)?;
        Ok(Self {
            data: cursor.data(),
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            id_range_offsets_pos,
            cmap_offset: 0,
        })
    }
}

impl<'a> Cmap4<'a> {
    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    pub fn end_code(&self) -> &[u16] {
        &self.end_code
    }

    pub fn start_code(&self) -> &[u16] {
        &self.start_code
    }

    pub fn id_delta(&self) -> &[u16] {
        &self.id_delta
    }

    pub fn id_range_offsets(&self) -> &[i16] {
        &self.id_range_offsets
    }

    /// The absolute position of the cmap table this subtable belongs to.
    ///
    /// This is 0 for subtables read on their own rather than through
    /// [`Cmap::read_subtable`].
    pub fn cmap_offset(&self) -> usize {
        self.cmap_offset
    }

    /// Every (codepoint, glyph) pair in segment order.
    ///
    /// Codepoints whose glyph array entry is 0 are reported as mapping to
    /// glyph 0.
    pub fn mappings(
        &self,
        segment_end: SegmentEnd,
        base: RangeOffsetBase,
    ) -> Result<Vec<(u32, GlyphId)>, ReadError> {
        let mut cursor = self.data.cursor();
        let mut result = Vec::new();
        for (seg, (&start, &end)) in self.start_code.iter().zip(&self.end_code).enumerate() {
            for codepoint in segment_range(start, end, segment_end) {
                let gid = self.lookup(&mut cursor, seg, codepoint, base)?;
                result.push((codepoint as u32, gid));
            }
        }
        Ok(result)
    }

    /// Map a single codepoint, using the same rules as [`Cmap4::mappings`].
    ///
    /// When several segments cover the codepoint the last one wins, as it
    /// does when the mappings are collected.
    pub fn map_codepoint(
        &self,
        codepoint: u32,
        segment_end: SegmentEnd,
        base: RangeOffsetBase,
    ) -> Result<Option<GlyphId>, ReadError> {
        let Ok(codepoint) = u16::try_from(codepoint) else {
            return Ok(None);
        };
        // segments are sorted by endCode, so none before `first` can contain
        // the codepoint
        let first = self.end_code.partition_point(|end| *end < codepoint);
        let Some(seg) = (first..self.seg_count()).rev().find(|seg| {
            segment_range(self.start_code[*seg], self.end_code[*seg], segment_end)
                .contains(&codepoint)
        }) else {
            return Ok(None);
        };
        let mut cursor = self.data.cursor();
        self.lookup(&mut cursor, seg, codepoint, base).map(Some)
    }

    fn lookup(
        &self,
        cursor: &mut Cursor<'a>,
        seg: usize,
        codepoint: u16,
        base: RangeOffsetBase,
    ) -> Result<GlyphId, ReadError> {
        let delta = self.id_delta[seg];
        let range_offset = self.id_range_offsets[seg];
        if range_offset == 0 {
            return Ok(GlyphId::new(codepoint.wrapping_add(delta)));
        }
        let origin = match base {
            RangeOffsetBase::CmapBase => self.cmap_offset,
            RangeOffsetBase::Slot => self.id_range_offsets_pos + seg * 2,
        };
        let position = (origin as isize)
            .checked_add(range_offset as isize)
            .and_then(|pos| pos.checked_add(2 * (codepoint - self.start_code[seg]) as isize))
            .and_then(|pos| usize::try_from(pos).ok())
            .ok_or(ReadError::OutOfBounds)?;
        cursor.seek_push(position);
        let raw = cursor.read::<u16>();
        cursor.pop();
        match raw? {
            0 => Ok(GlyphId::NOTDEF),
            id => Ok(GlyphId::new(id.wrapping_add(delta))),
        }
    }
}

fn segment_range(start: u16, end: u16, segment_end: SegmentEnd) -> std::ops::Range<u16> {
    // 0xFFFF terminates the table and is excluded in either mode
    let end = match segment_end {
        SegmentEnd::Exclusive => end,
        SegmentEnd::Inclusive => end.saturating_add(1).min(SENTINEL),
    };
    start..end
}
