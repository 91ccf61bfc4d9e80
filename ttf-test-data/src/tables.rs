//! Builders for the individual tables.
//!
//! Fields that are never read are filled with plausible constants.

use crate::{be_buffer, BeBuffer};

/// A `head` table with the given `unitsPerEm` and `indexToLocFormat`.
pub fn head(units_per_em: u16, index_to_loc_format: i16) -> BeBuffer {
    be_buffer! {
        0x0001_0000_u32,  // version
        0x0001_0000_u32,  // fontRevision
        0_u32,            // checksumAdjustment
        0x5F0F_3CF5_u32,  // magicNumber
        0_u16,            // flags
        units_per_em,
        0_u32, 0_u32,     // created
        0_u32, 0_u32,     // modified
        0_i16, 0_i16, 0_i16, 0_i16, // bbox
        0_u16,            // macStyle
        8_u16,            // lowestRecPPEM
        2_i16,            // fontDirectionHint
        index_to_loc_format,
        0_i16             // glyphDataFormat
    }
}

/// A version 0.5 `maxp` table.
pub fn maxp(num_glyphs: u16) -> BeBuffer {
    be_buffer! { 0x0000_5000_u32, num_glyphs }
}

pub fn hhea(number_of_h_metrics: u16) -> BeBuffer {
    be_buffer! {
        0x0001_0000_u32,      // version
        800_i16, -200_i16,    // ascender, descender
        0_i16,                // lineGap
        0_u16,                // advanceWidthMax
        0_i16, 0_i16, 0_i16,  // minLeftSideBearing, minRightSideBearing, xMaxExtent
        1_i16, 0_i16, 0_i16,  // caretSlopeRise, caretSlopeRun, caretOffset
        0_i16, 0_i16, 0_i16, 0_i16,
        0_i16,                // metricDataFormat
        number_of_h_metrics
    }
}

/// An `hmtx` table from `(advanceWidth, lsb)` pairs followed by the left
/// side bearings of any remaining glyphs.
pub fn hmtx(h_metrics: &[(u16, i16)], left_side_bearings: &[i16]) -> BeBuffer {
    h_metrics
        .iter()
        .fold(BeBuffer::new(), |buf, (advance, lsb)| buf.push(*advance).push(*lsb))
        .extend(left_side_bearings.iter().copied())
}

/// A `loca` table from byte offsets into `glyf`.
///
/// Short offsets are stored halved, so they must be even.
pub fn loca(offsets: &[u32], is_long: bool) -> BeBuffer {
    if is_long {
        BeBuffer::new().extend(offsets.iter().copied())
    } else {
        assert!(offsets.iter().all(|offset| offset % 2 == 0 && offset / 2 <= u16::MAX as u32));
        BeBuffer::new().extend(offsets.iter().map(|offset| (offset / 2) as u16))
    }
}

/// One segment of a format 4 cmap subtable.
#[derive(Clone, Debug)]
pub struct Cmap4Segment {
    pub start: u16,
    pub end: u16,
    pub id_delta: u16,
    pub glyph_ids: Option<Vec<u16>>,
}

impl Cmap4Segment {
    /// A segment mapping `start..=end` by adding `id_delta`.
    pub fn delta(start: u16, end: u16, id_delta: u16) -> Self {
        Self {
            start,
            end,
            id_delta,
            glyph_ids: None,
        }
    }

    /// A segment that looks glyphs up in the glyph id array.
    pub fn glyph_array(start: u16, end: u16, id_delta: u16, glyph_ids: &[u16]) -> Self {
        Self {
            start,
            end,
            id_delta,
            glyph_ids: Some(glyph_ids.to_vec()),
        }
    }
}

/// What the `idRangeOffset` values written by [`cmap4_with`] are relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeOffsetFrom {
    /// The `idRangeOffset` entry itself, as the format defines it.
    Slot,
    /// The start of the cmap table, with the subtable written at
    /// `subtable_offset` bytes from it.
    CmapStart { subtable_offset: usize },
}

/// A format 4 subtable with the given segments followed by the terminating
/// `0xFFFF` segment.
///
/// Glyph id arrays are laid out after the `idRangeOffset` array in segment
/// order, and addressed the way the format defines.
pub fn cmap4(segments: &[Cmap4Segment]) -> BeBuffer {
    cmap4_with(segments, RangeOffsetFrom::Slot)
}

/// As [`cmap4`], with `idRangeOffset` values relative to `from`.
pub fn cmap4_with(segments: &[Cmap4Segment], from: RangeOffsetFrom) -> BeBuffer {
    let mut segments = segments.to_vec();
    segments.push(Cmap4Segment::delta(0xFFFF, 0xFFFF, 1));
    let seg_count = segments.len();
    let header_len = 14;
    let id_range_offsets_start = header_len + 2 * seg_count + 2 + 4 * seg_count;
    let mut glyph_array_pos = id_range_offsets_start + 2 * seg_count;
    let mut id_range_offsets = Vec::with_capacity(seg_count);
    for (i, segment) in segments.iter().enumerate() {
        match &segment.glyph_ids {
            Some(ids) => {
                let range_offset = match from {
                    RangeOffsetFrom::Slot => glyph_array_pos - (id_range_offsets_start + 2 * i),
                    RangeOffsetFrom::CmapStart { subtable_offset } => {
                        subtable_offset + glyph_array_pos
                    }
                };
                assert!(range_offset <= i16::MAX as usize, "idRangeOffset overflows");
                id_range_offsets.push(range_offset as u16);
                glyph_array_pos += 2 * ids.len();
            }
            None => id_range_offsets.push(0),
        }
    }
    let length = glyph_array_pos as u16;
    let entry_selector = (seg_count as u16).ilog2() as u16;
    let search_range = 2 * (1u16 << entry_selector);

    be_buffer! {
        4_u16,
        length,
        0_u16,  // language
        (seg_count * 2) as u16,
        search_range,
        entry_selector,
        (seg_count as u16 * 2).saturating_sub(search_range)
    }
    .extend(segments.iter().map(|segment| segment.end))
    .push(0_u16)
    .extend(segments.iter().map(|segment| segment.start))
    .extend(segments.iter().map(|segment| segment.id_delta))
    .extend(id_range_offsets)
    .extend(
        segments
            .iter()
            .filter_map(|segment| segment.glyph_ids.as_deref())
            .flatten()
            .copied(),
    )
}

/// A `cmap` table with `(platformID, encodingID, subtable)` entries.
pub fn cmap(subtables: &[(u16, u16, Vec<u8>)]) -> BeBuffer {
    let mut offset = 4 + 8 * subtables.len();
    let mut buf = be_buffer! { 0_u16, subtables.len() as u16 };
    for (platform_id, encoding_id, data) in subtables {
        buf = buf
            .push(*platform_id)
            .push(*encoding_id)
            .push(offset as u32);
        offset += data.len();
    }
    subtables
        .iter()
        .fold(buf, |buf, (_, _, data)| buf.extend_bytes(data))
}

const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const REPEAT: u8 = 0x08;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

/// A simple glyph from contours of `(x, y, on_curve)` points, with no
/// instructions.
pub fn simple_glyph(contours: &[&[(i16, i16, bool)]]) -> BeBuffer {
    simple_glyph_with_instructions(contours, &[])
}

/// A simple glyph encoded the way font compilers do: the shortest form for
/// every delta, with runs of identical flags compressed.
pub fn simple_glyph_with_instructions(
    contours: &[&[(i16, i16, bool)]],
    instructions: &[u8],
) -> BeBuffer {
    let points = contours.iter().flat_map(|c| c.iter()).copied().collect::<Vec<_>>();
    let bbox = bbox(&points);
    let mut end = 0;
    let end_pts = contours
        .iter()
        .map(|contour| {
            end += contour.len();
            (end - 1) as u16
        })
        .collect::<Vec<_>>();

    let mut flags = Vec::with_capacity(points.len());
    let mut x_data = BeBuffer::new();
    let mut y_data = BeBuffer::new();
    let (mut last_x, mut last_y) = (0i32, 0i32);
    for (x, y, on_curve) in points.iter().copied() {
        let mut flag = if on_curve { ON_CURVE } else { 0 };
        let (x_flag, x_bytes) =
            encode_delta(x as i32 - last_x, X_SHORT, X_SAME_OR_POSITIVE, x_data);
        let (y_flag, y_bytes) =
            encode_delta(y as i32 - last_y, Y_SHORT, Y_SAME_OR_POSITIVE, y_data);
        flag |= x_flag | y_flag;
        x_data = x_bytes;
        y_data = y_bytes;
        flags.push(flag);
        last_x = x as i32;
        last_y = y as i32;
    }

    let mut buf = be_buffer! {
        contours.len() as i16,
        bbox[0], bbox[1], bbox[2], bbox[3]
    }
    .extend(end_pts)
    .push(instructions.len() as u16)
    .extend_bytes(instructions);
    buf = compress_flags(&flags)
        .into_iter()
        .fold(buf, |buf, byte| buf.push(byte));
    buf.extend_bytes(&x_data).extend_bytes(&y_data)
}

/// A composite glyph with a single component at no offset.
pub fn composite_glyph(component: u16) -> BeBuffer {
    be_buffer! {
        -1_i16,
        0_i16, 0_i16, 0_i16, 0_i16,
        0x0003_u16,  // ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES
        component,
        0_i16, 0_i16
    }
}

fn bbox(points: &[(i16, i16, bool)]) -> [i16; 4] {
    if points.is_empty() {
        return [0; 4];
    }
    points.iter().fold(
        [i16::MAX, i16::MAX, i16::MIN, i16::MIN],
        |[x_min, y_min, x_max, y_max], (x, y, _)| {
            [x_min.min(*x), y_min.min(*y), x_max.max(*x), y_max.max(*y)]
        },
    )
}

fn encode_delta(delta: i32, short: u8, same_or_positive: u8, buf: BeBuffer) -> (u8, BeBuffer) {
    match delta {
        0 => (same_or_positive, buf),
        1..=255 => (short | same_or_positive, buf.push(delta as u8)),
        -255..=-1 => (short, buf.push((-delta) as u8)),
        _ => (0, buf.push(delta as i16)),
    }
}

fn compress_flags(flags: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(flags.len());
    let mut i = 0;
    while i < flags.len() {
        let flag = flags[i];
        let run = flags[i..]
            .iter()
            .take(256)
            .take_while(|other| **other == flag)
            .count();
        if run > 1 {
            result.push(flag | REPEAT);
            result.push((run - 1) as u8);
        } else {
            result.push(flag);
        }
        i += run;
    }
    result
}
