//! Complete fonts for model level tests.

use ttf_types::Tag;

use crate::{
    tables::{self, Cmap4Segment, RangeOffsetFrom},
    FontBuilder,
};

/// Units per em of [`basic`].
pub const BASIC_UPEM: u16 = 1000;

/// Glyph ids in [`basic`].
pub mod gids {
    /// A rectangle.
    pub const NOTDEF: u16 = 0;
    /// No outline.
    pub const SPACE: u16 = 1;
    /// A triangle of on-curve points.
    pub const A: u16 = 2;
    /// Two contours of only off-curve points.
    pub const O: u16 = 3;
    /// A composite referencing `A`.
    pub const COMPOSITE: u16 = 4;
}

/// Advance widths of the explicit metrics in [`basic`]; the remaining
/// glyphs share the last one.
pub const BASIC_ADVANCES: [u16; 3] = [500, 250, 600];

pub const NOTDEF_CONTOUR: [(i16, i16, bool); 4] = [
    (50, 0, true),
    (50, 700, true),
    (450, 700, true),
    (450, 0, true),
];

pub const A_CONTOUR: [(i16, i16, bool); 3] = [(0, 0, true), (250, 700, true), (500, 0, true)];

pub const O_OUTER: [(i16, i16, bool); 4] = [
    (0, 350, false),
    (300, 700, false),
    (600, 350, false),
    (300, 0, false),
];

pub const O_INNER: [(i16, i16, bool); 4] = [
    (100, 350, false),
    (300, 100, false),
    (500, 350, false),
    (300, 600, false),
];

/// A small font with one glyph of each kind.
///
/// Codepoint 32 maps to the space glyph, 65 ('A') to the triangle, 66 to
/// glyph 0 explicitly, 67 to the composite and 79 ('O') to the off-curve
/// glyph. Mappings use both delta and glyph array segments, with glyph array
/// offsets measured from the start of the cmap table.
pub fn basic() -> Vec<u8> {
    basic_builder().build()
}

/// The builder for [`basic`], for tests that need to tweak it.
pub fn basic_builder() -> TestFontBuilder {
    let mut letters = [0u16; 17];
    letters[0] = gids::A;
    letters[2] = gids::COMPOSITE;
    letters[14] = gids::O;
    TestFontBuilder::new(BASIC_UPEM)
        .glyph(tables::simple_glyph(&[&NOTDEF_CONTOUR]))
        .glyph(Vec::new())
        .glyph(tables::simple_glyph(&[&A_CONTOUR]))
        .glyph(tables::simple_glyph(&[&O_OUTER, &O_INNER]))
        .glyph(tables::composite_glyph(gids::A))
        .advances(&BASIC_ADVANCES)
        // 32 - 0xFFE1 wraps to 1
        .cmap4_subtable(
            0,
            3,
            &[
                Cmap4Segment::delta(32, 33, 0xFFE1),
                Cmap4Segment::glyph_array(65, 81, 0, &letters),
            ],
        )
}

#[derive(Clone, Debug)]
enum CmapSubtable {
    Format4(Vec<Cmap4Segment>),
    Raw(Vec<u8>),
}

/// Assembles the tables needed to map text to outlines.
#[derive(Clone, Debug)]
pub struct TestFontBuilder {
    units_per_em: u16,
    long_loca: bool,
    loca_end: bool,
    glyphs: Vec<Vec<u8>>,
    h_metrics: Vec<(u16, i16)>,
    cmap_subtables: Vec<(u16, u16, CmapSubtable)>,
    slot_range_offsets: bool,
    omitted: Vec<Tag>,
}

impl TestFontBuilder {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            long_loca: false,
            loca_end: true,
            glyphs: Vec::new(),
            h_metrics: Vec::new(),
            cmap_subtables: Vec::new(),
            slot_range_offsets: false,
            omitted: Vec::new(),
        }
    }

    /// Use 32-bit `loca` entries.
    pub fn long_loca(mut self, long_loca: bool) -> Self {
        self.long_loca = long_loca;
        self
    }

    /// Leave out the trailing `loca` entry.
    pub fn without_loca_end(mut self) -> Self {
        self.loca_end = false;
        self
    }

    /// Add a glyph record; the first one added is glyph 0.
    pub fn glyph(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.glyphs.push(data.into());
        self
    }

    /// The explicit advance widths, with zero side bearings.
    pub fn advances(mut self, advances: &[u16]) -> Self {
        self.h_metrics = advances.iter().map(|advance| (*advance, 0)).collect();
        self
    }

    /// Add a cmap subtable from raw bytes.
    pub fn cmap_subtable(
        mut self,
        platform_id: u16,
        encoding_id: u16,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.cmap_subtables
            .push((platform_id, encoding_id, CmapSubtable::Raw(data.into())));
        self
    }

    /// Add a format 4 subtable, encoded once its position is known.
    pub fn cmap4_subtable(
        mut self,
        platform_id: u16,
        encoding_id: u16,
        segments: &[Cmap4Segment],
    ) -> Self {
        self.cmap_subtables.push((
            platform_id,
            encoding_id,
            CmapSubtable::Format4(segments.to_vec()),
        ));
        self
    }

    /// Measure format 4 `idRangeOffset`s from their own entries instead of
    /// from the start of the cmap table.
    pub fn slot_range_offsets(mut self) -> Self {
        self.slot_range_offsets = true;
        self
    }

    /// Drop a table from the finished font.
    pub fn omit_table(mut self, tag: Tag) -> Self {
        self.omitted.push(tag);
        self
    }

    /// Encode the subtables in the layout used by [`tables::cmap`].
    fn encode_cmap_subtables(&self) -> Vec<(u16, u16, Vec<u8>)> {
        let mut offset = 4 + 8 * self.cmap_subtables.len();
        self.cmap_subtables
            .iter()
            .map(|(platform_id, encoding_id, subtable)| {
                let data: Vec<u8> = match subtable {
                    CmapSubtable::Raw(data) => data.clone(),
                    CmapSubtable::Format4(segments) => {
                        let from = if self.slot_range_offsets {
                            RangeOffsetFrom::Slot
                        } else {
                            RangeOffsetFrom::CmapStart {
                                subtable_offset: offset,
                            }
                        };
                        tables::cmap4_with(segments, from).into()
                    }
                };
                offset += data.len();
                (*platform_id, *encoding_id, data)
            })
            .collect()
    }

    pub fn build(self) -> Vec<u8> {
        let mut glyf = Vec::new();
        let mut offsets = Vec::with_capacity(self.glyphs.len() + 1);
        for glyph in &self.glyphs {
            offsets.push(glyf.len() as u32);
            glyf.extend_from_slice(glyph);
            if glyf.len() % 2 != 0 {
                glyf.push(0);
            }
        }
        if self.loca_end {
            offsets.push(glyf.len() as u32);
        }
        let num_glyphs = self.glyphs.len() as u16;
        let extra_lsbs = vec![0i16; (num_glyphs as usize).saturating_sub(self.h_metrics.len())];
        let cmap_subtables = self.encode_cmap_subtables();

        let builder = FontBuilder::new()
            .add_table(Tag::new(b"head"), tables::head(self.units_per_em, self.long_loca as i16))
            .add_table(Tag::new(b"maxp"), tables::maxp(num_glyphs))
            .add_table(Tag::new(b"hhea"), tables::hhea(self.h_metrics.len() as u16))
            .add_table(Tag::new(b"hmtx"), tables::hmtx(&self.h_metrics, &extra_lsbs))
            .add_table(Tag::new(b"loca"), tables::loca(&offsets, self.long_loca))
            .add_table(Tag::new(b"cmap"), tables::cmap(&cmap_subtables))
            .add_table(Tag::new(b"glyf"), glyf);
        self.omitted
            .iter()
            .fold(builder, |builder, tag| builder.remove_table(*tag))
            .build()
    }
}
