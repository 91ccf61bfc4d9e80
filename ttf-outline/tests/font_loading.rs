//! Building the font model and the failures that abort it.

use ttf_outline::{
    read::ReadError,
    types::{GlyphId, Tag, UfWord},
    Font, FontOptions, RangeOffsetBase, SegmentEnd,
};
use ttf_test_data::{
    be_buffer, tables,
    test_fonts::{self, gids, TestFontBuilder},
};

fn format12() -> Vec<u8> {
    be_buffer! { 12_u16, 0_u16, 28_u32, 0_u32, 1_u32, 0x41_u32, 0x5A_u32, 1_u32 }.into()
}

#[test]
fn missing_required_tables() {
    for tag in ["head", "maxp", "loca", "hhea", "hmtx", "cmap", "glyf"] {
        let tag = Tag::new_checked(tag.as_bytes()).unwrap();
        let data = test_fonts::basic_builder().omit_table(tag).build();
        assert_eq!(
            Font::new(&data).err(),
            Some(ReadError::TableIsMissing(tag)),
            "{tag}"
        );
    }
}

#[test]
fn truncated_font() {
    let data = test_fonts::basic();
    assert_eq!(Font::new(&data[..30]).err(), Some(ReadError::OutOfBounds));
    // the directory survives, but the tables it points to do not
    assert_eq!(Font::new(&data[..200]).err(), Some(ReadError::OutOfBounds));
}

#[test]
fn no_glyphs() {
    let data = TestFontBuilder::new(1000).advances(&[500]).build();
    assert!(matches!(
        Font::new(&data).err(),
        Some(ReadError::MalformedData(_))
    ));
}

#[test]
fn no_horizontal_metrics() {
    let data = TestFontBuilder::new(1000)
        .glyph(tables::simple_glyph(&[&test_fonts::NOTDEF_CONTOUR]))
        .build();
    assert!(matches!(
        Font::new(&data).err(),
        Some(ReadError::MalformedData(_))
    ));
}

#[test]
fn monospace_tail() {
    let data = test_fonts::basic();
    let font = Font::new(&data).unwrap();
    let last = UfWord::new(test_fonts::BASIC_ADVANCES[2]);
    for gid in 2..font.glyph_count() {
        assert_eq!(font.advance_width(GlyphId::new(gid)), Some(last));
    }
}

#[test]
fn short_loca_offsets_are_doubled() {
    let data = test_fonts::basic();
    let font = Font::new(&data).unwrap();
    let glyf = font
        .table_directory()
        .table_records()
        .iter()
        .find(|record| record.tag == Tag::new(b"glyf"))
        .unwrap()
        .offset;
    let offsets = font.loca().offsets();
    assert_eq!(offsets[0], glyf);
    // the space glyph has no data
    assert_eq!(offsets[gids::SPACE as usize], offsets[gids::A as usize]);
    assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn segment_end_is_excluded_by_default() {
    let data = test_fonts::basic();
    let font = Font::new(&data).unwrap();
    // the space segment is 32..=33 and the letters 65..=81
    assert_eq!(font.charmap().map(32u32), Some(GlyphId::new(gids::SPACE)));
    assert_eq!(font.charmap().map(33u32), None);
    assert_eq!(font.charmap().map(81u32), None);
    assert_eq!(font.charmap().len(), 1 + 16);

    let options = FontOptions {
        segment_end: SegmentEnd::Inclusive,
        ..Default::default()
    };
    let font = Font::with_options(&data, options).unwrap();
    assert_eq!(font.charmap().map(33u32), Some(GlyphId::new(gids::A)));
    assert_eq!(font.charmap().map(81u32), Some(GlyphId::NOTDEF));
}

#[test]
fn range_offsets_from_cmap_start_or_slot() {
    let data = test_fonts::basic();
    let font = Font::new(&data).unwrap();
    assert_eq!(font.options().range_offset_base, RangeOffsetBase::CmapBase);
    assert_eq!(font.charmap().map('A'), Some(GlyphId::new(gids::A)));
    assert_eq!(font.charmap().map('O'), Some(GlyphId::new(gids::O)));

    let data = test_fonts::basic_builder().slot_range_offsets().build();
    let options = FontOptions {
        range_offset_base: RangeOffsetBase::Slot,
        ..Default::default()
    };
    let slot = Font::with_options(&data, options).unwrap();
    assert_eq!(slot.charmap().map('A'), Some(GlyphId::new(gids::A)));
    assert_eq!(slot.charmap().mappings(), font.charmap().mappings());
}

#[test]
fn unsupported_cmap_subtables() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = test_fonts::basic_builder()
        .cmap_subtable(0, 4, format12())
        .build();
    let font = Font::new(&data).unwrap();
    assert_eq!(font.glyph_index('A'), GlyphId::new(gids::A));

    let strict = FontOptions {
        strict_cmap: true,
        ..Default::default()
    };
    assert_eq!(
        Font::with_options(&data, strict).err(),
        Some(ReadError::InvalidFormat(12))
    );
}

#[cfg(feature = "serde")]
#[test]
fn outlines_serialize() {
    let data = test_fonts::basic();
    let mut font = Font::new(&data).unwrap();
    let outline = font.outline_for_char('A').unwrap();
    let json = serde_json::to_value(outline.glyph_outline()).unwrap();
    let contours = json["contours"].as_array().unwrap();
    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0]["points"].as_array().unwrap().len(), 4);
    assert_eq!(json["bbox"]["x_max"], 0.5);
}
