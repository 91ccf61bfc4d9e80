//! Text and JSON output.

use serde_json::json;
use ttf_outline::{Font, GlyphOutline, Outline};

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Error> {
    let text = serde_json::to_string_pretty(value).map_err(Error::new)?;
    println!("{text}");
    Ok(())
}

pub fn list_tables(font: &Font, format: Format) -> Result<(), Error> {
    let records = font.table_directory().table_records();
    if format == Format::Json {
        return print_json(&records);
    }
    println!("Tag  Offset  Length  Checksum");
    println!("-------------------------------");
    let max_offset = records
        .iter()
        .map(|record| record.offset)
        .max()
        .unwrap_or_default();
    let offset_pad = hex_width(max_offset);
    for record in records {
        println!(
            "{0} 0x{1:02$X} {3:8} 0x{4:08X} ",
            record.tag, record.offset, offset_pad, record.length, record.checksum
        );
    }
    Ok(())
}

fn hex_width(val: u32) -> usize {
    match val {
        0..=0xffff => 4usize,
        0x10000..=0xffff_ff => 6,
        0x1000000.. => 8,
    }
}

pub fn print_charmap(font: &Font, format: Format) -> Result<(), Error> {
    let mappings = font.charmap().mappings();
    if format == Format::Json {
        return print_json(&mappings);
    }
    println!("{} mappings", mappings.len());
    for (codepoint, gid) in mappings {
        let printable = char::from_u32(codepoint)
            .filter(|ch| !ch.is_control())
            .map(|ch| format!(" '{ch}'"))
            .unwrap_or_default();
        println!("U+{codepoint:04X}{printable} -> {gid}");
    }
    Ok(())
}

pub fn print_outline(label: &str, outline: &Outline, format: Format) -> Result<(), Error> {
    if format == Format::Json {
        let value = match outline {
            Outline::Simple(glyph) => json!({ "outline": &**glyph }),
            Outline::CompositeFallback {
                glyph_offset,
                notdef,
            } => json!({ "composite_offset": glyph_offset, "outline": &**notdef }),
        };
        return print_json(&value);
    }
    if let Outline::CompositeFallback { glyph_offset, .. } = outline {
        println!("{label}: composite glyph at {glyph_offset}, showing glyph 0");
    } else {
        println!("{label}:");
    }
    print_glyph_outline(outline.glyph_outline());
    Ok(())
}

fn print_glyph_outline(outline: &GlyphOutline) {
    let bbox = outline.bbox();
    println!(
        "  bbox ({}, {}) ({}, {})",
        bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
    );
    for (i, contour) in outline.contours().iter().enumerate() {
        println!("  contour {i}");
        for point in contour.points() {
            let kind = match (point.on_curve, point.implicit, point.return_point) {
                (_, _, true) => "close",
                (_, true, _) => "implied",
                (true, _, _) => "on",
                (false, _, _) => "off",
            };
            let end = if point.end_of_contour { " end" } else { "" };
            println!("    {:>8.4} {:>8.4} {kind}{end}", point.x, point.y);
        }
    }
}

pub fn print_text(font: &Font, text: &str, format: Format) -> Result<(), Error> {
    let width = font.string_advance_width(text);
    let glyphs = text
        .chars()
        .map(|ch| font.glyph_index(ch))
        .collect::<Vec<_>>();
    if format == Format::Json {
        return print_json(&json!({ "text": text, "glyphs": glyphs, "advance": width }));
    }
    let glyphs = glyphs
        .iter()
        .map(|gid| gid.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{glyphs}");
    println!("advance: {width}em");
    Ok(())
}
