//! Print what a TrueType font maps text to.
//!
//! Lists the table directory and the character map, and prints decoded glyph
//! outlines and text widths, as plain text or JSON.

use std::str::FromStr;

use ttf_outline::{
    types::GlyphId, CoordinatePolicy, FallbackAdvance, Font, FontOptions, RangeOffsetBase,
    SegmentEnd,
};

mod print;

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(|e| Error(e.to_string()))?;
    let bytes = std::fs::read(&args.input)
        .map_err(|e| Error(format!("failed to read {}: {e}", args.input.display())))?;
    let options = options_from_args(&args)?;
    let mut font = Font::with_options(&bytes, options).map_err(Error::new)?;
    log::info!(
        "{}: {} glyphs, {} units per em, {} mapped codepoints",
        args.input.display(),
        font.glyph_count(),
        font.units_per_em(),
        font.charmap().len()
    );
    let format = if args.json {
        print::Format::Json
    } else {
        print::Format::Text
    };

    if args.list {
        print::list_tables(&font, format)?;
    }
    if args.cmap {
        print::print_charmap(&font, format)?;
    }
    if let Some(gid) = args.glyph {
        let outline = font.outline_for_glyph(GlyphId::new(gid)).map_err(Error::new)?;
        print::print_outline(&format!("glyph {gid}"), &outline, format)?;
    }
    if let Some(ch) = args.char {
        let outline = font.outline_for_char(ch).map_err(Error::new)?;
        print::print_outline(&format!("'{}'", ch.escape_default()), &outline, format)?;
    }
    if let Some(offset) = args.offset {
        let outline = font.outline_at(offset).map_err(Error::new)?;
        print::print_outline(&format!("offset {offset}"), &outline, format)?;
    }
    if let Some(text) = &args.text {
        print::print_text(&font, text, format)?;
    }
    Ok(())
}

fn options_from_args(args: &flags::Args) -> Result<FontOptions, Error> {
    if args.warn_coordinates && args.reject_coordinates {
        return Err(Error::new(
            "pass only one of --warn-coordinates and --reject-coordinates",
        ));
    }
    let range = match &args.coordinate_range {
        Some(raw) => CoordinateRange::from_str(raw)?,
        None => CoordinateRange(CoordinatePolicy::HISTORICAL_RANGE.into_inner()),
    };
    let CoordinateRange((min, max)) = range;
    let coordinate_policy = if args.reject_coordinates {
        CoordinatePolicy::Reject { min, max }
    } else if args.warn_coordinates {
        CoordinatePolicy::Warn { min, max }
    } else {
        CoordinatePolicy::Accept
    };
    Ok(FontOptions {
        strict_cmap: args.strict_cmap,
        segment_end: if args.inclusive_segments {
            SegmentEnd::Inclusive
        } else {
            SegmentEnd::Exclusive
        },
        range_offset_base: if args.slot_range_offsets {
            RangeOffsetBase::Slot
        } else {
            RangeOffsetBase::CmapBase
        },
        coordinate_policy,
        fallback_advance: match args.fallback_em {
            Some(em) => FallbackAdvance::EmFraction(em),
            None => FallbackAdvance::NotdefWidth,
        },
        memoize: !args.no_cache,
    })
}

/// A `MIN:MAX` pair of coordinate deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CoordinateRange((i32, i32));

impl FromStr for CoordinateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error(format!("invalid range '{}', expected MIN:MAX", s.escape_default()));
        let (min, max) = s.split_once(':').ok_or_else(invalid)?;
        let min = min.trim().parse::<i32>().map_err(|_| invalid())?;
        let max = max.trim().parse::<i32>().map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(Self((min, max)))
    }
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Print the character map, glyph outlines and text widths of a font
        cmd args {
                required input: PathBuf
                /// List the table directory
                optional -l, --list
                /// Print every codepoint to glyph mapping
                optional -c, --cmap
                /// Print the outline of a glyph id
                optional -g, --glyph gid: u16
                /// Print the outline of a character's glyph
                optional --char ch: char
                /// Print the outline of the glyph record at an absolute offset
                optional --offset offset: u32
                /// Print the advance width of some text
                optional -t, --text text: String
                /// Print JSON instead of text
                optional --json
                /// Fail on cmap subtables in unsupported formats
                optional --strict-cmap
                /// Map the last codepoint of each cmap segment
                optional --inclusive-segments
                /// Measure cmap idRangeOffsets from their own entries
                optional --slot-range-offsets
                /// Warn about coordinate deltas outside the coordinate range
                optional --warn-coordinates
                /// Fail glyphs with coordinate deltas outside the coordinate range
                optional --reject-coordinates
                /// The coordinate range as MIN:MAX, -5000:10000 if omitted
                optional --coordinate-range range: String
                /// Width in ems of characters the font has no glyph for
                optional --fallback-em em: f32
                /// Decode every outline afresh
                optional --no-cache
            }
    }
}
