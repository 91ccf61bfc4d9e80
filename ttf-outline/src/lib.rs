//! Turning TrueType fonts into drawable glyph outlines.
//!
//! A [`Font`] reads the tables needed to map text to glyphs once, up front,
//! and then decodes glyph records on request into [`GlyphOutline`]s: lists
//! of closed contours in em units, with the implicit on-curve points of the
//! TrueType format made explicit.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ttf_outline::Font;
//!
//! let data = std::fs::read("Font.ttf")?;
//! let mut font = Font::new(&data)?;
//! let outline = font.outline_for_char('A')?;
//! for contour in outline.glyph_outline().contours() {
//!     for point in contour.points() {
//!         println!("{} {} on curve: {}", point.x, point.y, point.on_curve);
//!     }
//! }
//! println!("width: {}em", font.string_advance_width("Hello"));
//! # Ok(())
//! # }
//! ```
//!
//! Composite glyphs are not supported; they decode to
//! [`Outline::CompositeFallback`], which carries the outline of glyph 0.

#![forbid(unsafe_code)]

mod charmap;
mod error;
mod font;
mod options;
mod outline;

pub use charmap::Charmap;
pub use error::OutlineError;
pub use font::Font;
pub use options::{CoordinatePolicy, FallbackAdvance, FontOptions, RangeOffsetBase, SegmentEnd};
pub use outline::{Contour, GlyphOutline, GlyphPoint, Outline};

/// Public re-export of the ttf-read crate.
pub extern crate ttf_read as read;
pub use read::types;
