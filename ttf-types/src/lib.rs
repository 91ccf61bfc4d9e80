//! Common [scalar data types][data types] used in TrueType font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bbox;
mod fixed;
mod fword;
mod glyph_id;
mod point;
mod raw;
mod tag;


pub use bbox::BoundingBox;
pub use fixed::Fixed;
pub use fword::{FWord, UfWord};
pub use glyph_id::GlyphId;
pub use point::Point;
pub use raw::Scalar;
pub use tag::{InvalidTag, Tag};

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
