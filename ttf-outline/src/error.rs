//! Error types associated with outlines.

use std::fmt;

use ttf_read::{types::GlyphId, ReadError};

/// Errors that may occur when decoding a glyph.
///
/// Errors while building the [`Font`](crate::Font) itself are plain
/// [`ReadError`]s; these are per glyph, so one bad glyph does not prevent
/// others from being decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlineError {
    /// Error occurred when reading font data.
    Read(ReadError),
    /// The requested glyph was not present in the font.
    GlyphNotFound(GlyphId),
    /// A coordinate delta fell outside the range allowed by
    /// [`CoordinatePolicy::Reject`](crate::CoordinatePolicy::Reject).
    CoordinateOutOfRange { point: usize, value: i32 },
    /// Glyph 0 is a composite, so it can't stand in for other composites.
    CompositeNotdef,
}

impl From<ReadError> for OutlineError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "{e}"),
            Self::GlyphNotFound(gid) => write!(f, "Glyph {gid} was not found in the given font"),
            Self::CoordinateOutOfRange { point, value } => {
                write!(f, "Coordinate delta {value} of point {point} is out of range")
            }
            Self::CompositeNotdef => write!(f, "glyph 0 is a composite glyph"),
        }
    }
}

impl std::error::Error for OutlineError {}
