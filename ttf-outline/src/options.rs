//! Policies controlling how a font is loaded and how glyphs are decoded.

use std::ops::RangeInclusive;

use ttf_read::tables::glyf::SimpleGlyph;

pub use ttf_read::tables::cmap::{RangeOffsetBase, SegmentEnd};

use crate::OutlineError;

/// Options for [`Font::with_options`](crate::Font::with_options).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontOptions {
    /// Fail to load the font if a Unicode subtable is in an unsupported
    /// format, rather than skipping it.
    pub strict_cmap: bool,
    /// Whether each cmap segment's `endCode` is mapped.
    pub segment_end: SegmentEnd,
    /// Where cmap glyph array offsets are measured from.
    pub range_offset_base: RangeOffsetBase,
    pub coordinate_policy: CoordinatePolicy,
    /// Width of characters the font has no advance for.
    pub fallback_advance: FallbackAdvance,
    /// Keep decoded outlines, keyed by their offset.
    pub memoize: bool,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            strict_cmap: false,
            segment_end: SegmentEnd::Exclusive,
            range_offset_base: RangeOffsetBase::CmapBase,
            coordinate_policy: CoordinatePolicy::Accept,
            fallback_advance: FallbackAdvance::NotdefWidth,
            memoize: true,
        }
    }
}

/// What to do with 16-bit coordinate deltas outside a plausible range.
///
/// Every 16-bit delta is valid as far as the format is concerned, so the
/// default accepts them all. One byte deltas are never checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinatePolicy {
    #[default]
    Accept,
    /// Log a warning for each delta outside `min..=max` and keep it.
    Warn { min: i32, max: i32 },
    /// Fail the glyph on the first delta outside `min..=max`.
    Reject { min: i32, max: i32 },
}

impl CoordinatePolicy {
    /// The window some older decoders treated as the limit of sane data.
    pub const HISTORICAL_RANGE: RangeInclusive<i32> = -5000..=10000;

    /// Warn about deltas outside [`HISTORICAL_RANGE`](Self::HISTORICAL_RANGE).
    pub fn warn_historical() -> Self {
        Self::Warn {
            min: *Self::HISTORICAL_RANGE.start(),
            max: *Self::HISTORICAL_RANGE.end(),
        }
    }

    /// Reject deltas outside [`HISTORICAL_RANGE`](Self::HISTORICAL_RANGE).
    pub fn reject_historical() -> Self {
        Self::Reject {
            min: *Self::HISTORICAL_RANGE.start(),
            max: *Self::HISTORICAL_RANGE.end(),
        }
    }

    /// The allowed range, if any.
    pub fn range(&self) -> Option<RangeInclusive<i32>> {
        match *self {
            Self::Accept => None,
            Self::Warn { min, max } | Self::Reject { min, max } => Some(min..=max),
        }
    }

    /// Apply the policy to the deltas `glyph` stores in the 16-bit form,
    /// x then y.
    pub(crate) fn check(&self, glyph: &SimpleGlyph) -> Result<(), OutlineError> {
        let Some(range) = self.range() else {
            return Ok(());
        };
        for (point, value) in glyph.long_deltas() {
            if range.contains(&value) {
                continue;
            }
            match self {
                Self::Reject { .. } => {
                    return Err(OutlineError::CoordinateOutOfRange { point, value })
                }
                _ => log::warn!("coordinate delta {value} of point {point} is outside {range:?}"),
            }
        }
        Ok(())
    }
}

/// Width of a character that has no mapping in the font.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackAdvance {
    /// The advance of glyph 0.
    #[default]
    NotdefWidth,
    /// A fixed fraction of the em.
    EmFraction(f32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_read::{tables::glyf::Glyph, FontData, FontRead};
    use ttf_test_data::tables;

    fn glyph(contour: &[(i16, i16, bool)]) -> SimpleGlyph {
        let buf = tables::simple_glyph(&[contour]);
        match Glyph::read(&mut FontData::new(&buf).cursor()).unwrap() {
            Glyph::Simple(glyph) => glyph,
            Glyph::Composite(_) => panic!("expected a simple glyph"),
        }
    }

    #[test]
    fn accept_everything() {
        let glyph = glyph(&[(0, 0, true), (30000, -30000, true)]);
        assert_eq!(CoordinatePolicy::Accept.check(&glyph), Ok(()));
        assert_eq!(CoordinatePolicy::Accept.range(), None);
    }

    #[test]
    fn reject_checks_deltas_not_positions() {
        let policy = CoordinatePolicy::reject_historical();
        // each step is in range even though the last position is not
        let ok = glyph(&[(9000, 0, true), (18000, 0, true), (27000, 0, true)]);
        assert_eq!(policy.check(&ok), Ok(()));
        let bad = glyph(&[(100, 0, true), (100, -5200, true)]);
        assert_eq!(
            policy.check(&bad),
            Err(OutlineError::CoordinateOutOfRange {
                point: 1,
                value: -5200
            })
        );
    }

    #[test]
    fn one_byte_deltas_are_not_checked() {
        let policy = CoordinatePolicy::Reject { min: -100, max: 100 };
        let triangle = glyph(&[(0, 0, true), (200, 0, true), (0, 200, true)]);
        assert_eq!(policy.check(&triangle), Ok(()));
        let wide = glyph(&[(0, 0, true), (300, 0, true), (0, 200, true)]);
        assert_eq!(
            policy.check(&wide),
            Err(OutlineError::CoordinateOutOfRange {
                point: 1,
                value: 300
            })
        );
    }

    #[test]
    fn warn_keeps_going() {
        let _ = env_logger::builder().is_test(true).try_init();
        let policy = CoordinatePolicy::warn_historical();
        assert_eq!(policy.range(), Some(-5000..=10000));
        assert_eq!(policy.check(&glyph(&[(12000, 0, true)])), Ok(()));
    }

    #[test]
    fn defaults() {
        let options = FontOptions::default();
        assert!(!options.strict_cmap);
        assert!(options.memoize);
        assert_eq!(options.segment_end, SegmentEnd::Exclusive);
        assert_eq!(options.range_offset_base, RangeOffsetBase::CmapBase);
        assert_eq!(options.fallback_advance, FallbackAdvance::NotdefWidth);
    }
}
