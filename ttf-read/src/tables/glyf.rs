//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use std::ops::BitOr;

use types::{BoundingBox, FWord, Tag};

use crate::{Cursor, FontRead, ReadError};

/// 'glyf'
pub const TAG: Tag = Tag::new(b"glyf");

/// Flags describing how each point of a simple glyph is encoded.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    /// The point is on the curve.
    pub const ON_CURVE_POINT: Self = Self(0x01);
    /// The x delta is one byte, with its sign given by
    /// [`X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR`](Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR).
    pub const X_SHORT_VECTOR: Self = Self(0x02);
    /// The y delta is one byte.
    pub const Y_SHORT_VECTOR: Self = Self(0x04);
    /// The next byte is the number of additional times this flag repeats.
    pub const REPEAT_FLAG: Self = Self(0x08);
    /// With `X_SHORT_VECTOR`, the delta is positive; otherwise the x value
    /// is unchanged and no delta is stored.
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self(0x10);
    /// As `X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR`, for y.
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self(0x20);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SimpleGlyphFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::fmt::Debug for SimpleGlyphFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimpleGlyphFlags({:#04x})", self.0)
    }
}

types::newtype_scalar!(SimpleGlyphFlags, [u8; 1]);

/// A decoded point of a simple glyph, in font units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurvePoint {
    pub x: i32,
    pub y: i32,
    /// `false` for quadratic control points.
    pub on_curve: bool,
}

impl CurvePoint {
    pub fn new(x: i32, y: i32, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    pub fn on_curve(x: i32, y: i32) -> Self {
        Self::new(x, y, true)
    }

    pub fn off_curve(x: i32, y: i32) -> Self {
        Self::new(x, y, false)
    }
}

/// The fields shared by every glyph record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphHeader {
    /// Negative for composite glyphs.
    pub number_of_contours: i16,
    pub bbox: BoundingBox<FWord>,
}

impl<'a> FontRead<'a> for GlyphHeader {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        let number_of_contours = cursor.read()?;
        let bbox = BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        };
        Ok(Self {
            number_of_contours,
            bbox,
        })
    }
}

/// A glyph record.
///
/// Composite glyphs are recognized but their components are not decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Simple(SimpleGlyph),
    Composite(GlyphHeader),
}

impl Glyph {
    pub fn header(&self) -> &GlyphHeader {
        match self {
            Self::Simple(glyph) => &glyph.header,
            Self::Composite(header) => header,
        }
    }
}

impl<'a> FontRead<'a> for Glyph {
    fn read(cursor: &mut Cursor<'a>) -> Result<Self, ReadError> {
        let header = GlyphHeader::read(cursor)?;
        if header.number_of_contours < 0 {
            Ok(Self::Composite(header))
        } else {
            SimpleGlyph::read_body(cursor, header).map(Self::Simple)
        }
    }
}

/// A fully decoded simple glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleGlyph {
    header: GlyphHeader,
    end_pts_of_contours: Vec<u16>,
    instruction_length: u16,
    flags: Vec<SimpleGlyphFlags>,
    points: Vec<CurvePoint>,
}

impl SimpleGlyph {
    pub fn header(&self) -> &GlyphHeader {
        &self.header
    }

    pub fn bbox(&self) -> BoundingBox<FWord> {
        self.header.bbox
    }

    /// The index of the last point in each contour.
    pub fn end_pts_of_contours(&self) -> &[u16] {
        &self.end_pts_of_contours
    }

    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of bytes of hinting instructions, which are skipped.
    pub fn instruction_length(&self) -> u16 {
        self.instruction_length
    }

    /// Every point of the glyph, in absolute font units.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// The decoded flags, one per point.
    pub fn flags(&self) -> &[SimpleGlyphFlags] {
        &self.flags
    }

    /// The coordinate deltas stored in the 16-bit form, as
    /// `(point index, delta)`; every x delta comes before every y delta.
    ///
    /// One byte and unchanged deltas are never listed.
    pub fn long_deltas(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        let x = self.long_deltas_for(
            |point| point.x,
            SimpleGlyphFlags::X_SHORT_VECTOR,
            SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
        );
        let y = self.long_deltas_for(
            |point| point.y,
            SimpleGlyphFlags::Y_SHORT_VECTOR,
            SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
        );
        x.chain(y)
    }

    fn long_deltas_for(
        &self,
        coord: fn(&CurvePoint) -> i32,
        short: SimpleGlyphFlags,
        same_or_positive: SimpleGlyphFlags,
    ) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(move |(_, flag)| !flag.contains(short) && !flag.contains(same_or_positive))
            .map(move |(i, _)| {
                let previous = i.checked_sub(1).map_or(0, |prev| coord(&self.points[prev]));
                (i, coord(&self.points[i]).wrapping_sub(previous))
            })
    }

    /// The points of each contour.
    pub fn contours(&self) -> impl Iterator<Item = &[CurvePoint]> + '_ {
        let mut start = 0;
        self.end_pts_of_contours.iter().map(move |end| {
            let end = *end as usize + 1;
            let contour = &self.points[start..end];
            start = end;
            contour
        })
    }

    fn read_body(cursor: &mut Cursor<'_>, header: GlyphHeader) -> Result<Self, ReadError> {
        if header.number_of_contours == 0 {
            return Ok(Self {
                header,
                end_pts_of_contours: Vec::new(),
                instruction_length: 0,
                flags: Vec::new(),
                points: Vec::new(),
            });
        }
        let end_pts_of_contours: Vec<u16> =
            cursor.read_array(header.number_of_contours as usize)?;
        if end_pts_of_contours.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ReadError::MalformedData(
                "endPtsOfContours must be strictly increasing",
            ));
        }
        // non-empty, checked above
        let n_points = end_pts_of_contours.last().map_or(0, |last| *last as usize + 1);
        let instruction_length = cursor.read::<u16>()?;
        cursor.advance_by(instruction_length as usize);

        let mut flags = Vec::with_capacity(n_points);
        while flags.len() < n_points {
            let flag = cursor.read::<SimpleGlyphFlags>()?;
            let count = if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                cursor.read::<u8>()? as usize + 1
            } else {
                1
            };
            if flags.len() + count > n_points {
                return Err(ReadError::MalformedData(
                    "flag repeat count runs past the last point",
                ));
            }
            flags.extend(std::iter::repeat(flag).take(count));
        }

        let mut points = flags
            .iter()
            .map(|flag| CurvePoint::new(0, 0, flag.contains(SimpleGlyphFlags::ON_CURVE_POINT)))
            .collect::<Vec<_>>();
        let mut x = 0i32;
        for (flag, point) in flags.iter().zip(points.iter_mut()) {
            x = x.wrapping_add(read_delta(
                cursor,
                *flag,
                SimpleGlyphFlags::X_SHORT_VECTOR,
                SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            )?);
            point.x = x;
        }
        let mut y = 0i32;
        for (flag, point) in flags.iter().zip(points.iter_mut()) {
            y = y.wrapping_add(read_delta(
                cursor,
                *flag,
                SimpleGlyphFlags::Y_SHORT_VECTOR,
                SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            )?);
            point.y = y;
        }
        Ok(Self {
            header,
            end_pts_of_contours,
            instruction_length,
            flags,
            points,
        })
    }
}

fn read_delta(
    cursor: &mut Cursor<'_>,
    flag: SimpleGlyphFlags,
    short: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
) -> Result<i32, ReadError> {
    if flag.contains(short) {
        let delta = cursor.read::<u8>()? as i32;
        if flag.contains(same_or_positive) {
            Ok(delta)
        } else {
            Ok(-delta)
        }
    } else if flag.contains(same_or_positive) {
        Ok(0)
    } else {
        cursor.read::<i16>().map(i32::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontData;
    use pretty_assertions::assert_eq;
    use ttf_test_data::{be_buffer, tables};

    fn read_glyph(data: &[u8]) -> Result<Glyph, ReadError> {
        Glyph::read(&mut FontData::new(data).cursor())
    }

    fn simple(glyph: Glyph) -> SimpleGlyph {
        match glyph {
            Glyph::Simple(glyph) => glyph,
            Glyph::Composite(_) => panic!("expected a simple glyph"),
        }
    }

    #[test]
    fn hand_encoded_points() {
        #[rustfmt::skip]
        let buf = be_buffer! {
            1_i16,                              // numberOfContours
            -275_i16, 5_i16, 30_i16, 1010_i16,  // bbox
            3_u16,                              // endPtsOfContours[0]
            1_u16, 0xAA_u8,                     // instructions
            0x3F_u8, 1_u8,                      // on, short +x, short +y, repeated once
            0x00_u8,                            // off, long x, long y
            0x23_u8,                            // on, short -x, same y
            10_u8, 20_u8, -300_i16, 5_u8,       // x deltas
            5_u8, 5_u8, 1000_i16                // y deltas
        };
        let glyph = simple(read_glyph(&buf).unwrap());
        assert_eq!(glyph.header().number_of_contours, 1);
        assert_eq!(glyph.bbox().x_min, FWord::new(-275));
        assert_eq!(glyph.bbox().y_max, FWord::new(1010));
        assert_eq!(glyph.end_pts_of_contours(), &[3]);
        assert_eq!(glyph.instruction_length(), 1);
        assert_eq!(
            glyph.points(),
            &[
                CurvePoint::on_curve(10, 5),
                CurvePoint::on_curve(30, 10),
                CurvePoint::off_curve(-270, 1010),
                CurvePoint::on_curve(-275, 1010),
            ]
        );
    }

    #[test]
    fn encoded_contours() {
        let square = [(0, 0, true), (0, 700, true), (500, 700, true), (500, 0, true)];
        let bowl = [(100, 100, false), (100, 600, false), (400, 350, false)];
        let buf = tables::simple_glyph(&[&square, &bowl]);
        let glyph = simple(read_glyph(&buf).unwrap());
        assert_eq!(glyph.end_pts_of_contours(), &[3, 6]);
        assert_eq!(glyph.num_points(), 7);
        let contours = glyph.contours().collect::<Vec<_>>();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0][2], CurvePoint::on_curve(500, 700));
        assert_eq!(contours[1][2], CurvePoint::off_curve(400, 350));
        assert_eq!(glyph.bbox().x_max, FWord::new(500));
    }

    #[test]
    fn skips_instructions() {
        let triangle = [(0, 0, true), (250, 700, true), (500, 0, true)];
        let buf = tables::simple_glyph_with_instructions(&[&triangle], &[0xB0, 0x01, 0x2C]);
        let glyph = simple(read_glyph(&buf).unwrap());
        assert_eq!(glyph.instruction_length(), 3);
        assert_eq!(glyph.points()[1], CurvePoint::on_curve(250, 700));
    }

    #[test]
    fn empty_glyph() {
        let buf = be_buffer! { 0_i16, 0_i16, 0_i16, 0_i16, 0_i16 };
        let glyph = simple(read_glyph(&buf).unwrap());
        assert_eq!(glyph.num_points(), 0);
        assert_eq!(glyph.contours().count(), 0);
    }

    #[test]
    fn composite_is_not_decoded() {
        let buf = tables::composite_glyph(2);
        let glyph = read_glyph(&buf).unwrap();
        assert!(matches!(glyph, Glyph::Composite(_)));
        assert_eq!(glyph.header().number_of_contours, -1);
    }

    #[test]
    fn repeat_overshoot() {
        #[rustfmt::skip]
        let buf = be_buffer! {
            1_i16, 0_i16, 0_i16, 0_i16, 0_i16,
            1_u16,              // two points
            0_u16,
            0x39_u8, 2_u8       // three flags
        };
        assert!(matches!(read_glyph(&buf), Err(ReadError::MalformedData(_))));
    }

    #[test]
    fn truncated_flags() {
        #[rustfmt::skip]
        let buf = be_buffer! {
            1_i16, 0_i16, 0_i16, 0_i16, 0_i16,
            2_u16,
            0_u16,
            0x31_u8, 0x31_u8
        };
        assert_eq!(read_glyph(&buf), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn truncated_coordinates() {
        let triangle = [(0, 0, true), (250, 700, true), (500, 0, true)];
        let mut buf: Vec<u8> = tables::simple_glyph(&[&triangle]).into();
        buf.pop();
        assert_eq!(read_glyph(&buf), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn only_long_deltas_are_listed() {
        // x: 0 (same), +200 (short), -20000 (long); y: 0 (same), 0 (same), 300 (long)
        let contour = [(0, 0, true), (200, 0, true), (-19800, 300, true)];
        let buf = tables::simple_glyph(&[&contour]);
        let glyph = simple(read_glyph(&buf).unwrap());
        assert_eq!(glyph.long_deltas().collect::<Vec<_>>(), [(2, -20000), (2, 300)]);
        assert!(glyph.flags()[1].contains(SimpleGlyphFlags::X_SHORT_VECTOR));
    }

    #[test]
    fn end_points_must_increase() {
        #[rustfmt::skip]
        let buf = be_buffer! {
            2_i16, 0_i16, 0_i16, 0_i16, 0_i16,
            3_u16, 3_u16,
            0_u16
        };
        assert!(matches!(read_glyph(&buf), Err(ReadError::MalformedData(_))));
    }
}
