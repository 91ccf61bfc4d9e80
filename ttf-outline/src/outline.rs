//! Glyph outlines as closed loops of points.
//!
//! A decoded glyph is a list of [`Contour`]s. Each contour lists its points
//! in drawing order: on-curve points are anchors and off-curve points are
//! quadratic control points. Two adjacent control points always have an
//! implicit on-curve point between them, which is made explicit here, and
//! every contour ends with a copy of its first point so that it can be
//! drawn as one closed path.

use std::sync::Arc;

use ttf_read::{
    tables::glyf::{CurvePoint, SimpleGlyph},
    types::{BoundingBox, Point},
};

/// A point of a [`GlyphOutline`], in em units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphPoint {
    pub x: f32,
    pub y: f32,
    /// `false` for quadratic control points.
    pub on_curve: bool,
    /// Set on the last point stored in the font for this contour.
    pub end_of_contour: bool,
    /// Synthesized between two consecutive control points.
    pub implicit: bool,
    /// The closing copy of the contour's first point.
    pub return_point: bool,
}

impl GlyphPoint {
    pub fn position(&self) -> Point<f32> {
        Point::new(self.x, self.y)
    }

    fn from_curve_point(point: &CurvePoint, units_per_em: f32) -> Self {
        Self {
            x: point.x as f32 / units_per_em,
            y: point.y as f32 / units_per_em,
            on_curve: point.on_curve,
            ..Default::default()
        }
    }

    fn implicit(position: Point<f32>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            on_curve: true,
            implicit: true,
            ..Default::default()
        }
    }
}

/// One closed loop of a glyph.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    points: Vec<GlyphPoint>,
}

impl Contour {
    /// Builds a closed contour from the points stored in the font.
    ///
    /// `points` must be non-empty.
    fn new(points: &[GlyphPoint]) -> Self {
        let mut result = Vec::with_capacity(points.len() * 2 + 1);
        let len = points.len();
        for (i, point) in points.iter().enumerate() {
            let mut point = *point;
            point.end_of_contour = i + 1 == len;
            result.push(point);
            // a single point can't pair with itself
            if len < 2 {
                continue;
            }
            let next = &points[(i + 1) % len];
            if !point.on_curve && !next.on_curve {
                result.push(GlyphPoint::implicit(
                    point.position().midpoint(next.position()),
                ));
            }
        }
        if let Some(first) = points.first() {
            result.push(GlyphPoint {
                on_curve: true,
                return_point: true,
                ..*first
            });
        }
        Self { points: result }
    }

    /// All points, including the implicit and return points.
    pub fn points(&self) -> &[GlyphPoint] {
        &self.points
    }

    /// The points that were stored in the font.
    pub fn explicit_points(&self) -> impl Iterator<Item = &GlyphPoint> + '_ {
        self.points
            .iter()
            .filter(|point| !point.implicit && !point.return_point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The decoded outline of a simple glyph, in em units.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphOutline {
    contours: Vec<Contour>,
    bbox: BoundingBox<f32>,
}

impl GlyphOutline {
    /// Normalizes `glyph` by `units_per_em` and closes its contours.
    pub fn from_simple_glyph(glyph: &SimpleGlyph, units_per_em: u16) -> Self {
        let upem = units_per_em as f32;
        let bbox = glyph.bbox().map(|value| value.to_em(units_per_em));
        let contours = glyph
            .contours()
            .filter(|points| !points.is_empty())
            .map(|points| {
                let points = points
                    .iter()
                    .map(|point| GlyphPoint::from_curve_point(point, upem))
                    .collect::<Vec<_>>();
                Contour::new(&points)
            })
            .collect();
        Self { contours, bbox }
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// The bounding box stored in the font, in em units.
    pub fn bbox(&self) -> BoundingBox<f32> {
        self.bbox
    }

    /// `true` if the glyph has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The number of points across all contours.
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }
}

/// The result of decoding a glyph record.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    Simple(Arc<GlyphOutline>),
    /// Composite glyphs are not decoded; glyph 0 is drawn in their place.
    CompositeFallback {
        /// The offset of the composite glyph's record.
        glyph_offset: u32,
        notdef: Arc<GlyphOutline>,
    },
}

impl Outline {
    /// The outline to draw.
    pub fn glyph_outline(&self) -> &GlyphOutline {
        match self {
            Self::Simple(outline) => outline,
            Self::CompositeFallback { notdef, .. } => notdef,
        }
    }

    /// The shared outline to draw.
    pub fn to_shared(&self) -> Arc<GlyphOutline> {
        match self {
            Self::Simple(outline) => outline.clone(),
            Self::CompositeFallback { notdef, .. } => notdef.clone(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::CompositeFallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(x: f32, y: f32, on_curve: bool) -> GlyphPoint {
        GlyphPoint {
            x,
            y,
            on_curve,
            ..Default::default()
        }
    }

    #[test]
    fn closes_on_curve_contour() {
        let contour = Contour::new(&[
            raw(0.0, 0.0, true),
            raw(0.5, 1.0, true),
            raw(1.0, 0.0, true),
        ]);
        let points = contour.points();
        assert_eq!(points.len(), 4);
        assert!(points[2].end_of_contour);
        assert!(!points[1].end_of_contour);
        let last = points[3];
        assert!(last.return_point && last.on_curve && !last.implicit);
        assert!(!last.end_of_contour);
        assert_eq!(last.position(), points[0].position());
    }

    #[test]
    fn implicit_between_control_points() {
        let contour = Contour::new(&[
            raw(0.0, 0.0, true),
            raw(0.0, 1.0, false),
            raw(1.0, 1.0, false),
            raw(1.0, 0.0, true),
        ]);
        let expected = vec![
            raw(0.0, 0.0, true),
            raw(0.0, 1.0, false),
            GlyphPoint::implicit(Point::new(0.5, 1.0)),
            raw(1.0, 1.0, false),
            GlyphPoint {
                end_of_contour: true,
                ..raw(1.0, 0.0, true)
            },
            GlyphPoint {
                return_point: true,
                ..raw(0.0, 0.0, true)
            },
        ];
        assert_eq!(contour.points(), expected.as_slice());
        assert_eq!(contour.explicit_points().count(), 4);
    }

    #[test]
    fn implicit_across_the_wrap() {
        let contour = Contour::new(&[
            raw(0.0, 0.0, false),
            raw(1.0, 0.0, true),
            raw(1.0, 1.0, false),
        ]);
        let points = contour.points();
        // the midpoint of the last and first points comes after the last
        assert_eq!(points.len(), 5);
        assert!(points[2].end_of_contour);
        assert_eq!(points[3], GlyphPoint::implicit(Point::new(0.5, 0.5)));
        assert!(points[4].return_point);
        // the return point is on-curve even when the first point is not
        assert!(points[4].on_curve);
        assert_eq!(points[4].position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn single_point() {
        let contour = Contour::new(&[raw(0.25, 0.25, false)]);
        let points = contour.points();
        assert_eq!(points.len(), 2);
        assert!(points[0].end_of_contour);
        assert!(points[1].return_point);
        assert!(!points.iter().any(|point| point.implicit));
    }

    #[test]
    fn fallback_exposes_notdef() {
        let notdef = Arc::new(GlyphOutline::default());
        let outline = Outline::CompositeFallback {
            glyph_offset: 12,
            notdef: notdef.clone(),
        };
        assert!(outline.is_fallback());
        assert!(Arc::ptr_eq(&outline.to_shared(), &notdef));
        assert!(outline.glyph_outline().is_empty());
    }
}
