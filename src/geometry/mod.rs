mod cell;
mod envelope;
mod line;
mod line_segment;
mod pairs;
mod plane;
mod point;
mod polygon;
mod polyhedron;
mod rectangle;
mod tetrahedron;
mod triangle;
mod vector;

pub use envelope::{Envelope, EnvelopeFace, EnvelopeKind};
pub use line::Line;
pub use line_segment::LineSegment;
pub use plane::{Plane, PointPlaneClassification};
pub use point::Point;
pub use polygon::ConvexPolygon;
pub use polyhedron::ConvexPolyhedron;
pub use rectangle::Rectangle;
pub use tetrahedron::Tetrahedron;
pub use triangle::Triangle;
pub use vector::Vector;

pub(crate) use polygon::spanning_normal;

use crate::error::Result;
use crate::math::{Oom, Rational, RationalSqrt, RoundingMode};

/// Any value the kernel can produce or consume.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    LineSegment(LineSegment),
    Plane(Plane),
    Triangle(Triangle),
    Rectangle(Rectangle),
    Tetrahedron(Tetrahedron),
    ConvexPolygon(ConvexPolygon),
    ConvexPolyhedron(ConvexPolyhedron),
    Envelope(Envelope),
}

impl Geometry {
    /// Short lowercase name of the variant.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::LineSegment(_) => "line segment",
            Self::Plane(_) => "plane",
            Self::Triangle(_) => "triangle",
            Self::Rectangle(_) => "rectangle",
            Self::Tetrahedron(_) => "tetrahedron",
            Self::ConvexPolygon(_) => "convex polygon",
            Self::ConvexPolyhedron(_) => "convex polyhedron",
            Self::Envelope(_) => "envelope",
        }
    }

    /// Whether the value has finite extent.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Self::Line(_) | Self::Plane(_))
    }

    /// The bounding envelope, `None` for lines and planes.
    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Self::Point(g) => Some(Envelope::from_point(g)),
            Self::Line(_) | Self::Plane(_) => None,
            Self::LineSegment(g) => Some(g.envelope().clone()),
            Self::Triangle(g) => Some(g.envelope().clone()),
            Self::Rectangle(g) => Some(g.envelope().clone()),
            Self::Tetrahedron(g) => Some(g.envelope().clone()),
            Self::ConvexPolygon(g) => Some(g.envelope().clone()),
            Self::ConvexPolyhedron(g) => Some(g.envelope().clone()),
            Self::Envelope(g) => Some(g.clone()),
        }
    }

    /// The points the value is built from: corners for bounded values, two
    /// points for a line and three for a plane.
    #[must_use]
    pub fn defining_points(&self) -> Vec<Point> {
        match self {
            Self::Point(g) => vec![g.clone()],
            Self::Line(g) => g.points().to_vec(),
            Self::LineSegment(g) => g.points().to_vec(),
            Self::Plane(g) => g.points().to_vec(),
            Self::Triangle(g) => g.corners().to_vec(),
            Self::Rectangle(g) => g.corners().to_vec(),
            Self::Tetrahedron(g) => g.corners().to_vec(),
            Self::ConvexPolygon(g) => g.corners().to_vec(),
            Self::ConvexPolyhedron(g) => g.vertices().to_vec(),
            Self::Envelope(g) => g.corners().to_vec(),
        }
    }
}

/// Exact intersection with another value.
pub trait Intersect<Rhs: ?Sized = Self> {
    /// The common part of `self` and `other`, in its simplest form.
    fn intersection(&self, other: &Rhs) -> Option<Geometry>;

    fn is_intersected_by(&self, other: &Rhs) -> bool {
        self.intersection(other).is_some()
    }
}

/// Distance to another value.
///
/// Zero exactly when the two values intersect.
pub trait Distance<Rhs: ?Sized = Self> {
    /// Squared distance, exact.
    fn distance_squared(&self, other: &Rhs) -> Rational;

    /// Distance as a square root, exact when the square is a perfect square.
    fn distance_exact(&self, other: &Rhs) -> RationalSqrt {
        RationalSqrt::from_non_negative(self.distance_squared(other))
    }

    /// Distance rounded to a multiple of `10^oom`.
    fn distance(&self, other: &Rhs, oom: Oom, mode: RoundingMode) -> Rational {
        self.distance_exact(other).sqrt(oom, mode)
    }
}

/// Rigid motions.
pub trait Transform: Sized {
    /// Moves the value by `v` in place.
    fn translate(&mut self, v: &Vector);

    /// Rotates by `theta` radians about `axis`.
    ///
    /// The rotation is exactly orthogonal; only the angle is approximated at
    /// `oom`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented after rotation.
    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self>;
}

/// A bounded convex planar region.
pub trait PlanarFace {
    fn plane(&self) -> &Plane;

    /// Corners, counter-clockwise about the plane normal.
    fn corners(&self) -> &[Point];

    /// Boundary segments, the `i`-th joining corner `i` to corner `i + 1`.
    fn boundary(&self) -> &[LineSegment];
}

/// A bounded convex cell of dimension 0 to 3.
///
/// Segments, planar faces, solids and envelopes all expose their vertices,
/// edges and planar faces so intersections and distances between any two of
/// them can be computed by one routine.
pub trait Polytope {
    fn vertices(&self) -> &[Point];

    fn edges(&self) -> &[LineSegment];

    /// Planar faces: the cell itself when flat, none for segments.
    fn faces(&self) -> Vec<&dyn PlanarFace>;

    /// Closed containment.
    fn contains(&self, x: &Point) -> bool;

    fn bounds(&self) -> &Envelope;

    fn to_geometry(&self) -> Geometry;

    fn as_envelope(&self) -> Option<&Envelope> {
        None
    }

    fn as_segment(&self) -> Option<&LineSegment> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn segments_nest_inside_their_own_envelopes() {
        let segment = LineSegment::new(Point::origin(), Point::from_ints(0, 2, 0)).unwrap();
        let envelope = segment.envelope();
        assert_eq!(envelope.kind(), EnvelopeKind::LineY);
        let side = match envelope.left() {
            EnvelopeFace::Segment(s) => s,
            other => panic!("expected a segment side, got {other:?}"),
        };
        assert_eq!(side, &segment);
        assert_eq!(side.envelope(), envelope);

        let shapes = vec![
            Geometry::LineSegment(segment.clone()),
            Geometry::Envelope(envelope.clone()),
            envelope.fore().to_geometry(),
        ];
        assert_eq!(shapes[0], shapes[2]);
        assert!(shapes.iter().all(|g| g.envelope().as_ref() == Some(envelope)));
    }

    #[test]
    fn cached_parts_live_behind_pointers() {
        // only the defining points are stored inline
        assert!(std::mem::size_of::<Geometry>() < 8 * 1024);
        assert!(std::mem::size_of::<Tetrahedron>() < 8 * 1024);

        let cube = Envelope::new(&[Point::origin(), Point::from_ints(1, 1, 1)]).unwrap();
        let faces: Vec<Geometry> = cube.rectangles().iter().cloned().map(Geometry::Rectangle).collect();
        assert_eq!(faces.len(), 6);
    }
}
