use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use num_traits::{One, Zero};

use crate::error::{GeometryError, Result};
use crate::math::{Rational, Vector3};

use super::line::Line;
use super::line_segment::LineSegment;
use super::point::Point;
use super::rectangle::Rectangle;
use super::vector::Vector;
use super::Geometry;

/// Structural type of an envelope, by which extents coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    /// All three extents collapse.
    Point,
    /// A segment along x.
    LineX,
    /// A segment along y.
    LineY,
    /// A segment along z.
    LineZ,
    /// A rectangle in the plane `x = xMin`.
    RectangleYz,
    /// A rectangle in the plane `y = yMin`.
    RectangleXz,
    /// A rectangle in the plane `z = zMin`.
    RectangleXy,
    /// A box with volume.
    Box,
}

impl EnvelopeKind {
    /// The classic type number, 0 to 7.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Point => 0,
            Self::LineX => 1,
            Self::LineY => 2,
            Self::LineZ => 3,
            Self::RectangleYz => 4,
            Self::RectangleXz => 5,
            Self::RectangleXy => 6,
            Self::Box => 7,
        }
    }
}

/// The shape of one named side of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeFace {
    Point(Point),
    Segment(LineSegment),
    Rectangle(Rectangle),
}

impl EnvelopeFace {
    /// Returns the side as a standalone geometry value.
    #[must_use]
    pub fn to_geometry(&self) -> Geometry {
        match self {
            Self::Point(p) => Geometry::Point(p.clone()),
            Self::Segment(s) => Geometry::LineSegment(s.clone()),
            Self::Rectangle(r) => Geometry::Rectangle(r.clone()),
        }
    }
}

/// Corner orders of the outward box faces, indexed by `2·axis + side`.
///
/// Corner `i` takes the maximum on x when bit 0 is set, on y for bit 1 and
/// on z for bit 2.
const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 4, 6, 2],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
    [0, 2, 3, 1],
    [4, 5, 7, 6],
];

#[derive(Debug, Clone)]
struct Parts {
    corners: Vec<Point>,
    edges: Vec<LineSegment>,
    rectangles: Vec<Rectangle>,
    /// left, right, bottom, top, fore, aft
    sides: [EnvelopeFace; 6],
}

/// An axis-aligned bounding envelope, possibly degenerate.
#[derive(Debug, Clone)]
pub struct Envelope {
    min: [Rational; 3],
    max: [Rational; 3],
    parts: OnceLock<Box<Parts>>,
}

impl Envelope {
    /// The envelope of a non-empty point set.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyEnvelope`] if `points` is empty.
    pub fn new(points: &[Point]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(GeometryError::EmptyEnvelope)?;
        Ok(Self::bounding(first, rest))
    }

    /// Creates an envelope from its extents.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidExtents`] if a minimum exceeds its maximum.
    pub fn from_extents(
        x_min: Rational,
        x_max: Rational,
        y_min: Rational,
        y_max: Rational,
        z_min: Rational,
        z_max: Rational,
    ) -> Result<Self> {
        let min = [x_min, y_min, z_min];
        let max = [x_max, y_max, z_max];
        for (axis, name) in ['x', 'y', 'z'].into_iter().enumerate() {
            if min[axis] > max[axis] {
                return Err(GeometryError::InvalidExtents { axis: name }.into());
            }
        }
        Ok(Self::from_arrays(min, max))
    }

    /// The envelope of `first` and `rest`.
    pub(crate) fn bounding(first: &Point, rest: &[Point]) -> Self {
        let start = first.coordinates();
        let mut min = [start.x.clone(), start.y.clone(), start.z.clone()];
        let mut max = min.clone();
        for p in rest {
            let c = p.coordinates();
            for (axis, value) in c.iter().enumerate() {
                if value < &min[axis] {
                    min[axis] = value.clone();
                }
                if value > &max[axis] {
                    max[axis] = value.clone();
                }
            }
        }
        Self::from_arrays(min, max)
    }

    /// The envelope of a single point.
    #[must_use]
    pub fn from_point(p: &Point) -> Self {
        Self::bounding(p, &[])
    }

    fn from_arrays(min: [Rational; 3], max: [Rational; 3]) -> Self {
        Self {
            min,
            max,
            parts: OnceLock::new(),
        }
    }

    /// Returns the smallest x coordinate.
    #[must_use]
    pub fn x_min(&self) -> &Rational {
        &self.min[0]
    }

    /// Returns the largest x coordinate.
    #[must_use]
    pub fn x_max(&self) -> &Rational {
        &self.max[0]
    }

    /// Returns the smallest y coordinate.
    #[must_use]
    pub fn y_min(&self) -> &Rational {
        &self.min[1]
    }

    /// Returns the largest y coordinate.
    #[must_use]
    pub fn y_max(&self) -> &Rational {
        &self.max[1]
    }

    /// Returns the smallest z coordinate.
    #[must_use]
    pub fn z_min(&self) -> &Rational {
        &self.min[2]
    }

    /// Returns the largest z coordinate.
    #[must_use]
    pub fn z_max(&self) -> &Rational {
        &self.max[2]
    }

    /// Returns the degeneracy kind, from which extents coincide.
    #[must_use]
    pub fn kind(&self) -> EnvelopeKind {
        let flat = |axis: usize| self.min[axis] == self.max[axis];
        match (flat(0), flat(1), flat(2)) {
            (true, true, true) => EnvelopeKind::Point,
            (false, true, true) => EnvelopeKind::LineX,
            (true, false, true) => EnvelopeKind::LineY,
            (true, true, false) => EnvelopeKind::LineZ,
            (true, false, false) => EnvelopeKind::RectangleYz,
            (false, true, false) => EnvelopeKind::RectangleXz,
            (false, false, true) => EnvelopeKind::RectangleXy,
            (false, false, false) => EnvelopeKind::Box,
        }
    }

    /// [`EnvelopeKind::index`] of [`Self::kind`].
    #[must_use]
    pub fn type_index(&self) -> u8 {
        self.kind().index()
    }

    fn corner(&self, i: usize) -> Point {
        let pick = |axis: usize| {
            if (i >> axis) & 1 == 1 {
                self.max[axis].clone()
            } else {
                self.min[axis].clone()
            }
        };
        Point::from_coords(Vector3::new(pick(0), pick(1), pick(2)))
    }

    fn face_rectangle(&self, order: [usize; 4]) -> Rectangle {
        let [p, q, r, s] = order.map(|i| self.corner(i));
        Rectangle::new_unchecked(p, q, r, s)
    }

    /// The part of `self` on its minimum (`upper == false`) or maximum side
    /// along `axis`, wound outward.
    fn side(&self, axis: usize, upper: bool) -> EnvelopeFace {
        let value = if upper { &self.max[axis] } else { &self.min[axis] };
        let mut min = self.min.clone();
        let mut max = self.max.clone();
        min[axis] = value.clone();
        max[axis] = value.clone();
        let flat = Self::from_arrays(min, max);
        match flat.kind() {
            EnvelopeKind::Point => EnvelopeFace::Point(flat.corner(0)),
            EnvelopeKind::LineX | EnvelopeKind::LineY | EnvelopeKind::LineZ => {
                EnvelopeFace::Segment(LineSegment::new_unchecked(flat.corner(0), flat.corner(7)))
            }
            _ => EnvelopeFace::Rectangle(flat.face_rectangle(FACE_CORNERS[2 * axis + usize::from(upper)])),
        }
    }

    fn parts(&self) -> &Parts {
        self.parts.get_or_init(|| {
            let kind = self.kind();
            tracing::debug!(?kind, "building envelope parts");

            let mut corners: Vec<Point> = Vec::with_capacity(8);
            for i in 0..8 {
                let c = self.corner(i);
                if !corners.contains(&c) {
                    corners.push(c);
                }
            }

            let mut edges: Vec<LineSegment> = Vec::new();
            for bit in [1, 2, 4] {
                for i in (0..8).filter(|i| i & bit == 0) {
                    let (a, b) = (self.corner(i), self.corner(i | bit));
                    if a == b {
                        continue;
                    }
                    let edge = LineSegment::new_unchecked(a, b);
                    if !edges.contains(&edge) {
                        edges.push(edge);
                    }
                }
            }

            let rectangles = match kind {
                EnvelopeKind::Box => FACE_CORNERS.iter().map(|o| self.face_rectangle(*o)).collect(),
                EnvelopeKind::RectangleYz => vec![self.face_rectangle(FACE_CORNERS[0])],
                EnvelopeKind::RectangleXz => vec![self.face_rectangle(FACE_CORNERS[2])],
                EnvelopeKind::RectangleXy => vec![self.face_rectangle(FACE_CORNERS[4])],
                _ => Vec::new(),
            };

            let sides = [0, 1, 2, 3, 4, 5].map(|i| self.side(i / 2, i % 2 == 1));

            Box::new(Parts {
                corners,
                edges,
                rectangles,
                sides,
            })
        })
    }

    /// Distinct corner points: 1, 2, 4 or 8 of them.
    #[must_use]
    pub fn corners(&self) -> &[Point] {
        &self.parts().corners
    }

    /// Distinct edges: 0, 1, 4 or 12 of them.
    #[must_use]
    pub fn edges(&self) -> &[LineSegment] {
        &self.parts().edges
    }

    /// The planar faces with area, outward for a box.
    #[must_use]
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.parts().rectangles
    }

    /// The side `x = xMin`.
    #[must_use]
    pub fn left(&self) -> &EnvelopeFace {
        &self.parts().sides[0]
    }

    /// The side `x = xMax`.
    #[must_use]
    pub fn right(&self) -> &EnvelopeFace {
        &self.parts().sides[1]
    }

    /// The side `y = yMin`.
    #[must_use]
    pub fn bottom(&self) -> &EnvelopeFace {
        &self.parts().sides[2]
    }

    /// The side `y = yMax`.
    #[must_use]
    pub fn top(&self) -> &EnvelopeFace {
        &self.parts().sides[3]
    }

    /// The side `z = zMin`.
    #[must_use]
    pub fn fore(&self) -> &EnvelopeFace {
        &self.parts().sides[4]
    }

    /// The side `z = zMax`.
    #[must_use]
    pub fn aft(&self) -> &EnvelopeFace {
        &self.parts().sides[5]
    }

    /// The smallest envelope containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_contained_by(self) {
            return self.clone();
        }
        if self.is_contained_by(other) {
            return other.clone();
        }
        let min = [0, 1, 2].map(|a| self.min[a].clone().min(other.min[a].clone()));
        let max = [0, 1, 2].map(|a| self.max[a].clone().max(other.max[a].clone()));
        Self::from_arrays(min, max)
    }

    /// The common part of both envelopes, or `None` when disjoint.
    #[must_use]
    pub fn intersection_envelope(&self, other: &Self) -> Option<Self> {
        if !self.is_intersected_by_envelope(other) {
            return None;
        }
        let min = [0, 1, 2].map(|a| self.min[a].clone().max(other.min[a].clone()));
        let max = [0, 1, 2].map(|a| self.max[a].clone().min(other.max[a].clone()));
        Some(Self::from_arrays(min, max))
    }

    /// Boundary-inclusive overlap test.
    #[must_use]
    pub fn is_intersected_by_envelope(&self, other: &Self) -> bool {
        (0..3).all(|a| self.min[a] <= other.max[a] && other.min[a] <= self.max[a])
    }

    /// Boundary-inclusive containment of a point.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        x.coordinates()
            .iter()
            .enumerate()
            .all(|(a, c)| &self.min[a] <= c && c <= &self.max[a])
    }

    /// Whether `other` covers `self`, boundaries included.
    #[must_use]
    pub fn is_contained_by(&self, other: &Self) -> bool {
        (0..3).all(|a| other.min[a] <= self.min[a] && self.max[a] <= other.max[a])
    }

    /// Parameter interval of `line` inside the envelope, intersected with
    /// `[lo, hi]` where given.
    fn clip(&self, line: &Line, mut lo: Option<Rational>, mut hi: Option<Rational>) -> Option<(Rational, Rational)> {
        let origin = line.p().coordinates();
        let direction = line.v().coords();
        for axis in 0..3 {
            let p = &origin[axis];
            let v = &direction[axis];
            if v.is_zero() {
                if p < &self.min[axis] || p > &self.max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (&self.min[axis] - p) / v;
            let t2 = (&self.max[axis] - p) / v;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            lo = Some(lo.map_or(near.clone(), |l| l.max(near)));
            hi = Some(hi.map_or(far.clone(), |h| h.min(far)));
        }
        let (lo, hi) = (lo?, hi?);
        (lo <= hi).then_some((lo, hi))
    }

    /// Intersection with a line: a point or a segment.
    #[must_use]
    pub fn line_intersection(&self, line: &Line) -> Option<Geometry> {
        let (lo, hi) = self.clip(line, None, None)?;
        Some(LineSegment::between(line.point_at(&lo), line.point_at(&hi)))
    }

    /// Intersection with a segment: a point or a segment.
    #[must_use]
    pub fn segment_intersection(&self, segment: &LineSegment) -> Option<Geometry> {
        let line = segment.line();
        let (lo, hi) = self.clip(line, Some(Rational::zero()), Some(Rational::one()))?;
        Some(LineSegment::between(line.point_at(&lo), line.point_at(&hi)))
    }

    /// Squared distance to `x`; zero inside.
    #[must_use]
    pub fn point_distance_squared(&self, x: &Point) -> Rational {
        x.coordinates()
            .iter()
            .enumerate()
            .map(|(a, c)| {
                let gap = gap(c, c, &self.min[a], &self.max[a]);
                &gap * &gap
            })
            .sum()
    }

    /// Squared distance to another envelope; zero when they overlap.
    #[must_use]
    pub fn envelope_distance_squared(&self, other: &Self) -> Rational {
        (0..3)
            .map(|a| {
                let gap = gap(&other.min[a], &other.max[a], &self.min[a], &self.max[a]);
                &gap * &gap
            })
            .sum()
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        for (axis, d) in v.coords().iter().enumerate() {
            self.min[axis] += d;
            self.max[axis] += d;
        }
        self.parts = OnceLock::new();
    }
}

/// Gap between the intervals `[lo, hi]` and `[min, max]`, zero if they overlap.
fn gap(lo: &Rational, hi: &Rational, min: &Rational, max: &Rational) -> Rational {
    if hi < min {
        min - hi
    } else if lo > max {
        lo - max
    } else {
        Rational::zero()
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl Eq for Envelope {}

impl Hash for Envelope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min.hash(state);
        self.max.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{integer, ratio};

    fn envelope(points: &[(i64, i64, i64)]) -> Envelope {
        let points: Vec<Point> = points.iter().map(|&(x, y, z)| Point::from_ints(x, y, z)).collect();
        Envelope::new(&points).unwrap()
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            Envelope::new(&[]),
            Err(crate::error::RatgeoError::Geometry(GeometryError::EmptyEnvelope))
        ));
        assert!(Envelope::from_extents(integer(1), integer(0), integer(0), integer(0), integer(0), integer(0)).is_err());
    }

    #[test]
    fn single_point_collapses_every_side() {
        let e = envelope(&[(0, 0, 0)]);
        assert_eq!(e.kind(), EnvelopeKind::Point);
        assert_eq!(e.type_index(), 0);
        for side in [e.left(), e.right(), e.top(), e.bottom(), e.fore(), e.aft()] {
            assert_eq!(side, &EnvelopeFace::Point(Point::origin()));
        }
        assert_eq!(e.corners().len(), 1);
        assert!(e.edges().is_empty());
    }

    #[test]
    fn classification_of_degenerate_envelopes() {
        assert_eq!(envelope(&[(0, 0, 0), (1, 0, 0)]).kind(), EnvelopeKind::LineX);
        assert_eq!(envelope(&[(0, 0, 0), (0, 2, 0)]).kind(), EnvelopeKind::LineY);
        assert_eq!(envelope(&[(3, 3, 0), (3, 3, 5)]).type_index(), 3);
        assert_eq!(envelope(&[(0, 0, 0), (0, 1, 1)]).kind(), EnvelopeKind::RectangleYz);
        assert_eq!(envelope(&[(0, 0, 0), (1, 0, 1)]).kind(), EnvelopeKind::RectangleXz);
        assert_eq!(envelope(&[(0, 0, 0), (1, 1, 0)]).kind(), EnvelopeKind::RectangleXy);
        assert_eq!(envelope(&[(0, 0, 0), (1, 1, 1)]).kind(), EnvelopeKind::Box);
    }

    #[test]
    fn sides_of_a_line_envelope() {
        let e = envelope(&[(0, 0, 0), (1, 0, 0)]);
        assert_eq!(e.left(), &EnvelopeFace::Point(Point::origin()));
        assert_eq!(e.right(), &EnvelopeFace::Point(Point::from_ints(1, 0, 0)));
        let whole = LineSegment::new(Point::origin(), Point::from_ints(1, 0, 0)).unwrap();
        assert_eq!(e.top(), &EnvelopeFace::Segment(whole.clone()));
        assert_eq!(e.fore(), &EnvelopeFace::Segment(whole));
        assert_eq!(e.edges().len(), 1);
    }

    #[test]
    fn box_parts() {
        let e = envelope(&[(0, 0, 0), (2, 3, 4)]);
        assert_eq!(e.corners().len(), 8);
        assert_eq!(e.edges().len(), 12);
        assert_eq!(e.rectangles().len(), 6);
        let centre = Point::from_ints(1, 1, 2);
        for face in e.rectangles() {
            assert_eq!(face.plane().side(&centre), crate::geometry::PointPlaneClassification::Back);
        }
        match e.top() {
            EnvelopeFace::Rectangle(r) => assert!(r.corners().iter().all(|c| c.y() == integer(3))),
            other => panic!("unexpected top {other:?}"),
        }
    }

    #[test]
    fn named_sides_face_outward() {
        let e = envelope(&[(0, 0, 0), (2, 3, 4)]);
        let centre = Point::from_ints(1, 1, 2);
        let sides = [e.left(), e.right(), e.bottom(), e.top(), e.fore(), e.aft()];
        for (i, side) in sides.into_iter().enumerate() {
            let EnvelopeFace::Rectangle(r) = side else {
                panic!("side {i} of a box is {side:?}");
            };
            assert_eq!(r.plane().side(&centre), crate::geometry::PointPlaneClassification::Back, "side {i}");
            assert!(e.rectangles().contains(r), "side {i}");
        }
    }

    #[test]
    fn slab_sides() {
        let e = envelope(&[(0, 0, 0), (1, 1, 0)]);
        assert_eq!(e.rectangles().len(), 1);
        assert_eq!(e.edges().len(), 4);
        assert!(matches!(e.fore(), EnvelopeFace::Rectangle(_)));
        assert!(matches!(e.left(), EnvelopeFace::Segment(_)));
    }

    #[test]
    fn union_and_intersection() {
        let a = envelope(&[(0, 0, 0), (2, 2, 2)]);
        let b = envelope(&[(1, 1, 1), (3, 3, 3)]);
        assert_eq!(a.union(&a), a);
        let u = a.union(&b);
        assert!(a.is_contained_by(&u) && b.is_contained_by(&u));
        assert_eq!(a.intersection_envelope(&b), Some(envelope(&[(1, 1, 1), (2, 2, 2)])));
        let touching = envelope(&[(2, 0, 0), (4, 1, 1)]);
        assert_eq!(a.intersection_envelope(&touching).map(|e| e.kind()), Some(EnvelopeKind::RectangleYz));
        assert!(a.intersection_envelope(&envelope(&[(5, 5, 5)])).is_none());
    }

    #[test]
    fn containment_is_inclusive() {
        let e = envelope(&[(0, 0, 0), (1, 1, 1)]);
        assert!(e.contains_point(&Point::from_ints(1, 0, 1)));
        assert!(e.contains_point(&Point::new(ratio(1, 2), ratio(1, 2), ratio(1, 2))));
        assert!(!e.contains_point(&Point::new(ratio(3, 2), ratio(1, 2), ratio(1, 2))));
    }

    #[test]
    fn line_clipping() {
        let e = envelope(&[(0, 0, 0), (1, 0, 0)]);
        assert_eq!(
            e.line_intersection(&Line::x_axis()),
            Some(Geometry::LineSegment(LineSegment::new(Point::origin(), Point::from_ints(1, 0, 0)).unwrap()))
        );
        let cube = envelope(&[(0, 0, 0), (2, 2, 2)]);
        let through_edge = Line::from_point_vector(Point::from_ints(0, 0, 1), Vector::from_ints(1, -1, 0)).unwrap();
        assert_eq!(cube.line_intersection(&through_edge), Some(Geometry::Point(Point::from_ints(0, 0, 1))));
        let diagonal = LineSegment::new(Point::from_ints(-1, -1, -1), Point::from_ints(1, 1, 1)).unwrap();
        assert_eq!(
            cube.segment_intersection(&diagonal),
            Some(Geometry::LineSegment(LineSegment::new(Point::origin(), Point::from_ints(1, 1, 1)).unwrap()))
        );
    }

    #[test]
    fn distances() {
        let e = envelope(&[(0, 0, 0), (1, 1, 1)]);
        assert_eq!(e.point_distance_squared(&Point::from_ints(3, 1, -1)), integer(5));
        assert_eq!(e.point_distance_squared(&Point::from_ints(1, 1, 1)), integer(0));
        let f = envelope(&[(2, 3, 0), (4, 4, 4)]);
        assert_eq!(e.envelope_distance_squared(&f), integer(5));
        assert_eq!(f.envelope_distance_squared(&e), integer(5));
    }

    #[test]
    fn translation_and_rotation() {
        let mut e = envelope(&[(0, 0, 0), (1, 1, 1)]);
        assert_eq!(e.corners().len(), 8);
        e.translate(&Vector::from_ints(1, 2, 3));
        assert_eq!(e.x_min(), &integer(1));
        assert_eq!(e.z_max(), &integer(4));
        assert!(e.corners().contains(&Point::from_ints(2, 3, 4)));
        let turned = crate::geometry::Transform::rotate(&e, &Line::z_axis(), &integer(1), -3, crate::math::RoundingMode::HalfUp);
        assert!(turned.is_err());
    }
}
