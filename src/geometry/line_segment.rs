use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use num_traits::{One, Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::math::{integer, Oom, Rational, RationalSqrt, RoundingMode};

use super::envelope::Envelope;
use super::line::Line;
use super::point::{hash_point_set, same_point_set, Point};
use super::vector::Vector;
use super::Geometry;

/// The closed segment between two distinct points.
#[derive(Debug, Clone)]
pub struct LineSegment {
    line: Line,
    envelope: OnceLock<Box<Envelope>>,
}

impl LineSegment {
    /// Creates the segment `[p, q]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoincidentPoints`] if `p == q`.
    pub fn new(p: Point, q: Point) -> Result<Self> {
        if p == q {
            return Err(GeometryError::CoincidentPoints.into());
        }
        Ok(Self::new_unchecked(p, q))
    }

    /// The segment `[p, q]`, or the point itself when `p == q`.
    #[must_use]
    pub fn between(p: Point, q: Point) -> Geometry {
        if p == q {
            Geometry::Point(p)
        } else {
            Geometry::LineSegment(Self::new_unchecked(p, q))
        }
    }

    pub(crate) fn new_unchecked(p: Point, q: Point) -> Self {
        Self {
            line: Line::new_unchecked(p, q),
            envelope: OnceLock::new(),
        }
    }

    /// Returns the start point.
    #[must_use]
    pub fn p(&self) -> &Point {
        self.line.p()
    }

    /// Returns the end point.
    #[must_use]
    pub fn q(&self) -> &Point {
        self.line.q()
    }

    /// Returns both endpoints.
    #[must_use]
    pub fn points(&self) -> &[Point; 2] {
        self.line.points()
    }

    /// The supporting line.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Returns the bounding envelope, computed once.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        self.envelope
            .get_or_init(|| Box::new(Envelope::bounding(self.p(), std::slice::from_ref(self.q()))))
    }

    /// Returns the squared length, exact.
    #[must_use]
    pub fn length_squared(&self) -> Rational {
        self.line.v().magnitude_squared()
    }

    /// Returns the length as a square root.
    #[must_use]
    pub fn length_exact(&self) -> RationalSqrt {
        self.line.v().magnitude().clone()
    }

    /// Returns the length rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn length(&self, oom: Oom, mode: RoundingMode) -> Rational {
        self.line.v().magnitude().sqrt(oom, mode)
    }

    /// Returns the point halfway between the endpoints.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.line.point_at(&(Rational::one() / integer(2)))
    }

    /// `[q, p]`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new_unchecked(self.q().clone(), self.p().clone())
    }

    /// Whether `t` lies in `[0, 1]`.
    fn in_range(t: &Rational) -> bool {
        !t.is_negative() && t <= &Rational::one()
    }

    /// Whether `x` lies on the segment, endpoints included.
    ///
    /// Equivalent to `|px| + |xq| = |pq|`, evaluated without square roots.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        let w = self.p().vector_to(x);
        let v = self.line.v();
        if !w.is_scalar_multiple(v) {
            return false;
        }
        let along = w.dot(v);
        !along.is_negative() && along <= v.magnitude_squared()
    }

    /// Intersection with a line: a point, the whole segment, or `None`.
    #[must_use]
    pub fn line_intersection(&self, line: &Line) -> Option<Geometry> {
        match self.line.line_intersection(line)? {
            Geometry::Point(x) => self.contains_point(&x).then_some(Geometry::Point(x)),
            _ => Some(Geometry::LineSegment(self.clone())),
        }
    }

    /// Intersection with another segment.
    ///
    /// Collinear segments overlap in a segment or touch in a point.
    #[must_use]
    pub fn segment_intersection(&self, other: &Self) -> Option<Geometry> {
        match self.line.line_intersection(&other.line)? {
            Geometry::Point(x) => {
                (self.contains_point(&x) && other.contains_point(&x)).then_some(Geometry::Point(x))
            }
            _ => {
                let a = self.line.parameter_of(other.p());
                let b = self.line.parameter_of(other.q());
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let lo = lo.max(Rational::zero());
                let hi = hi.min(Rational::one());
                if lo > hi {
                    return None;
                }
                Some(Self::between(self.line.point_at(&lo), self.line.point_at(&hi)))
            }
        }
    }

    /// The point of the segment closest to `x`.
    #[must_use]
    pub fn closest_point(&self, x: &Point) -> Point {
        let t = self.line.parameter_of(x).clamp(Rational::zero(), Rational::one());
        self.line.point_at(&t)
    }

    /// Squared distance from `x` to the nearest point of the segment.
    #[must_use]
    pub fn point_distance_squared(&self, x: &Point) -> Rational {
        self.closest_point(x).distance_squared(x)
    }

    /// Squared distance to an infinite line.
    #[must_use]
    pub fn line_distance_squared(&self, line: &Line) -> Rational {
        if let Some((s, _)) = self.line.closest_parameters(line) {
            if Self::in_range(&s) {
                return self.line.line_distance_squared(line);
            }
        }
        let dp = line.point_distance_squared(self.p());
        let dq = line.point_distance_squared(self.q());
        dp.min(dq)
    }

    /// Squared distance to another segment.
    #[must_use]
    pub fn segment_distance_squared(&self, other: &Self) -> Rational {
        if let Some((s, t)) = self.line.closest_parameters(&other.line) {
            if Self::in_range(&s) && Self::in_range(&t) {
                return self.line.point_at(&s).distance_squared(&other.line.point_at(&t));
            }
        }
        [
            self.point_distance_squared(other.p()),
            self.point_distance_squared(other.q()),
            other.point_distance_squared(self.p()),
            other.point_distance_squared(self.q()),
        ]
        .into_iter()
        .min()
        .unwrap_or_else(Rational::zero)
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        self.line.translate(v);
        self.envelope = OnceLock::new();
    }
}

/// Segments are equal when they join the same two points, in either order.
impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        same_point_set(self.points(), other.points())
    }
}

impl Eq for LineSegment {}

impl Hash for LineSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_point_set(self.points(), state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::ratio;

    fn seg(p: (i64, i64, i64), q: (i64, i64, i64)) -> LineSegment {
        LineSegment::new(Point::from_ints(p.0, p.1, p.2), Point::from_ints(q.0, q.1, q.2)).unwrap()
    }

    #[test]
    fn endpoint_order_does_not_matter() {
        assert_eq!(seg((0, 0, 0), (1, 2, 3)), seg((1, 2, 3), (0, 0, 0)));
        assert_eq!(seg((0, 0, 0), (1, 2, 3)).reverse().p(), &Point::from_ints(1, 2, 3));
    }

    #[test]
    fn containment_includes_endpoints() {
        let s = seg((0, 0, 0), (2, 2, 0));
        assert!(s.contains_point(&Point::from_ints(0, 0, 0)));
        assert!(s.contains_point(&Point::from_ints(1, 1, 0)));
        assert!(s.contains_point(&Point::from_ints(2, 2, 0)));
        assert!(!s.contains_point(&Point::from_ints(3, 3, 0)));
        assert!(!s.contains_point(&Point::from_ints(1, 0, 0)));
    }

    #[test]
    fn point_distance_clamps_to_endpoints() {
        let s = seg((0, 0, 0), (1, 0, 0));
        assert_eq!(s.point_distance_squared(&Point::from_ints(2, 0, 0)), integer(1));
        assert_eq!(s.point_distance_squared(&Point::new(ratio(1, 2), integer(3), integer(0))), integer(9));
    }

    #[test]
    fn crossing_and_collinear_segments() {
        let a = seg((0, 0, 0), (2, 0, 0));
        let b = seg((1, -1, 0), (1, 1, 0));
        assert_eq!(a.segment_intersection(&b), Some(Geometry::Point(Point::from_ints(1, 0, 0))));

        let c = seg((1, 0, 0), (5, 0, 0));
        assert_eq!(
            a.segment_intersection(&c),
            Some(Geometry::LineSegment(seg((1, 0, 0), (2, 0, 0))))
        );
        let d = seg((2, 0, 0), (3, 0, 0));
        assert_eq!(a.segment_intersection(&d), Some(Geometry::Point(Point::from_ints(2, 0, 0))));
        let e = seg((3, 0, 0), (4, 0, 0));
        assert!(a.segment_intersection(&e).is_none());
    }

    #[test]
    fn segment_distances() {
        let a = seg((0, 0, 0), (1, 0, 0));
        let b = seg((3, 0, 0), (3, 4, 0));
        assert_eq!(a.segment_distance_squared(&b), integer(4));
        let c = seg((0, 1, 1), (1, 1, 1));
        assert_eq!(a.segment_distance_squared(&c), integer(2));
        let skew = seg((0, -1, 3), (0, 1, 3));
        assert_eq!(a.segment_distance_squared(&skew), integer(9));
    }

    #[test]
    fn length_and_midpoint() {
        let s = seg((0, 0, 0), (3, 4, 0));
        assert_eq!(s.length(-3, RoundingMode::HalfUp), integer(5));
        assert_eq!(s.midpoint(), Point::new(ratio(3, 2), integer(2), integer(0)));
        assert_eq!(s.length_squared(), integer(25));
    }
}
