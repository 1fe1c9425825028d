use num_traits::Zero;

use crate::error::{GeometryError, Result};
use crate::math::Rational;

use super::line_segment::LineSegment;
use super::point::Point;
use super::vector::Vector;
use super::Geometry;

/// An infinite line through `p` with direction `v`.
///
/// The parametric form is `P(t) = p + t·v`. The direction is kept exactly as
/// given, it is never normalised.
#[derive(Debug, Clone)]
pub struct Line {
    points: [Point; 2],
    v: Vector,
}

impl Line {
    /// Creates the line through `p` and `q`.
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

    /// Creates the line through `p` with direction `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `v` is zero.
    pub fn from_point_vector(p: Point, v: Vector) -> Result<Self> {
        if v.is_zero() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self::from_point_vector_unchecked(p, v))
    }

    pub(crate) fn new_unchecked(p: Point, q: Point) -> Self {
        let v = p.vector_to(&q);
        Self { points: [p, q], v }
    }

    pub(crate) fn from_point_vector_unchecked(p: Point, v: Vector) -> Self {
        let q = p.translated(&v);
        Self { points: [p, q], v }
    }

    /// Returns the x axis through the origin.
    #[must_use]
    pub fn x_axis() -> Self {
        Self::from_point_vector_unchecked(Point::origin(), Vector::from_ints(1, 0, 0))
    }

    /// Returns the y axis through the origin.
    #[must_use]
    pub fn y_axis() -> Self {
        Self::from_point_vector_unchecked(Point::origin(), Vector::from_ints(0, 1, 0))
    }

    /// Returns the z axis through the origin.
    #[must_use]
    pub fn z_axis() -> Self {
        Self::from_point_vector_unchecked(Point::origin(), Vector::from_ints(0, 0, 1))
    }

    /// Returns the point at parameter 0.
    #[must_use]
    pub fn p(&self) -> &Point {
        &self.points[0]
    }

    /// Returns the point at parameter 1.
    #[must_use]
    pub fn q(&self) -> &Point {
        &self.points[1]
    }

    /// Returns both defining points.
    #[must_use]
    pub fn points(&self) -> &[Point; 2] {
        &self.points
    }

    /// The direction vector `q - p`.
    #[must_use]
    pub fn v(&self) -> &Vector {
        &self.v
    }

    /// `p + t·v`.
    #[must_use]
    pub fn point_at(&self, t: &Rational) -> Point {
        self.p().translated(&self.v.scale(t))
    }

    /// The parameter of the orthogonal projection of `x` onto the line.
    #[must_use]
    pub fn parameter_of(&self, x: &Point) -> Rational {
        self.p().vector_to(x).dot(&self.v) / self.v.magnitude_squared()
    }

    /// Whether `x` lies on the line.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        self.p().vector_to(x).is_scalar_multiple(&self.v)
    }

    /// Whether the directions are scalar multiples of each other.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.v.is_scalar_multiple(&other.v)
    }

    /// Parameters `(s, t)` of the mutually closest points `self.point_at(s)`
    /// and `other.point_at(t)`, or `None` for parallel lines.
    #[must_use]
    pub fn closest_parameters(&self, other: &Self) -> Option<(Rational, Rational)> {
        let w = other.p().vector_to(self.p());
        let a = self.v.magnitude_squared();
        let b = self.v.dot(&other.v);
        let c = other.v.magnitude_squared();
        let d = self.v.dot(&w);
        let e = other.v.dot(&w);
        let den = &a * &c - &b * &b;
        if den.is_zero() {
            return None;
        }
        let s = (&b * &e - &c * &d) / &den;
        let t = (&a * &e - &b * &d) / &den;
        Some((s, t))
    }

    /// The orthogonal projection of `x` onto the line.
    #[must_use]
    pub fn point_of_projection(&self, x: &Point) -> Point {
        self.point_at(&self.parameter_of(x))
    }

    /// The shortest segment joining `self` and `other`.
    ///
    /// `None` when the lines are parallel or intersect, since the segment is
    /// then not unique or has zero length.
    #[must_use]
    pub fn line_of_least_distance(&self, other: &Self) -> Option<LineSegment> {
        let (s, t) = self.closest_parameters(other)?;
        let a = self.point_at(&s);
        let b = other.point_at(&t);
        LineSegment::new(a, b).ok()
    }

    /// Intersection with another line: the line itself when coincident, a
    /// point when they cross, `None` when parallel or skew.
    #[must_use]
    pub fn line_intersection(&self, other: &Self) -> Option<Geometry> {
        if self.is_parallel(other) {
            return self
                .contains_point(other.p())
                .then(|| Geometry::Line(self.clone()));
        }
        let w = self.p().vector_to(other.p());
        let n = self.v.cross(&other.v);
        if !w.dot(&n).is_zero() {
            return None;
        }
        // Coplanar and not parallel: s solves (w - s·v1) × v2 = 0.
        let s = w.cross(&other.v).dot(&n) / n.magnitude_squared();
        Some(Geometry::Point(self.point_at(&s)))
    }

    /// Squared distance from `x` to the line: `|w × v|² / |v|²`.
    #[must_use]
    pub fn point_distance_squared(&self, x: &Point) -> Rational {
        let w = self.p().vector_to(x);
        w.cross(&self.v).magnitude_squared() / self.v.magnitude_squared()
    }

    /// Squared distance between two lines, exact.
    #[must_use]
    pub fn line_distance_squared(&self, other: &Self) -> Rational {
        if self.is_parallel(other) {
            return self.point_distance_squared(other.p());
        }
        let n = self.v.cross(&other.v);
        let w = self.p().vector_to(other.p());
        let num = w.dot(&n);
        &num * &num / n.magnitude_squared()
    }

    /// Moves both defining points by `v`.
    pub fn translate(&mut self, v: &Vector) {
        for p in &mut self.points {
            p.translate(v);
        }
    }
}

/// Lines are equal when each contains the other.
impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && self.contains_point(other.p())
    }
}
