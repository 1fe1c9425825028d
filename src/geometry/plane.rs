use num_traits::{Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::math::Rational;

use super::line::Line;
use super::line_segment::LineSegment;
use super::point::Point;
use super::vector::Vector;
use super::Geometry;

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPlaneClassification {
    /// Point is on the side the normal points to.
    Front,
    /// Point is on the opposite side.
    Back,
    /// Point lies on the plane.
    On,
}

/// An infinite plane through three non-collinear points.
///
/// The normal is `(q - p) × (r - q)` and is not normalised.
#[derive(Debug, Clone)]
pub struct Plane {
    points: [Point; 3],
    normal: Vector,
}

impl Plane {
    /// Creates the plane through `p`, `q` and `r`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CollinearPoints`] if the points are collinear.
    pub fn new(p: Point, q: Point, r: Point) -> Result<Self> {
        if Point::are_collinear(&p, &q, &r) {
            return Err(GeometryError::CollinearPoints.into());
        }
        Ok(Self::new_unchecked(p, q, r))
    }

    pub(crate) fn new_unchecked(p: Point, q: Point, r: Point) -> Self {
        let normal = p.vector_to(&q).cross(&q.vector_to(&r));
        Self {
            points: [p, q, r],
            normal,
        }
    }

    /// Creates the plane through `p` with normal `n`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `n` is zero.
    pub fn from_point_normal(p: Point, n: &Vector) -> Result<Self> {
        if n.is_zero() {
            return Err(GeometryError::ZeroVector.into());
        }
        // Pick a reference axis not parallel to the normal.
        let reference = if n.is_scalar_multiple(&Vector::from_ints(1, 0, 0)) {
            Vector::from_ints(0, 1, 0)
        } else {
            Vector::from_ints(1, 0, 0)
        };
        let u = n.cross(&reference);
        let w = n.cross(&u);
        let q = p.translated(&u);
        let r = q.translated(&w);
        Ok(Self::new_unchecked(p, q, r))
    }

    /// Returns the first defining point.
    #[must_use]
    pub fn p(&self) -> &Point {
        &self.points[0]
    }

    /// Returns the three defining points.
    #[must_use]
    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    /// Returns the normal `(q - p) × (r - q)`.
    #[must_use]
    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    /// Signed offset of `x` along the normal, scaled by `|n|`.
    fn signed_offset(&self, x: &Point) -> Rational {
        self.normal.dot(&self.p().vector_to(x))
    }

    /// Classifies `x` against the normal.
    #[must_use]
    pub fn side(&self, x: &Point) -> PointPlaneClassification {
        let d = self.signed_offset(x);
        if d.is_zero() {
            PointPlaneClassification::On
        } else if d.is_positive() {
            PointPlaneClassification::Front
        } else {
            PointPlaneClassification::Back
        }
    }

    /// Whether `x` lies in the plane.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        self.signed_offset(x).is_zero()
    }

    /// Whether every point of `line` lies in the plane.
    #[must_use]
    pub fn contains_line(&self, line: &Line) -> bool {
        self.contains_point(line.p()) && self.is_parallel_line(line)
    }

    /// Whether `line` is parallel to the plane (or lies in it).
    #[must_use]
    pub fn is_parallel_line(&self, line: &Line) -> bool {
        self.normal.is_orthogonal(line.v())
    }

    /// Whether the normals are scalar multiples of each other.
    #[must_use]
    pub fn is_parallel_plane(&self, other: &Self) -> bool {
        self.normal.is_scalar_multiple(&other.normal)
    }

    /// Whether both planes are the same plane.
    #[must_use]
    pub fn is_coplanar(&self, other: &Self) -> bool {
        self.is_parallel_plane(other) && self.contains_point(other.p())
    }

    /// The orthogonal projection of `x` onto the plane.
    #[must_use]
    pub fn point_of_projection(&self, x: &Point) -> Point {
        let t = self.signed_offset(x) / self.normal.magnitude_squared();
        x.translated(&self.normal.scale(&-t))
    }

    /// Parameter `t` at which `line.point_at(t)` meets the plane, or `None`
    /// when the line is parallel to it.
    pub(crate) fn line_parameter(&self, line: &Line) -> Option<Rational> {
        let den = self.normal.dot(line.v());
        if den.is_zero() {
            return None;
        }
        Some(self.normal.dot(&line.p().vector_to(self.p())) / den)
    }

    /// Intersection with a line: a point, the line itself, or `None`.
    #[must_use]
    pub fn line_intersection(&self, line: &Line) -> Option<Geometry> {
        match self.line_parameter(line) {
            Some(t) => Some(Geometry::Point(line.point_at(&t))),
            None => self
                .contains_point(line.p())
                .then(|| Geometry::Line(line.clone())),
        }
    }

    /// Intersection with a segment: a point, the segment itself, or `None`.
    #[must_use]
    pub fn segment_intersection(&self, segment: &LineSegment) -> Option<Geometry> {
        let sp = self.side(segment.p());
        let sq = self.side(segment.q());
        match (sp, sq) {
            (PointPlaneClassification::On, PointPlaneClassification::On) => {
                Some(Geometry::LineSegment(segment.clone()))
            }
            (PointPlaneClassification::On, _) => Some(Geometry::Point(segment.p().clone())),
            (_, PointPlaneClassification::On) => Some(Geometry::Point(segment.q().clone())),
            (a, b) if a == b => None,
            _ => {
                let t = self.line_parameter(segment.line())?;
                Some(Geometry::Point(segment.line().point_at(&t)))
            }
        }
    }

    /// Intersection with another plane: the line of intersection, the plane
    /// itself when coplanar, or `None` when parallel.
    #[must_use]
    pub fn plane_intersection(&self, other: &Self) -> Option<Geometry> {
        let n1 = &self.normal;
        let n2 = &other.normal;
        let direction = n1.cross(n2);
        if direction.is_zero() {
            return self
                .contains_point(other.p())
                .then(|| Geometry::Plane(self.clone()));
        }
        // x0 lies in both planes and in the span of n1, n2.
        let h1 = n1.dot(&self.p().position());
        let h2 = n2.dot(&other.p().position());
        let n11 = n1.magnitude_squared();
        let n22 = n2.magnitude_squared();
        let n12 = n1.dot(n2);
        let den = &n11 * &n22 - &n12 * &n12;
        let c1 = (&h1 * &n22 - &h2 * &n12) / &den;
        let c2 = (&h2 * &n11 - &h1 * &n12) / &den;
        let x0 = Point::from_vector(&n1.scale(&c1) + &n2.scale(&c2));
        Some(Geometry::Line(Line::from_point_vector_unchecked(x0, direction)))
    }

    /// Squared distance from `x` to the plane: `(n·w)² / (n·n)`.
    #[must_use]
    pub fn point_distance_squared(&self, x: &Point) -> Rational {
        let d = self.signed_offset(x);
        &d * &d / self.normal.magnitude_squared()
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        for p in &mut self.points {
            p.translate(v);
        }
    }
}

/// Planes are equal when they are the same set of points.
impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.is_coplanar(other)
    }
}
