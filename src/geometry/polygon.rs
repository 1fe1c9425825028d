use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use num_traits::Zero;

use crate::error::{GeometryError, Result};
use crate::math::hull::planar_hull;
use crate::math::{integer, round, Oom, Rational, RationalSqrt, RoundingMode};

use super::envelope::Envelope;
use super::line_segment::LineSegment;
use super::plane::Plane;
use super::point::{hash_point_set, same_point_set, Point};
use super::triangle::Triangle;
use super::vector::Vector;

/// A convex planar polygon with at least three strict corners.
///
/// Corners run counter-clockwise about the plane normal and no three
/// consecutive corners are collinear.
#[derive(Debug, Clone)]
pub struct ConvexPolygon {
    plane: Plane,
    corners: Vec<Point>,
    edges: OnceLock<Vec<LineSegment>>,
    envelope: OnceLock<Box<Envelope>>,
}

impl ConvexPolygon {
    /// The convex hull of coplanar points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the points are all collinear
    /// or do not share a plane.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let normal = spanning_normal(points)
            .ok_or_else(|| GeometryError::Degenerate("polygon points are collinear".into()))?;
        let origin = &points[0];
        if points
            .iter()
            .any(|x| !normal.dot(&origin.vector_to(x)).is_zero())
        {
            return Err(GeometryError::Degenerate("polygon points are not coplanar".into()).into());
        }
        Ok(Self::from_hull(planar_hull(points, &normal)))
    }

    /// Wraps hull corners that are already counter-clockwise and strictly convex.
    pub(crate) fn from_hull(corners: Vec<Point>) -> Self {
        let plane = Plane::new_unchecked(corners[0].clone(), corners[1].clone(), corners[2].clone());
        Self {
            plane,
            corners,
            edges: OnceLock::new(),
            envelope: OnceLock::new(),
        }
    }

    /// Returns the supporting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the corners, counter-clockwise about the normal.
    #[must_use]
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// Boundary segments from each corner to the next.
    #[must_use]
    pub fn edges(&self) -> &[LineSegment] {
        self.edges.get_or_init(|| {
            let n = self.corners.len();
            (0..n)
                .map(|i| LineSegment::new_unchecked(self.corners[i].clone(), self.corners[(i + 1) % n].clone()))
                .collect()
        })
    }

    /// Returns the bounding envelope, computed once.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        self.envelope
            .get_or_init(|| Box::new(Envelope::bounding(&self.corners[0], &self.corners[1..])))
    }

    /// Fan triangulation from the first corner.
    #[must_use]
    pub fn triangles(&self) -> Vec<Triangle> {
        let c0 = &self.corners[0];
        self.corners[1..]
            .windows(2)
            .map(|w| Triangle::new_unchecked(c0.clone(), w[0].clone(), w[1].clone()))
            .collect()
    }

    /// `area²`, exact.
    #[must_use]
    pub fn area_squared(&self) -> Rational {
        let c0 = &self.corners[0];
        let twice = self.corners[1..].windows(2).fold(Vector::zero(), |acc, w| {
            &acc + &c0.vector_to(&w[0]).cross(&c0.vector_to(&w[1]))
        });
        twice.magnitude_squared() / integer(4)
    }

    /// Returns the area as a square root.
    #[must_use]
    pub fn area_exact(&self) -> RationalSqrt {
        RationalSqrt::from_non_negative(self.area_squared())
    }

    /// Returns the area rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn area(&self, oom: Oom, mode: RoundingMode) -> Rational {
        self.area_exact().sqrt(oom, mode)
    }

    /// Returns the perimeter rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn perimeter(&self, oom: Oom, mode: RoundingMode) -> Rational {
        let sum: Rational = self.edges().iter().map(|e| e.length(oom - 2, mode)).sum();
        round(&sum, oom, mode)
    }

    /// Whether `x` lies in the closed polygon.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        crate::operations::planar::contains(self, x)
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        self.plane.translate(v);
        for c in &mut self.corners {
            c.translate(v);
        }
        self.edges = OnceLock::new();
        self.envelope = OnceLock::new();
    }
}

/// A normal of the plane spanned by the first non-collinear triple.
pub(crate) fn spanning_normal(points: &[Point]) -> Option<Vector> {
    let (first, rest) = points.split_first()?;
    let second = rest.iter().find(|p| *p != first)?;
    let u = first.vector_to(second);
    rest.iter()
        .map(|x| u.cross(&first.vector_to(x)))
        .find(|n| !n.is_zero())
}

impl PartialEq for ConvexPolygon {
    fn eq(&self, other: &Self) -> bool {
        same_point_set(&self.corners, &other.corners)
    }
}

impl Eq for ConvexPolygon {}

impl Hash for ConvexPolygon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_point_set(&self.corners, state);
    }
}
