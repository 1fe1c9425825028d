use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::Result;
use crate::math::{integer, ratio, round, Oom, Rational, RationalSqrt, RoundingMode};

use super::envelope::Envelope;
use super::line_segment::LineSegment;
use super::plane::Plane;
use super::point::{hash_point_set, same_point_set, Point};
use super::vector::Vector;

/// A triangle `pqr`, counter-clockwise about its plane's normal.
#[derive(Debug, Clone)]
pub struct Triangle {
    plane: Plane,
    edges: OnceLock<Box<[LineSegment; 3]>>,
    envelope: OnceLock<Box<Envelope>>,
}

impl Triangle {
    /// Creates the triangle with corners `p`, `q`, `r`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CollinearPoints`](crate::error::GeometryError::CollinearPoints)
    /// if the corners are collinear.
    pub fn new(p: Point, q: Point, r: Point) -> Result<Self> {
        Ok(Self::from_plane(Plane::new(p, q, r)?))
    }

    pub(crate) fn new_unchecked(p: Point, q: Point, r: Point) -> Self {
        Self::from_plane(Plane::new_unchecked(p, q, r))
    }

    fn from_plane(plane: Plane) -> Self {
        Self {
            plane,
            edges: OnceLock::new(),
            envelope: OnceLock::new(),
        }
    }

    /// Returns the first corner.
    #[must_use]
    pub fn p(&self) -> &Point {
        &self.plane.points()[0]
    }

    /// Returns the second corner.
    #[must_use]
    pub fn q(&self) -> &Point {
        &self.plane.points()[1]
    }

    /// Returns the third corner.
    #[must_use]
    pub fn r(&self) -> &Point {
        &self.plane.points()[2]
    }

    /// Returns the supporting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the corners `p`, `q`, `r`.
    #[must_use]
    pub fn corners(&self) -> &[Point; 3] {
        self.plane.points()
    }

    /// Edges `pq`, `qr`, `rp`.
    #[must_use]
    pub fn edges(&self) -> &[LineSegment; 3] {
        self.edges.get_or_init(|| {
            let [p, q, r] = self.corners();
            Box::new([
                LineSegment::new_unchecked(p.clone(), q.clone()),
                LineSegment::new_unchecked(q.clone(), r.clone()),
                LineSegment::new_unchecked(r.clone(), p.clone()),
            ])
        })
    }

    /// Returns the bounding envelope, computed once.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        self.envelope
            .get_or_init(|| Box::new(Envelope::bounding(self.p(), &self.corners()[1..])))
    }

    /// `area²`, exact: `|n|² / 4`.
    #[must_use]
    pub fn area_squared(&self) -> Rational {
        self.plane.normal().magnitude_squared() / integer(4)
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

    /// Sum of edge lengths. Each length is taken two places below `oom` before
    /// the sum is rounded.
    #[must_use]
    pub fn perimeter(&self, oom: Oom, mode: RoundingMode) -> Rational {
        let sum: Rational = self.edges().iter().map(|e| e.length(oom - 2, mode)).sum();
        round(&sum, oom, mode)
    }

    /// Returns the mean of the three corners.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let [p, q, r] = self.corners();
        let sum = &(&p.position() + &q.position()) + &r.position();
        Point::from_vector(sum.scale(&ratio(1, 3)))
    }

    /// Whether `x` lies in the closed triangle.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        crate::operations::planar::contains(self, x)
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        self.plane.translate(v);
        self.edges = OnceLock::new();
        self.envelope = OnceLock::new();
    }
}

/// Triangles are equal when they have the same three corners.
impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        same_point_set(self.corners(), other.corners())
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_point_set(self.corners(), state);
    }
}
