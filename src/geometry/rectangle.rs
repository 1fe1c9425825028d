use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{GeometryError, Result};
use crate::math::{integer, round, Oom, Rational, RationalSqrt, RoundingMode};

use super::envelope::Envelope;
use super::line_segment::LineSegment;
use super::plane::Plane;
use super::point::{hash_point_set, same_point_set, Point};
use super::triangle::Triangle;
use super::vector::Vector;

/// A rectangle `pqrs`: `pq ⟂ qr` and `s = p + (r - q)`.
///
/// The corners run counter-clockwise about the plane normal `pq × qr`.
#[derive(Debug, Clone)]
pub struct Rectangle {
    plane: Plane,
    corners: [Point; 4],
    edges: OnceLock<Box<[LineSegment; 4]>>,
    triangles: OnceLock<Box<[Triangle; 2]>>,
    envelope: OnceLock<Box<Envelope>>,
}

impl Rectangle {
    /// Creates the rectangle with corners `p`, `q`, `r`, `s` in order.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotRectangular`] if two corners coincide,
    /// `pq` is not orthogonal to `qr`, or `s` is not opposite `q`.
    pub fn new(p: Point, q: Point, r: Point, s: Point) -> Result<Self> {
        let pq = p.vector_to(&q);
        let qr = q.vector_to(&r);
        if pq.is_zero() || qr.is_zero() {
            return Err(GeometryError::NotRectangular("adjacent corners coincide").into());
        }
        if !pq.is_orthogonal(&qr) {
            return Err(GeometryError::NotRectangular("adjacent edges are not orthogonal").into());
        }
        if s != p.translated(&qr) {
            return Err(GeometryError::NotRectangular("opposite edges are not parallel").into());
        }
        Ok(Self::new_unchecked(p, q, r, s))
    }

    /// Creates the rectangle `p, q, r, p + (r - q)`.
    ///
    /// # Errors
    ///
    /// As for [`Rectangle::new`].
    pub fn from_corners(p: Point, q: Point, r: Point) -> Result<Self> {
        let s = p.translated(&q.vector_to(&r));
        Self::new(p, q, r, s)
    }

    pub(crate) fn new_unchecked(p: Point, q: Point, r: Point, s: Point) -> Self {
        Self {
            plane: Plane::new_unchecked(p.clone(), q.clone(), r.clone()),
            corners: [p, q, r, s],
            edges: OnceLock::new(),
            triangles: OnceLock::new(),
            envelope: OnceLock::new(),
        }
    }

    /// Returns the supporting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the corners `p`, `q`, `r`, `s`.
    #[must_use]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Edges `pq`, `qr`, `rs`, `sp`.
    #[must_use]
    pub fn edges(&self) -> &[LineSegment; 4] {
        self.edges.get_or_init(|| {
            let [p, q, r, s] = &self.corners;
            Box::new([
                LineSegment::new_unchecked(p.clone(), q.clone()),
                LineSegment::new_unchecked(q.clone(), r.clone()),
                LineSegment::new_unchecked(r.clone(), s.clone()),
                LineSegment::new_unchecked(s.clone(), p.clone()),
            ])
        })
    }

    /// The halves `pqr` and `rsp`.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle; 2] {
        self.triangles.get_or_init(|| {
            let [p, q, r, s] = &self.corners;
            Box::new([
                Triangle::new_unchecked(p.clone(), q.clone(), r.clone()),
                Triangle::new_unchecked(r.clone(), s.clone(), p.clone()),
            ])
        })
    }

    /// Returns the bounding envelope, computed once.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        self.envelope
            .get_or_init(|| Box::new(Envelope::bounding(&self.corners[0], &self.corners[1..])))
    }

    /// `area²`, exact: `|pq|²·|qr|²`.
    #[must_use]
    pub fn area_squared(&self) -> Rational {
        let [p, q, r, _] = &self.corners;
        p.distance_squared(q) * q.distance_squared(r)
    }

    /// Returns the area as a square root.
    #[must_use]
    pub fn area_exact(&self) -> RationalSqrt {
        let [p, q, r, _] = &self.corners;
        p.distance_exact(q).multiply(&q.distance_exact(r))
    }

    /// Returns the area rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn area(&self, oom: Oom, mode: RoundingMode) -> Rational {
        self.area_exact().sqrt(oom, mode)
    }

    /// Returns the perimeter rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn perimeter(&self, oom: Oom, mode: RoundingMode) -> Rational {
        let [p, q, r, _] = &self.corners;
        let sides = p.distance_exact(q).add(&q.distance_exact(r));
        let half = match sides {
            Some(exact) => exact.sqrt(oom - 2, mode),
            None => p.distance(q, oom - 2, mode) + q.distance(r, oom - 2, mode),
        };
        round(&(half * integer(2)), oom, mode)
    }

    /// Whether `x` lies in the closed rectangle.
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
        self.triangles = OnceLock::new();
        self.envelope = OnceLock::new();
    }
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        same_point_set(&self.corners, &other.corners)
    }
}

impl Eq for Rectangle {}

impl Hash for Rectangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_point_set(&self.corners, state);
    }
}
