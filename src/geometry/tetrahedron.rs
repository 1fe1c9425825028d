use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use num_traits::Signed;

use crate::error::{GeometryError, Result};
use crate::math::{integer, ratio, round, Oom, Rational, RoundingMode};

use super::envelope::Envelope;
use super::line_segment::LineSegment;
use super::plane::PointPlaneClassification;
use super::point::{hash_point_set, same_point_set, triple_product, Point};
use super::triangle::Triangle;
use super::vector::Vector;

/// A tetrahedron with four non-coplanar corners `p`, `q`, `r`, `s`.
///
/// Faces are oriented so that every face normal points away from the
/// interior.
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    corners: [Point; 4],
    faces: OnceLock<Box<[Triangle; 4]>>,
    edges: OnceLock<Box<[LineSegment; 6]>>,
    envelope: OnceLock<Box<Envelope>>,
}

impl Tetrahedron {
    /// # Errors
    ///
    /// Returns [`GeometryError::CoplanarPoints`] if the corners are coplanar.
    pub fn new(p: Point, q: Point, r: Point, s: Point) -> Result<Self> {
        if Point::are_coplanar(&p, &q, &r, &s) {
            return Err(GeometryError::CoplanarPoints.into());
        }
        Ok(Self::new_unchecked(p, q, r, s))
    }

    /// The tetrahedron with apex `apex` over `base`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoplanarPoints`] if `apex` lies in the plane
    /// of `base`.
    pub fn from_point_triangle(apex: Point, base: &Triangle) -> Result<Self> {
        let [p, q, r] = base.corners();
        Self::new(apex, p.clone(), q.clone(), r.clone())
    }

    pub(crate) fn new_unchecked(p: Point, q: Point, r: Point, s: Point) -> Self {
        Self {
            corners: [p, q, r, s],
            faces: OnceLock::new(),
            edges: OnceLock::new(),
            envelope: OnceLock::new(),
        }
    }

    /// Returns the corners `p`, `q`, `r`, `s`.
    #[must_use]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// `det(q - p, r - p, s - p)`, six times the signed volume.
    fn signed_volume6(&self) -> Rational {
        let [p, q, r, s] = &self.corners;
        triple_product(&p.vector_to(q), &p.vector_to(r), &p.vector_to(s))
    }

    /// Faces `pqr`, `qsr`, `spr`, `psq`, each wound outward.
    #[must_use]
    pub fn faces(&self) -> &[Triangle; 4] {
        self.faces.get_or_init(|| {
            let [p, q, r, s] = &self.corners;
            let as_given = self.signed_volume6().is_negative();
            let face = |a: &Point, b: &Point, c: &Point| {
                if as_given {
                    Triangle::new_unchecked(a.clone(), b.clone(), c.clone())
                } else {
                    Triangle::new_unchecked(a.clone(), c.clone(), b.clone())
                }
            };
            Box::new([face(p, q, r), face(q, s, r), face(s, p, r), face(p, s, q)])
        })
    }

    /// Edges `pq`, `pr`, `ps`, `qr`, `qs`, `rs`.
    #[must_use]
    pub fn edges(&self) -> &[LineSegment; 6] {
        self.edges.get_or_init(|| {
            let [p, q, r, s] = &self.corners;
            let edge = |a: &Point, b: &Point| LineSegment::new_unchecked(a.clone(), b.clone());
            Box::new([edge(p, q), edge(p, r), edge(p, s), edge(q, r), edge(q, s), edge(r, s)])
        })
    }

    /// Returns the bounding envelope, computed once.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        self.envelope
            .get_or_init(|| Box::new(Envelope::bounding(&self.corners[0], &self.corners[1..])))
    }

    /// Volume, exact.
    #[must_use]
    pub fn volume(&self) -> Rational {
        self.signed_volume6().abs() / integer(6)
    }

    /// Sum of face areas, each taken two places below `oom`.
    #[must_use]
    pub fn surface_area(&self, oom: Oom, mode: RoundingMode) -> Rational {
        let sum: Rational = self.faces().iter().map(|f| f.area(oom - 2, mode)).sum();
        round(&sum, oom, mode)
    }

    /// Returns the mean of the four corners.
    #[must_use]
    pub fn centroid(&self) -> Point {
        let sum = self
            .corners
            .iter()
            .fold(Vector::zero(), |acc, c| &acc + &c.position());
        Point::from_vector(sum.scale(&ratio(1, 4)))
    }

    /// Whether `x` lies in the closed solid.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        self.faces()
            .iter()
            .all(|f| f.plane().side(x) != PointPlaneClassification::Front)
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        for c in &mut self.corners {
            c.translate(v);
        }
        self.faces = OnceLock::new();
        self.edges = OnceLock::new();
        self.envelope = OnceLock::new();
    }
}

impl PartialEq for Tetrahedron {
    fn eq(&self, other: &Self) -> bool {
        same_point_set(&self.corners, &other.corners)
    }
}

impl Eq for Tetrahedron {}

impl Hash for Tetrahedron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_point_set(&self.corners, state);
    }
}
