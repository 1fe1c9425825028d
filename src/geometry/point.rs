use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use num_traits::Zero;

use crate::error::Result;
use crate::math::{integer, round, Oom, Rational, RationalSqrt, RoundingMode, Vector3};

use super::line::Line;
use super::vector::Vector;

/// A location in 3-space, stored as an `offset` plus a relative part.
///
/// Translation only moves the offset; the absolute position is always
/// `offset + rel`, and equality and hashing use the absolute position.
#[derive(Debug, Clone)]
pub struct Point {
    offset: Vector,
    rel: Vector,
}

impl Point {
    /// Creates a point at absolute coordinates with a zero offset.
    #[must_use]
    pub fn new(x: Rational, y: Rational, z: Rational) -> Self {
        Self::from_vector(Vector::new(x, y, z))
    }

    /// Creates a point at integer coordinates.
    #[must_use]
    pub fn from_ints(x: i64, y: i64, z: i64) -> Self {
        Self::new(integer(x), integer(y), integer(z))
    }

    /// Returns the origin.
    #[must_use]
    pub fn origin() -> Self {
        Self::from_ints(0, 0, 0)
    }

    /// Creates the point `offset + rel`.
    #[must_use]
    pub fn with_offset(offset: Vector, rel: Vector) -> Self {
        Self { offset, rel }
    }

    /// The point whose position vector is `v`.
    #[must_use]
    pub fn from_vector(v: Vector) -> Self {
        Self::with_offset(Vector::zero(), v)
    }

    /// Returns the offset part of the position.
    #[must_use]
    pub fn offset(&self) -> &Vector {
        &self.offset
    }

    /// Returns the part relative to the offset.
    #[must_use]
    pub fn rel(&self) -> &Vector {
        &self.rel
    }

    /// The absolute position vector.
    #[must_use]
    pub fn position(&self) -> Vector {
        &self.offset + &self.rel
    }

    /// Absolute coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Vector3 {
        self.offset.coords() + self.rel.coords()
    }

    /// Returns the absolute x coordinate.
    #[must_use]
    pub fn x(&self) -> Rational {
        self.offset.dx() + self.rel.dx()
    }

    /// Returns the absolute y coordinate.
    #[must_use]
    pub fn y(&self) -> Rational {
        self.offset.dy() + self.rel.dy()
    }

    /// Returns the absolute z coordinate.
    #[must_use]
    pub fn z(&self) -> Rational {
        self.offset.dz() + self.rel.dz()
    }

    /// Absolute coordinates rounded to multiples of `10^oom`.
    #[must_use]
    pub fn rounded(&self, oom: Oom, mode: RoundingMode) -> Self {
        Self::from_coords(self.coordinates().map(|c| round(&c, oom, mode)))
    }

    pub(crate) fn from_coords(coords: Vector3) -> Self {
        Self::from_vector(Vector::from_coords(coords))
    }

    /// The vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Self) -> Vector {
        Vector::from_coords(other.coordinates() - self.coordinates())
    }

    /// `self + v`, keeping the offset.
    #[must_use]
    pub fn translated(&self, v: &Vector) -> Self {
        Self::with_offset(self.offset.clone(), &self.rel + v)
    }

    /// Squared distance to `other`, exact.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> Rational {
        self.vector_to(other).magnitude_squared()
    }

    /// Distance to `other` as a square root.
    #[must_use]
    pub fn distance_exact(&self, other: &Self) -> RationalSqrt {
        RationalSqrt::from_non_negative(self.distance_squared(other))
    }

    /// Distance to `other` rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn distance(&self, other: &Self, oom: Oom, mode: RoundingMode) -> Rational {
        self.distance_exact(other).sqrt(oom, mode)
    }

    /// Moves the offset to `offset` without moving the point.
    pub fn set_offset(&mut self, offset: Vector) {
        let position = self.position();
        self.rel = &position - &offset;
        self.offset = offset;
    }

    /// Moves the point by `v` (the offset absorbs the move).
    pub fn translate(&mut self, v: &Vector) {
        self.offset = &self.offset + v;
    }

    /// Rotates the point about `axis`, keeping its offset.
    ///
    /// # Errors
    ///
    /// Fails only when the rotation itself cannot be built.
    pub fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let rotation = crate::operations::transform::Rotation::new(axis.v(), theta, oom, mode)?;
        let moved = rotation.apply_point(axis.p(), self);
        Ok(Self::with_offset(self.offset.clone(), &moved.position() - &self.offset))
    }

    /// Whether the three points lie on one line (coincident points count).
    #[must_use]
    pub fn are_collinear(a: &Self, b: &Self, c: &Self) -> bool {
        a.vector_to(b).is_scalar_multiple(&a.vector_to(c))
    }

    /// Whether the four points lie in one plane.
    #[must_use]
    pub fn are_coplanar(a: &Self, b: &Self, c: &Self, d: &Self) -> bool {
        triple_product(&a.vector_to(b), &a.vector_to(c), &a.vector_to(d)).is_zero()
    }

    /// Lexicographic order on `(x, y, z)`.
    #[must_use]
    pub fn lexicographic_cmp(&self, other: &Self) -> Ordering {
        self.position().lexicographic_cmp(&other.position())
    }
}

/// `a · (b × c)`.
pub(crate) fn triple_product(a: &Vector, b: &Vector, c: &Vector) -> Rational {
    a.dot(&b.cross(c))
}

/// Whether two point slices hold the same points, in any order.
pub(crate) fn same_point_set(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && a.iter().all(|p| b.contains(p)) && b.iter().all(|p| a.contains(p))
}

/// Order-independent hash of a point slice.
pub(crate) fn hash_point_set<H: Hasher>(points: &[Point], state: &mut H) {
    let mut sorted: Vec<&Point> = points.iter().collect();
    sorted.sort_by(|a, b| a.lexicographic_cmp(b));
    sorted.dedup();
    for p in sorted {
        p.hash(state);
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates() == other.coordinates()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in &self.coordinates() {
            c.hash(state);
        }
    }
}

impl From<Vector> for Point {
    fn from(v: Vector) -> Self {
        Self::from_vector(v)
    }
}
