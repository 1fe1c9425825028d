use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};
use std::sync::OnceLock;

use num_traits::{Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::math::{integer, Oom, Rational, RationalSqrt, RoundingMode, Vector3};
use crate::operations::transform::Rotation;

/// A free vector in 3-space with exact rational components.
///
/// The magnitude is derived lazily and cached as a [`RationalSqrt`], so
/// `magnitude().square()` is always exactly `dx² + dy² + dz²`.
#[derive(Debug, Clone)]
pub struct Vector {
    coords: Vector3,
    magnitude: OnceLock<Box<RationalSqrt>>,
}

impl Vector {
    /// Creates a vector from its components.
    #[must_use]
    pub fn new(dx: Rational, dy: Rational, dz: Rational) -> Self {
        Self::from_coords(Vector3::new(dx, dy, dz))
    }

    /// Creates a vector from integer components.
    #[must_use]
    pub fn from_ints(dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(integer(dx), integer(dy), integer(dz))
    }

    /// Wraps an exact column.
    #[must_use]
    pub fn from_coords(coords: Vector3) -> Self {
        Self {
            coords,
            magnitude: OnceLock::new(),
        }
    }

    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_ints(0, 0, 0)
    }

    /// Returns the components as a column.
    #[must_use]
    pub fn coords(&self) -> &Vector3 {
        &self.coords
    }

    /// Returns the x component.
    #[must_use]
    pub fn dx(&self) -> &Rational {
        &self.coords.x
    }

    /// Returns the y component.
    #[must_use]
    pub fn dy(&self) -> &Rational {
        &self.coords.y
    }

    /// Returns the z component.
    #[must_use]
    pub fn dz(&self) -> &Rational {
        &self.coords.z
    }

    /// Whether every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coords.iter().all(Zero::is_zero)
    }

    /// `s · self`.
    #[must_use]
    pub fn scale(&self, s: &Rational) -> Self {
        Self::from_coords(self.coords.map(|c| c * s))
    }

    /// `self / s`, or `None` when `s` is zero.
    #[must_use]
    pub fn divide(&self, s: &Rational) -> Option<Self> {
        if s.is_zero() {
            return None;
        }
        Some(Self::from_coords(self.coords.map(|c| c / s)))
    }

    /// Returns the dot product, exact.
    #[must_use]
    pub fn dot(&self, other: &Self) -> Rational {
        self.coords.dot(&other.coords)
    }

    /// Returns the cross product `self × other`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::from_coords(self.coords.cross(&other.coords))
    }

    /// `|self|²`, exact.
    #[must_use]
    pub fn magnitude_squared(&self) -> Rational {
        self.dot(self)
    }

    /// `|self|`, computed once and cached.
    #[must_use]
    pub fn magnitude(&self) -> &RationalSqrt {
        self.magnitude
            .get_or_init(|| Box::new(RationalSqrt::from_non_negative(self.magnitude_squared())))
    }

    /// The unit vector in the direction of `self`, each component rounded to
    /// a multiple of `10^oom` (exact when `|self|` is rational).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for the zero vector.
    pub fn unit_vector(&self, oom: Oom, mode: RoundingMode) -> Result<Self> {
        if self.is_zero() {
            return Err(GeometryError::ZeroVector.into());
        }
        let m2 = self.magnitude_squared();
        let component = |c: &Rational| {
            let root = RationalSqrt::from_non_negative(c * c / &m2);
            let root = if c.is_negative() { root.negate() } else { root };
            root.sqrt(oom, mode)
        };
        Ok(Self::new(
            component(self.dx()),
            component(self.dy()),
            component(self.dz()),
        ))
    }

    /// Whether `self = k · other` for some scalar `k`.
    ///
    /// The zero vector is a scalar multiple of every vector.
    #[must_use]
    pub fn is_scalar_multiple(&self, other: &Self) -> bool {
        self.cross(other).is_zero()
    }

    /// Whether the dot product is zero.
    #[must_use]
    pub fn is_orthogonal(&self, other: &Self) -> bool {
        self.dot(other).is_zero()
    }

    /// Rotates `self` by `theta` radians about `axis` (right-hand rule).
    ///
    /// # Errors
    ///
    /// Returns an error if `axis` is the zero vector.
    pub fn rotate(&self, axis: &Self, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        Ok(Rotation::new(axis, theta, oom, mode)?.apply(self))
    }

    /// Component-wise lexicographic order.
    #[must_use]
    pub fn lexicographic_cmp(&self, other: &Self) -> Ordering {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| a.cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in &self.coords {
            c.hash(state);
        }
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        Vector::from_coords(&self.coords + &other.coords)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        &self + &other
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        Vector::from_coords(&self.coords - &other.coords)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        &self - &other
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::from_coords(-&self.coords)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::ratio;

    fn v(x: i64, y: i64, z: i64) -> Vector {
        Vector::from_ints(x, y, z)
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = v(1, 2, 3);
        let b = v(-4, 5, 0);
        assert_eq!(&a + &b, v(-3, 7, 3));
        assert_eq!(&a - &b, v(5, -3, 3));
        assert_eq!(-&a, v(-1, -2, -3));
        assert_eq!(a.scale(&ratio(1, 2)), Vector::new(ratio(1, 2), integer(1), ratio(3, 2)));
    }

    #[test]
    fn dot_and_cross() {
        let x = v(1, 0, 0);
        let y = v(0, 1, 0);
        assert_eq!(x.cross(&y), v(0, 0, 1));
        assert!(x.is_orthogonal(&y));
        assert_eq!(v(1, 2, 3).dot(&v(4, 5, 6)), integer(32));
    }

    #[test]
    fn magnitude_is_cached_and_exact() {
        let a = v(2, 3, 6);
        assert_eq!(a.magnitude().exact(), Some(integer(7)));
        assert_eq!(a.magnitude_squared(), integer(49));
        assert!(!v(1, 1, 0).magnitude().is_exact());
    }

    #[test]
    fn scalar_multiples() {
        assert!(v(1, 2, 3).is_scalar_multiple(&v(-2, -4, -6)));
        assert!(!v(1, 2, 3).is_scalar_multiple(&v(1, 2, 4)));
        assert!(Vector::zero().is_scalar_multiple(&v(1, 2, 3)));
    }

    #[test]
    fn unit_vector_exact_and_rounded() {
        let u = v(0, 3, 4).unit_vector(-6, RoundingMode::HalfUp).unwrap();
        assert_eq!(u, Vector::new(integer(0), ratio(3, 5), ratio(4, 5)));

        let w = v(1, -1, 0).unit_vector(-3, RoundingMode::HalfUp).unwrap();
        assert_eq!(w, Vector::new(ratio(707, 1000), ratio(-707, 1000), integer(0)));

        assert!(Vector::zero().unit_vector(-3, RoundingMode::HalfUp).is_err());
    }

    #[test]
    fn lexicographic_order() {
        assert_eq!(v(1, 2, 3).lexicographic_cmp(&v(1, 2, 4)), Ordering::Less);
        assert_eq!(v(2, 0, 0).lexicographic_cmp(&v(1, 9, 9)), Ordering::Greater);
        assert_eq!(v(1, 2, 3).lexicographic_cmp(&v(1, 2, 3)), Ordering::Equal);
    }
}
