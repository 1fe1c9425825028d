use num_traits::{Signed, Zero};

use crate::error::{OperationError, Result};
use crate::geometry::{
    ConvexPolygon, ConvexPolyhedron, Envelope, Geometry, Line, LineSegment, Plane, Point, Rectangle, Tetrahedron,
    Transform, Triangle, Vector,
};
use crate::math::trig::sin_cos;
use crate::math::{integer, Matrix3, Oom, Rational, RationalSqrt, RoundingMode};

/// An exactly orthogonal rational rotation matrix.
///
/// Built from the quaternion `(w, a)` with `w ≈ |a|·cot(θ/2)` rounded to a
/// multiple of `10^oom`. Only the angle is approximated: the matrix is
/// orthogonal exactly, so lengths, right angles and volumes are preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    matrix: Matrix3,
}

impl Rotation {
    /// Rotation by `theta` radians about `axis` (right-hand rule).
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `axis` is the zero vector.
    pub fn new(axis: &Vector, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        if axis.is_zero() {
            return Err(OperationError::InvalidInput("rotation axis must be non-zero".into()).into());
        }
        let half = theta / integer(2);
        let (sin, cos) = sin_cos(&half, oom - 4);
        if sin.is_zero() {
            tracing::debug!(oom, "rotation angle is a whole turn");
            return Ok(Self::identity());
        }

        let cot = &cos / &sin;
        let w_squared = axis.magnitude_squared() * &cot * &cot;
        let w_root = RationalSqrt::from_non_negative(w_squared);
        let w_root = if cot.is_negative() { w_root.negate() } else { w_root };
        let w = w_root.sqrt(oom, mode);
        tracing::debug!(oom, ?mode, "built rotation quaternion");

        Ok(Self::from_quaternion(&w, axis))
    }

    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Euler–Rodrigues matrix of the (unnormalised) quaternion `(w, a)`.
    #[allow(clippy::many_single_char_names)]
    fn from_quaternion(w: &Rational, a: &Vector) -> Self {
        let (x, y, z) = (a.dx(), a.dy(), a.dz());
        let two = integer(2);
        let (ww, xx, yy, zz) = (w * w, x * x, y * y, z * z);
        let n = &ww + &xx + &yy + &zz;
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        #[rustfmt::skip]
        let m = Matrix3::new(
            &ww + &xx - &yy - &zz,    &two * (&xy - &wz),       &two * (&xz + &wy),
            &two * (&xy + &wz),       &ww - &xx + &yy - &zz,    &two * (&yz - &wx),
            &two * (&xz - &wy),       &two * (&yz + &wx),       &ww - &xx - &yy + &zz,
        );
        Self {
            matrix: m.map(|e| e / &n),
        }
    }

    /// Returns the exactly orthogonal rotation matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// `R·v`.
    #[must_use]
    pub fn apply(&self, v: &Vector) -> Vector {
        Vector::from_coords(&self.matrix * v.coords())
    }

    /// `pivot + R·(x - pivot)`, as a point with zero offset.
    #[must_use]
    pub fn apply_point(&self, pivot: &Point, x: &Point) -> Point {
        let moved = self.apply(&pivot.vector_to(x));
        Point::from_vector(&pivot.position() + &moved)
    }

    /// Whether `R·Rᵀ = I` exactly.
    #[must_use]
    pub fn is_orthogonal(&self) -> bool {
        let product = &self.matrix * self.matrix.transpose();
        product == Matrix3::identity()
    }
}

/// A rotation about a line, applied to absolute points.
struct Turn<'a> {
    rotation: Rotation,
    pivot: &'a Point,
}

impl<'a> Turn<'a> {
    fn new(axis: &'a Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        Ok(Self {
            rotation: Rotation::new(axis.v(), theta, oom, mode)?,
            pivot: axis.p(),
        })
    }

    fn point(&self, x: &Point) -> Point {
        self.rotation.apply_point(self.pivot, x)
    }
}

impl Transform for Point {
    fn translate(&mut self, v: &Vector) {
        Point::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        Point::rotate(self, axis, theta, oom, mode)
    }
}

impl Transform for Line {
    fn translate(&mut self, v: &Vector) {
        Line::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        Ok(Line::new_unchecked(turn.point(self.p()), turn.point(self.q())))
    }
}

impl Transform for LineSegment {
    fn translate(&mut self, v: &Vector) {
        LineSegment::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        Ok(LineSegment::new_unchecked(turn.point(self.p()), turn.point(self.q())))
    }
}

impl Transform for Plane {
    fn translate(&mut self, v: &Vector) {
        Plane::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        let [p, q, r] = self.points().each_ref().map(|x| turn.point(x));
        Ok(Plane::new_unchecked(p, q, r))
    }
}

impl Transform for Triangle {
    fn translate(&mut self, v: &Vector) {
        Triangle::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        let [p, q, r] = self.corners().each_ref().map(|x| turn.point(x));
        Ok(Triangle::new_unchecked(p, q, r))
    }
}

impl Transform for Rectangle {
    fn translate(&mut self, v: &Vector) {
        Rectangle::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        let [p, q, r, s] = self.corners().each_ref().map(|x| turn.point(x));
        Rectangle::new(p, q, r, s)
    }
}

impl Transform for Tetrahedron {
    fn translate(&mut self, v: &Vector) {
        Tetrahedron::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        let [p, q, r, s] = self.corners().each_ref().map(|x| turn.point(x));
        Tetrahedron::new(p, q, r, s)
    }
}

impl Transform for ConvexPolygon {
    fn translate(&mut self, v: &Vector) {
        ConvexPolygon::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        Ok(ConvexPolygon::from_hull(self.corners().iter().map(|x| turn.point(x)).collect()))
    }
}

impl Transform for ConvexPolyhedron {
    fn translate(&mut self, v: &Vector) {
        ConvexPolyhedron::translate(self, v);
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        let turn = Turn::new(axis, theta, oom, mode)?;
        let moved: Vec<Point> = self.vertices().iter().map(|x| turn.point(x)).collect();
        Ok(ConvexPolyhedron::from_distinct(&moved))
    }
}

impl Transform for Envelope {
    fn translate(&mut self, v: &Vector) {
        Envelope::translate(self, v);
    }

    fn rotate(&self, _axis: &Line, _theta: &Rational, _oom: Oom, _mode: RoundingMode) -> Result<Self> {
        Err(OperationError::Unsupported("rotating an axis-aligned envelope".into()).into())
    }
}

impl Transform for Geometry {
    fn translate(&mut self, v: &Vector) {
        match self {
            Self::Point(g) => Transform::translate(g, v),
            Self::Line(g) => Transform::translate(g, v),
            Self::LineSegment(g) => Transform::translate(g, v),
            Self::Plane(g) => Transform::translate(g, v),
            Self::Triangle(g) => Transform::translate(g, v),
            Self::Rectangle(g) => Transform::translate(g, v),
            Self::Tetrahedron(g) => Transform::translate(g, v),
            Self::ConvexPolygon(g) => Transform::translate(g, v),
            Self::ConvexPolyhedron(g) => Transform::translate(g, v),
            Self::Envelope(g) => Transform::translate(g, v),
        }
    }

    fn rotate(&self, axis: &Line, theta: &Rational, oom: Oom, mode: RoundingMode) -> Result<Self> {
        Ok(match self {
            Self::Point(g) => Self::Point(Transform::rotate(g, axis, theta, oom, mode)?),
            Self::Line(g) => Self::Line(g.rotate(axis, theta, oom, mode)?),
            Self::LineSegment(g) => Self::LineSegment(g.rotate(axis, theta, oom, mode)?),
            Self::Plane(g) => Self::Plane(g.rotate(axis, theta, oom, mode)?),
            Self::Triangle(g) => Self::Triangle(g.rotate(axis, theta, oom, mode)?),
            Self::Rectangle(g) => Self::Rectangle(g.rotate(axis, theta, oom, mode)?),
            Self::Tetrahedron(g) => Self::Tetrahedron(g.rotate(axis, theta, oom, mode)?),
            Self::ConvexPolygon(g) => Self::ConvexPolygon(g.rotate(axis, theta, oom, mode)?),
            Self::ConvexPolyhedron(g) => Self::ConvexPolyhedron(g.rotate(axis, theta, oom, mode)?),
            Self::Envelope(g) => Self::Envelope(Transform::rotate(g, axis, theta, oom, mode)?),
        })
    }
}
