//! Algorithms over the geometry value types.
//!
//! Every pairwise intersection and distance funnels through [`intersection`]
//! and [`distance_squared`], which reduce both sides to one of four operand
//! shapes: a point, a line, a plane, or a bounded convex cell.

pub mod merge;
pub mod planar;
pub mod polytope;
pub mod transform;

use num_traits::Zero;

use crate::geometry::{Geometry, Line, Plane, Point, Polytope};
use crate::math::Rational;

/// A borrowed geometry reduced to the shape the algorithms work on.
#[derive(Clone, Copy)]
pub(crate) enum Operand<'a> {
    Point(&'a Point),
    Line(&'a Line),
    Plane(&'a Plane),
    Cell(&'a dyn Polytope),
}

pub(crate) trait AsOperand {
    fn operand(&self) -> Operand<'_>;
}

pub(crate) fn intersection(a: Operand<'_>, b: Operand<'_>) -> Option<Geometry> {
    use Operand::{Cell, Line as L, Plane as P, Point as Pt};

    match (a, b) {
        (Pt(x), Pt(y)) => (x == y).then(|| Geometry::Point(x.clone())),
        (Pt(x), L(line)) | (L(line), Pt(x)) => line.contains_point(x).then(|| Geometry::Point(x.clone())),
        (Pt(x), P(plane)) | (P(plane), Pt(x)) => plane.contains_point(x).then(|| Geometry::Point(x.clone())),
        (Pt(x), Cell(c)) | (Cell(c), Pt(x)) => c.contains(x).then(|| Geometry::Point(x.clone())),
        (L(l), L(m)) => l.line_intersection(m),
        (L(line), P(plane)) | (P(plane), L(line)) => plane.line_intersection(line),
        (L(line), Cell(c)) | (Cell(c), L(line)) => polytope::line_intersection(c, line),
        (P(p), P(q)) => p.plane_intersection(q),
        (P(plane), Cell(c)) | (Cell(c), P(plane)) => polytope::plane_intersection(c, plane),
        (Cell(c), Cell(d)) => polytope::cell_intersection(c, d),
    }
}

pub(crate) fn distance_squared(a: Operand<'_>, b: Operand<'_>) -> Rational {
    use Operand::{Cell, Line as L, Plane as P, Point as Pt};

    match (a, b) {
        (Pt(x), Pt(y)) => x.distance_squared(y),
        (Pt(x), L(line)) | (L(line), Pt(x)) => line.point_distance_squared(x),
        (Pt(x), P(plane)) | (P(plane), Pt(x)) => plane.point_distance_squared(x),
        (Pt(x), Cell(c)) | (Cell(c), Pt(x)) => polytope::point_distance_squared(c, x),
        (L(l), L(m)) => l.line_distance_squared(m),
        (L(line), P(plane)) | (P(plane), L(line)) => {
            if plane.is_parallel_line(line) {
                plane.point_distance_squared(line.p())
            } else {
                Rational::zero()
            }
        }
        (L(line), Cell(c)) | (Cell(c), L(line)) => polytope::line_distance_squared(c, line),
        (P(p), P(q)) => {
            if p.is_parallel_plane(q) {
                p.point_distance_squared(q.p())
            } else {
                Rational::zero()
            }
        }
        (P(plane), Cell(c)) | (Cell(c), P(plane)) => polytope::plane_distance_squared(c, plane),
        (Cell(c), Cell(d)) => polytope::cell_distance_squared(c, d),
    }
}
