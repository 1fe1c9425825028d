//! Exact queries against a bounded convex planar face.
//!
//! A face is given by its supporting plane and counter-clockwise corners.
//! Lines in the face's plane are clipped against the inward edge normals
//! (Cyrus–Beck) with rational parameters, so touching a corner or running
//! along an edge is decided exactly.

use num_traits::{One, Signed, Zero};

use crate::geometry::{Geometry, Line, LineSegment, PlanarFace, Point};
use crate::math::Rational;

/// Whether `x` lies in the closed face.
#[must_use]
pub fn contains(face: &dyn PlanarFace, x: &Point) -> bool {
    let plane = face.plane();
    if !plane.contains_point(x) {
        return false;
    }
    let n = plane.normal();
    let corners = face.corners();
    let count = corners.len();
    (0..count).all(|i| {
        let a = &corners[i];
        let b = &corners[(i + 1) % count];
        !a.vector_to(b).cross(&a.vector_to(x)).dot(n).is_negative()
    })
}

/// The parameter interval of a line lying in the face's plane that falls
/// inside the face, narrowed to `[lo, hi]` where given.
fn clip_parameters(
    face: &dyn PlanarFace,
    line: &Line,
    mut lo: Option<Rational>,
    mut hi: Option<Rational>,
) -> Option<(Rational, Rational)> {
    let n = face.plane().normal();
    let corners = face.corners();
    let count = corners.len();
    for i in 0..count {
        let a = &corners[i];
        let inward = n.cross(&a.vector_to(&corners[(i + 1) % count]));
        let num = inward.dot(&a.vector_to(line.p()));
        let den = inward.dot(line.v());
        if den.is_zero() {
            if num.is_negative() {
                return None;
            }
            continue;
        }
        let t = -num / &den;
        if den.is_positive() {
            lo = Some(lo.map_or(t.clone(), |l| l.max(t)));
        } else {
            hi = Some(hi.map_or(t.clone(), |h| h.min(t)));
        }
    }
    let (lo, hi) = (lo?, hi?);
    (lo <= hi).then_some((lo, hi))
}

/// Intersection of a line with the face: a point, a segment, or `None`.
#[must_use]
pub fn line_intersection(face: &dyn PlanarFace, line: &Line) -> Option<Geometry> {
    let plane = face.plane();
    if plane.is_parallel_line(line) {
        if !plane.contains_point(line.p()) {
            return None;
        }
        let (lo, hi) = clip_parameters(face, line, None, None)?;
        return Some(LineSegment::between(line.point_at(&lo), line.point_at(&hi)));
    }
    let t = plane.line_parameter(line)?;
    let x = line.point_at(&t);
    contains(face, &x).then_some(Geometry::Point(x))
}

/// Intersection of a segment with the face: a point, a segment, or `None`.
#[must_use]
pub fn segment_intersection(face: &dyn PlanarFace, segment: &LineSegment) -> Option<Geometry> {
    let plane = face.plane();
    let line = segment.line();
    if plane.is_parallel_line(line) {
        if !plane.contains_point(line.p()) {
            return None;
        }
        let (lo, hi) = clip_parameters(face, line, Some(Rational::zero()), Some(Rational::one()))?;
        return Some(LineSegment::between(line.point_at(&lo), line.point_at(&hi)));
    }
    match plane.segment_intersection(segment)? {
        Geometry::Point(x) => contains(face, &x).then_some(Geometry::Point(x)),
        _ => None,
    }
}

/// Squared distance from `x` to the closed face.
#[must_use]
pub fn point_distance_squared(face: &dyn PlanarFace, x: &Point) -> Rational {
    let plane = face.plane();
    let foot = plane.point_of_projection(x);
    if contains(face, &foot) {
        return plane.point_distance_squared(x);
    }
    face.boundary()
        .iter()
        .map(|e| e.point_distance_squared(x))
        .min()
        .unwrap_or_else(|| plane.point_distance_squared(x))
}
