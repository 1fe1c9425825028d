//! Exact convex hulls over rational points.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use num_traits::{Signed, Zero};

use super::Rational;
use crate::geometry::{Point, Vector};

/// A supporting plane of a 3D point set.
#[derive(Debug, Clone)]
pub struct HullFacet {
    /// Outward normal, not normalised.
    pub normal: Vector,
    /// Indices of the input points lying on the facet.
    pub members: Vec<usize>,
}

/// Which coordinate pair a planar projection keeps.
#[derive(Clone, Copy)]
enum Projection {
    Yz,
    Zx,
    Xy,
}

impl Projection {
    /// Drops the dominant axis of `normal`. Returns the projection and whether
    /// the normal's dropped component is negative.
    fn for_normal(normal: &Vector) -> (Self, bool) {
        let (ax, ay, az) = (normal.dx().abs(), normal.dy().abs(), normal.dz().abs());
        if ax >= ay && ax >= az {
            (Self::Yz, normal.dx().is_negative())
        } else if ay >= az {
            (Self::Zx, normal.dy().is_negative())
        } else {
            (Self::Xy, normal.dz().is_negative())
        }
    }

    fn apply(self, p: &Point) -> (Rational, Rational) {
        match self {
            Self::Yz => (p.y(), p.z()),
            Self::Zx => (p.z(), p.x()),
            Self::Xy => (p.x(), p.y()),
        }
    }
}

/// `(b - a) × (c - a)` in the plane.
fn turn(a: &(Rational, Rational), b: &(Rational, Rational), c: &(Rational, Rational)) -> Rational {
    (&b.0 - &a.0) * (&c.1 - &a.1) - (&b.1 - &a.1) * (&c.0 - &a.0)
}

/// Convex hull of coplanar points, counter-clockwise about `normal`.
///
/// Duplicate and collinear boundary points are removed, so the result holds
/// only strict corners. Fewer than three distinct points are returned as-is.
#[must_use]
pub fn planar_hull(points: &[Point], normal: &Vector) -> Vec<Point> {
    let (projection, flipped) = Projection::for_normal(normal);
    let mut projected: Vec<((Rational, Rational), &Point)> =
        points.iter().map(|p| (projection.apply(p), p)).collect();
    projected.sort_by(|a, b| a.0.cmp(&b.0));
    projected.dedup_by(|a, b| a.0 == b.0);

    if projected.len() < 3 {
        return projected.into_iter().map(|(_, p)| p.clone()).collect();
    }

    // Andrew's monotone chain.
    let mut hull: Vec<&((Rational, Rational), &Point)> = Vec::with_capacity(projected.len() * 2);
    for pass in [true, false] {
        let start = hull.len();
        let ordered: Box<dyn Iterator<Item = &((Rational, Rational), &Point)>> = if pass {
            Box::new(projected.iter())
        } else {
            Box::new(projected.iter().rev())
        };
        for item in ordered {
            while hull.len() >= start + 2 {
                let n = hull.len();
                if turn(&hull[n - 2].0, &hull[n - 1].0, &item.0).is_positive() {
                    break;
                }
                hull.pop();
            }
            hull.push(item);
        }
        hull.pop();
    }

    let mut corners: Vec<Point> = hull.into_iter().map(|(_, p)| (*p).clone()).collect();
    if flipped {
        corners.reverse();
    }
    corners
}

/// Facets of the convex hull of a non-coplanar point set.
///
/// Every triple of input points spanning a supporting plane yields one facet;
/// facets sharing the same member set are reported once. Inputs must be
/// distinct points.
#[must_use]
pub fn hull_facets(points: &[Point]) -> Vec<HullFacet> {
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut facets = Vec::new();
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let normal = points[i]
                    .vector_to(&points[j])
                    .cross(&points[i].vector_to(&points[k]));
                if normal.is_zero() {
                    continue;
                }
                let sides: Vec<Ordering> = points
                    .iter()
                    .map(|x| normal.dot(&points[i].vector_to(x)).cmp(&Rational::zero()))
                    .collect();
                let outward = if sides.iter().all(|s| s.is_le()) {
                    normal
                } else if sides.iter().all(|s| s.is_ge()) {
                    -normal
                } else {
                    continue;
                };
                let members: Vec<usize> = sides
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.is_eq())
                    .map(|(index, _)| index)
                    .collect();
                if seen.insert(members.clone()) {
                    facets.push(HullFacet {
                        normal: outward,
                        members,
                    });
                }
            }
        }
    }
    facets
}
