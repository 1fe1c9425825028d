//! Folding partial intersection results into one shape.
//!
//! Composite intersections produce many small pieces: a point where an edge
//! pierces a face, a segment where a line runs across another face, and so
//! on. The pieces of a convex intersection are all subsets of one convex
//! result, so collecting their distinct points and taking the hull recovers
//! it. A corner shared by two pieces is counted once.

use num_traits::Zero;

use crate::geometry::{
    spanning_normal, ConvexPolygon, ConvexPolyhedron, Geometry, LineSegment, Point, Rectangle, Tetrahedron, Triangle,
};
use crate::math::hull::planar_hull;

/// Distinct points gathered from partial results.
#[derive(Debug, Default)]
pub struct PointAccumulator {
    points: Vec<Point>,
}

impl PointAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `p` unless an equal point is already present.
    pub fn push(&mut self, p: Point) {
        if !self.points.contains(&p) {
            self.points.push(p);
        }
    }

    /// Adds the corners of a bounded partial result.
    pub fn absorb(&mut self, piece: Option<Geometry>) {
        let Some(piece) = piece else {
            return;
        };
        debug_assert!(piece.is_bounded(), "cannot merge an unbounded {}", piece.kind_name());
        for p in piece.defining_points() {
            self.push(p);
        }
    }

    /// Returns the number of distinct points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been gathered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The simplest shape spanned by the gathered points.
    #[must_use]
    pub fn finish(self) -> Option<Geometry> {
        let count = self.points.len();
        let merged = collapse(self.points);
        if let Some(g) = &merged {
            tracing::trace!(count, kind = g.kind_name(), "merged partial results");
        }
        merged
    }
}

fn collapse(mut points: Vec<Point>) -> Option<Geometry> {
    match points.len() {
        0 => return None,
        1 => return points.pop().map(Geometry::Point),
        _ => {}
    }

    let Some(normal) = spanning_normal(&points) else {
        return Some(extreme_segment(&points));
    };

    let origin = &points[0];
    let flat = points.iter().all(|x| normal.dot(&origin.vector_to(x)).is_zero());
    if flat {
        let mut hull = planar_hull(&points, &normal);
        return Some(match hull.len() {
            3 => {
                let (r, q, p) = (hull.pop()?, hull.pop()?, hull.pop()?);
                Geometry::Triangle(Triangle::new_unchecked(p, q, r))
            }
            4 => match Rectangle::new(hull[0].clone(), hull[1].clone(), hull[2].clone(), hull[3].clone()) {
                Ok(rectangle) => Geometry::Rectangle(rectangle),
                Err(_) => Geometry::ConvexPolygon(ConvexPolygon::from_hull(hull)),
            },
            _ => Geometry::ConvexPolygon(ConvexPolygon::from_hull(hull)),
        });
    }

    let solid = ConvexPolyhedron::from_distinct(&points);
    Some(match solid.vertices() {
        [p, q, r, s] => Geometry::Tetrahedron(Tetrahedron::new_unchecked(p.clone(), q.clone(), r.clone(), s.clone())),
        _ => Geometry::ConvexPolyhedron(solid),
    })
}

/// The segment joining the two extreme points of a collinear set.
fn extreme_segment(points: &[Point]) -> Geometry {
    let origin = &points[0];
    let direction = origin.vector_to(&points[1]);
    let along = |x: &&Point| direction.dot(&origin.vector_to(x));
    match (points.iter().min_by_key(along), points.iter().max_by_key(along)) {
        (Some(a), Some(b)) => LineSegment::between(a.clone(), b.clone()),
        _ => Geometry::Point(origin.clone()),
    }
}
