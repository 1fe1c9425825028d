//! Intersections and distances between bounded convex cells.
//!
//! The intersection of two convex cells is convex, and its corners are
//! corners of one cell inside the other, or points where an edge of one
//! crosses a face or an edge of the other. Those candidates are gathered
//! and merged into the simplest shape. Distances enumerate the same
//! candidates and keep the smallest exact square.

use num_traits::Zero;

use super::merge::PointAccumulator;
use super::planar;
use crate::geometry::{Geometry, Line, Plane, Point, PointPlaneClassification, Polytope};
use crate::math::Rational;

/// Intersection of a line with a cell.
pub(crate) fn line_intersection(cell: &dyn Polytope, line: &Line) -> Option<Geometry> {
    if let Some(envelope) = cell.as_envelope() {
        return envelope.line_intersection(line);
    }
    let mut acc = PointAccumulator::new();
    let faces = cell.faces();
    if faces.is_empty() {
        for edge in cell.edges() {
            acc.absorb(edge.line_intersection(line));
        }
    } else {
        for face in faces {
            acc.absorb(planar::line_intersection(face, line));
        }
    }
    acc.finish()
}

/// Intersection of a plane with a cell: the whole cell when it lies in the
/// plane, otherwise the section through it.
pub(crate) fn plane_intersection(cell: &dyn Polytope, plane: &Plane) -> Option<Geometry> {
    let vertices = cell.vertices();
    if vertices.iter().all(|v| plane.side(v) == PointPlaneClassification::On) {
        return Some(cell.to_geometry());
    }
    let mut acc = PointAccumulator::new();
    for v in vertices {
        if plane.contains_point(v) {
            acc.push(v.clone());
        }
    }
    for edge in cell.edges() {
        acc.absorb(plane.segment_intersection(edge));
    }
    acc.finish()
}

/// Intersection of two cells.
pub(crate) fn cell_intersection(a: &dyn Polytope, b: &dyn Polytope) -> Option<Geometry> {
    if !a.bounds().is_intersected_by_envelope(b.bounds()) {
        return None;
    }
    if let (Some(e), Some(f)) = (a.as_envelope(), b.as_envelope()) {
        return e.intersection_envelope(f).map(Geometry::Envelope);
    }
    if let Some((envelope, segment)) = a
        .as_envelope()
        .zip(b.as_segment())
        .or_else(|| b.as_envelope().zip(a.as_segment()))
    {
        return envelope.segment_intersection(segment);
    }

    let mut acc = PointAccumulator::new();
    for (this, other) in [(a, b), (b, a)] {
        for v in this.vertices() {
            if other.contains(v) {
                acc.push(v.clone());
            }
        }
        let faces = other.faces();
        for edge in this.edges() {
            for face in &faces {
                acc.absorb(planar::segment_intersection(*face, edge));
            }
        }
    }
    for edge in a.edges() {
        for other in b.edges() {
            acc.absorb(edge.segment_intersection(other));
        }
    }
    tracing::trace!(candidates = acc.len(), "gathered cell intersection candidates");
    acc.finish()
}

/// Squared distance from `x` to the closed cell.
pub(crate) fn point_distance_squared(cell: &dyn Polytope, x: &Point) -> Rational {
    if let Some(envelope) = cell.as_envelope() {
        return envelope.point_distance_squared(x);
    }
    if cell.contains(x) {
        return Rational::zero();
    }
    let faces = cell.faces().into_iter().map(|f| planar::point_distance_squared(f, x));
    let edges = cell.edges().iter().map(|e| e.point_distance_squared(x));
    let vertices = cell.vertices().iter().map(|v| v.distance_squared(x));
    faces.chain(edges).chain(vertices).min().unwrap_or_else(Rational::zero)
}

/// Squared distance between a line and a cell.
///
/// When they are disjoint the nearest point of the cell lies on its boundary
/// edges, or is a vertex of an edgeless cell.
pub(crate) fn line_distance_squared(cell: &dyn Polytope, line: &Line) -> Rational {
    if line_intersection(cell, line).is_some() {
        return Rational::zero();
    }
    let edges = cell.edges().iter().map(|e| e.line_distance_squared(line));
    let vertices = cell.vertices().iter().map(|v| line.point_distance_squared(v));
    edges.chain(vertices).min().unwrap_or_else(Rational::zero)
}

/// Squared distance between a plane and a cell: zero when the cell touches
/// or crosses the plane, else that of the nearest vertex.
pub(crate) fn plane_distance_squared(cell: &dyn Polytope, plane: &Plane) -> Rational {
    let vertices = cell.vertices();
    let sides: Vec<PointPlaneClassification> = vertices.iter().map(|v| plane.side(v)).collect();
    let one_side = sides.windows(2).all(|w| w[0] == w[1]);
    if !one_side || sides.contains(&PointPlaneClassification::On) {
        return Rational::zero();
    }
    vertices
        .iter()
        .map(|v| plane.point_distance_squared(v))
        .min()
        .unwrap_or_else(Rational::zero)
}

/// Squared distance between two cells.
pub(crate) fn cell_distance_squared(a: &dyn Polytope, b: &dyn Polytope) -> Rational {
    if let (Some(e), Some(f)) = (a.as_envelope(), b.as_envelope()) {
        return e.envelope_distance_squared(f);
    }
    if cell_intersection(a, b).is_some() {
        return Rational::zero();
    }
    let from_a = a.vertices().iter().map(|v| point_distance_squared(b, v));
    let from_b = b.vertices().iter().map(|v| point_distance_squared(a, v));
    let between_edges = a
        .edges()
        .iter()
        .flat_map(|e| b.edges().iter().map(move |f| e.segment_distance_squared(f)));
    from_a
        .chain(from_b)
        .chain(between_edges)
        .min()
        .unwrap_or_else(Rational::zero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Envelope, LineSegment, Rectangle, Tetrahedron, Triangle, Vector};
    use crate::math::{integer, ratio};

    fn unit_tetrahedron() -> Tetrahedron {
        Tetrahedron::new(
            Point::origin(),
            Point::from_ints(2, 0, 0),
            Point::from_ints(0, 2, 0),
            Point::from_ints(0, 0, 2),
        )
        .unwrap()
    }

    fn cube(lo: i64, hi: i64) -> Envelope {
        Envelope::new(&[Point::from_ints(lo, lo, lo), Point::from_ints(hi, hi, hi)]).unwrap()
    }

    #[test]
    fn line_through_a_solid_is_a_chord() {
        let t = unit_tetrahedron();
        let line = Line::from_point_vector(Point::new(ratio(1, 2), ratio(1, 2), integer(-3)), Vector::from_ints(0, 0, 1))
            .unwrap();
        assert_eq!(
            line_intersection(&t, &line),
            Some(LineSegment::between(
                Point::new(ratio(1, 2), ratio(1, 2), integer(0)),
                Point::new(ratio(1, 2), ratio(1, 2), integer(1)),
            ))
        );
    }

    #[test]
    fn line_through_an_edge_meets_in_a_point() {
        let t = unit_tetrahedron();
        let line = Line::from_point_vector(Point::from_ints(1, 0, 1), Vector::from_ints(1, 1, 0)).unwrap();
        assert_eq!(line_intersection(&t, &line), Some(Geometry::Point(Point::from_ints(1, 0, 1))));
    }

    #[test]
    fn plane_sections() {
        let t = unit_tetrahedron();
        let mid = Plane::from_point_normal(Point::from_ints(0, 0, 1), &Vector::from_ints(0, 0, 1)).unwrap();
        match plane_intersection(&t, &mid) {
            Some(Geometry::Triangle(section)) => assert_eq!(section.area_squared(), ratio(1, 4)),
            other => panic!("expected a triangle, got {other:?}"),
        }
        let base = Plane::from_point_normal(Point::origin(), &Vector::from_ints(0, 0, 1)).unwrap();
        let flat = Triangle::new(Point::origin(), Point::from_ints(1, 0, 0), Point::from_ints(0, 1, 0)).unwrap();
        assert_eq!(plane_intersection(&flat, &base), Some(Geometry::Triangle(flat.clone())));
        let far = Plane::from_point_normal(Point::from_ints(0, 0, 5), &Vector::from_ints(0, 0, 1)).unwrap();
        assert_eq!(plane_intersection(&t, &far), None);
        assert_eq!(plane_distance_squared(&t, &far), integer(9));
        assert_eq!(plane_distance_squared(&t, &mid), integer(0));
    }

    #[test]
    fn overlapping_cubes_meet_in_a_box() {
        let a = cube(0, 2);
        let b = cube(1, 3);
        assert_eq!(cell_intersection(&a, &b), Some(Geometry::Envelope(cube(1, 2))));
        assert_eq!(cell_distance_squared(&a, &cube(4, 5)), integer(12));
    }

    #[test]
    fn segments_are_clipped_by_a_box() {
        let c = cube(0, 2);
        let through = LineSegment::new(Point::from_ints(-1, 1, 1), Point::from_ints(3, 1, 1)).unwrap();
        let chord = LineSegment::between(Point::from_ints(0, 1, 1), Point::from_ints(2, 1, 1));
        assert_eq!(cell_intersection(&c, &through), Some(chord.clone()));
        assert_eq!(cell_intersection(&through, &c), Some(chord));

        let grazing = LineSegment::new(Point::from_ints(1, 1, 3), Point::from_ints(3, 1, 1)).unwrap();
        assert_eq!(cell_intersection(&c, &grazing), Some(Geometry::Point(Point::from_ints(2, 1, 2))));
        let short = LineSegment::new(Point::from_ints(3, 1, 1), Point::from_ints(5, 1, 1)).unwrap();
        assert_eq!(cell_intersection(&short, &c), None);
        assert_eq!(cell_distance_squared(&c, &short), integer(1));
    }

    #[test]
    fn tetrahedron_corner_inside_a_cube() {
        let t = unit_tetrahedron();
        let c = cube(-1, 1);
        match cell_intersection(&t, &c) {
            Some(Geometry::ConvexPolyhedron(p)) => {
                // corner tetrahedron x + y + z <= 2 cut by the unit cube: 1 - 1/6
                assert_eq!(p.volume(), ratio(5, 6));
            }
            other => panic!("expected a polyhedron, got {other:?}"),
        }
    }

    #[test]
    fn touching_solids_share_a_face() {
        let below = cube(0, 1);
        let square = Rectangle::from_corners(Point::from_ints(0, 0, 1), Point::from_ints(1, 0, 1), Point::from_ints(1, 1, 1))
            .unwrap();
        assert_eq!(cell_intersection(&below, &square), Some(Geometry::Rectangle(square.clone())));
        let apex = Tetrahedron::new(
            Point::from_ints(1, 1, 1),
            Point::from_ints(3, 1, 1),
            Point::from_ints(1, 3, 1),
            Point::from_ints(1, 1, 3),
        )
        .unwrap();
        assert_eq!(cell_intersection(&below, &apex), Some(Geometry::Point(Point::from_ints(1, 1, 1))));
    }

    #[test]
    fn coplanar_triangles_overlap_in_a_polygon() {
        let a = Triangle::new(Point::origin(), Point::from_ints(4, 0, 0), Point::from_ints(0, 4, 0)).unwrap();
        let b = Triangle::new(Point::from_ints(1, -1, 0), Point::from_ints(5, 3, 0), Point::from_ints(1, 3, 0)).unwrap();
        let overlap = cell_intersection(&a, &b).unwrap();
        assert_eq!(overlap, cell_intersection(&b, &a).unwrap());
        assert!(matches!(overlap, Geometry::Triangle(_) | Geometry::ConvexPolygon(_)));
    }

    #[test]
    fn distances_between_disjoint_cells() {
        let t = unit_tetrahedron();
        assert_eq!(point_distance_squared(&t, &Point::from_ints(2, 2, 2)), ratio(16, 3));
        assert_eq!(point_distance_squared(&t, &Point::from_ints(-1, 0, 0)), integer(1));
        let segment = LineSegment::new(Point::from_ints(3, 3, 0), Point::from_ints(3, 3, 5)).unwrap();
        assert_eq!(cell_distance_squared(&t, &segment), integer(8));
        let skew = Line::from_point_vector(Point::from_ints(0, 0, 5), Vector::from_ints(1, -1, 0)).unwrap();
        assert_eq!(line_distance_squared(&t, &skew), integer(9));
    }
}
