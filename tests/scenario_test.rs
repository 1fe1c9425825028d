#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use common::{dec, init_tracing, pt, ptd};
use ratgeo::geometry::{
    Envelope, EnvelopeFace, EnvelopeKind, Line, LineSegment, Rectangle, Tetrahedron, Triangle, Vector,
};
use ratgeo::math::{integer, to_f64};
use ratgeo::{Distance, Geometry, Intersect, RoundingMode};

// ---------------------------------------------------------------------------
// Envelope construction and classification
// ---------------------------------------------------------------------------

#[test]
fn single_point_envelope() {
    init_tracing();
    let e = Envelope::new(&[pt(0, 0, 0)]).unwrap();
    assert_eq!(e.kind(), EnvelopeKind::Point);
    assert_eq!(e.type_index(), 0);
    let zero = integer(0);
    for extent in [e.x_min(), e.x_max(), e.y_min(), e.y_max(), e.z_min(), e.z_max()] {
        assert_eq!(extent, &zero);
    }
    for side in [e.left(), e.right(), e.bottom(), e.top(), e.fore(), e.aft()] {
        assert_eq!(side, &EnvelopeFace::Point(pt(0, 0, 0)));
    }
}

#[test]
fn line_envelope_meets_its_axis_in_a_segment() {
    init_tracing();
    let e = Envelope::new(&[pt(0, 0, 0), pt(1, 0, 0)]).unwrap();
    assert_eq!(e.kind(), EnvelopeKind::LineX);
    let axis = Line::from_point_vector(pt(0, 0, 0), Vector::from_ints(1, 0, 0)).unwrap();
    let expected = Geometry::LineSegment(LineSegment::new(pt(0, 0, 0), pt(1, 0, 0)).unwrap());
    assert_eq!(e.intersection(&axis), Some(expected.clone()));
    assert_eq!(axis.intersection(&e), Some(expected));
}

#[test]
fn vertical_envelope_is_type_three() {
    let e = Envelope::new(&[pt(2, 5, -1), pt(2, 5, 4)]).unwrap();
    assert_eq!(e.type_index(), 3);
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

#[test]
fn parallel_lines_do_not_meet() {
    let a = Line::from_point_vector(pt(0, 0, 0), Vector::from_ints(1, 0, 0)).unwrap();
    let b = Line::from_point_vector(pt(0, 1, 0), Vector::from_ints(1, 0, 0)).unwrap();
    assert!(a.is_parallel(&b));
    assert_eq!(a.intersection(&b), None);
    assert_eq!(Distance::distance_squared(&a, &b), integer(1));
}

#[test]
fn crossing_lines_meet_at_the_origin() {
    let a = Line::from_point_vector(pt(0, 0, 0), Vector::from_ints(1, 0, 0)).unwrap();
    let b = Line::from_point_vector(pt(0, 0, 0), Vector::from_ints(0, 1, 0)).unwrap();
    assert_eq!(a.intersection(&b), Some(Geometry::Point(pt(0, 0, 0))));
}

#[test]
fn coincident_lines_intersect_in_themselves() {
    let a = Line::new(pt(0, 0, 0), pt(1, 1, 1)).unwrap();
    let b = Line::new(pt(3, 3, 3), pt(-2, -2, -2)).unwrap();
    assert_eq!(a.intersection(&b), Some(Geometry::Line(b.clone())));
}

#[test]
fn construction_errors_are_distinguishable() {
    assert!(Line::new(pt(1, 1, 1), pt(1, 1, 1)).is_err());
    assert!(Line::from_point_vector(pt(0, 0, 0), Vector::zero()).is_err());
    assert!(Rectangle::new(pt(0, 0, 0), pt(1, 0, 0), pt(1, 2, 0), pt(0, 1, 0)).is_err());
    assert!(Envelope::new(&[]).is_err());
    assert!(Tetrahedron::new(pt(0, 0, 0), pt(1, 0, 0), pt(0, 1, 0), pt(1, 1, 0)).is_err());
}

// ---------------------------------------------------------------------------
// Bounded shapes
// ---------------------------------------------------------------------------

#[test]
fn vertical_line_pierces_a_rectangle() {
    init_tracing();
    let rectangle = Rectangle::new(pt(0, 0, 0), pt(0, 1, 0), pt(1, 1, 0), pt(1, 0, 0)).unwrap();
    let line = Line::from_point_vector(ptd("0.5", "0.5", "-1"), Vector::from_ints(0, 0, 1)).unwrap();
    assert_eq!(rectangle.intersection(&line), Some(Geometry::Point(ptd("0.5", "0.5", "0"))));
    assert_eq!(Distance::distance_squared(&rectangle, &line), integer(0));
}

#[test]
fn triangles_crossing_in_space_meet_in_a_segment() {
    init_tracing();
    let flat = Triangle::new(pt(0, 0, 0), pt(4, 0, 0), pt(0, 4, 0)).unwrap();
    let upright = Triangle::new(pt(1, 1, -1), pt(1, 1, 3), pt(3, -1, 1)).unwrap();
    let forward = flat.intersection(&upright);
    let backward = upright.intersection(&flat);
    assert_eq!(forward, backward);
    assert!(matches!(forward, Some(Geometry::LineSegment(_))));
}

#[test]
fn nested_tetrahedra_intersect_in_the_inner_one() {
    init_tracing();
    let outer = Tetrahedron::new(pt(0, 0, 0), pt(6, 0, 0), pt(0, 6, 0), pt(0, 0, 6)).unwrap();
    let inner = Tetrahedron::new(pt(1, 1, 1), pt(2, 1, 1), pt(1, 2, 1), pt(1, 1, 2)).unwrap();
    assert_eq!(outer.intersection(&inner), Some(Geometry::Tetrahedron(inner.clone())));
    assert_eq!(Distance::distance_squared(&outer, &inner), integer(0));
}

#[test]
fn separated_tetrahedra_report_their_gap() {
    let a = Tetrahedron::new(pt(0, 0, 0), pt(1, 0, 0), pt(0, 1, 0), pt(0, 0, 1)).unwrap();
    let mut b = a.clone();
    ratgeo::Transform::translate(&mut b, &Vector::from_ints(3, 0, 0));
    assert_eq!(a.intersection(&b), None);
    assert_eq!(Distance::distance_squared(&a, &b), integer(4));
    assert_eq!(a.distance(&b, -3, RoundingMode::HalfUp), integer(2));
}

// ---------------------------------------------------------------------------
// Distances
// ---------------------------------------------------------------------------

#[test]
fn point_to_segment_distance_is_clamped() {
    let x = pt(2, 0, 0);
    let segment = LineSegment::new(pt(0, 0, 0), pt(1, 0, 0)).unwrap();
    let exact = Distance::distance_exact(&x, &segment);
    assert_eq!(exact.exact(), Some(integer(1)));
    assert_eq!(Distance::distance(&segment, &x, -6, RoundingMode::HalfUp), integer(1));
}

#[test]
fn irrational_distances_round_at_the_requested_precision() {
    let a = pt(0, 0, 0);
    let b = pt(1, 1, 0);
    let rounded = a.distance(&b, -3, RoundingMode::HalfUp);
    assert_eq!(rounded, dec("1.414"));
    assert_relative_eq!(to_f64(&a.distance(&b, -12, RoundingMode::HalfEven)), 2f64.sqrt(), epsilon = 1e-11);
    assert!(!a.distance_exact(&b).is_exact());
}

#[test]
fn geometry_values_dispatch_dynamically() {
    let shapes = vec![
        Geometry::Point(pt(5, 5, 5)),
        Geometry::LineSegment(LineSegment::new(pt(5, 5, 5), pt(6, 6, 6)).unwrap()),
        Geometry::Envelope(Envelope::new(&[pt(5, 5, 5), pt(7, 7, 7)]).unwrap()),
    ];
    let origin = Geometry::Point(pt(0, 0, 0));
    for shape in &shapes {
        assert_eq!(shape.distance_squared(&origin), integer(75));
        assert_eq!(origin.distance_squared(shape), integer(75));
        assert!(!shape.is_intersected_by(&origin));
    }
}
