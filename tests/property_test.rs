#![allow(clippy::unwrap_used)]

mod common;

use num_traits::Zero;
use proptest::prelude::*;
use ratgeo::geometry::{
    ConvexPolygon, ConvexPolyhedron, Envelope, Line, LineSegment, Plane, Point, Rectangle, Tetrahedron, Triangle, Vector,
};
use ratgeo::math::integer;
use ratgeo::{Distance, Geometry, Intersect};

fn coord() -> impl Strategy<Value = i64> {
    -3i64..=3
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Point::from_ints(x, y, z))
}

fn vector() -> impl Strategy<Value = Vector> {
    (-2i64..=2, -2i64..=2, -2i64..=2).prop_map(|(x, y, z)| Vector::from_ints(x, y, z))
}

/// A corner and two perpendicular sides.
fn rectangle() -> impl Strategy<Value = Rectangle> {
    (point(), vector(), vector()).prop_filter_map("degenerate sides", |(p, u, t)| {
        let w = u.cross(&t);
        let q = p.translated(&u);
        let r = q.translated(&w);
        Rectangle::from_corners(p, q, r).ok()
    })
}

/// Points `p + a·u + b·w` on one plane.
fn polygon() -> impl Strategy<Value = ConvexPolygon> {
    (point(), vector(), vector(), proptest::collection::vec((-2i64..=2, -2i64..=2), 3..7)).prop_filter_map(
        "collinear points",
        |(p, u, w, weights)| {
            let points: Vec<Point> = weights
                .into_iter()
                .map(|(a, b)| p.translated(&(u.scale(&integer(a)) + w.scale(&integer(b)))))
                .collect();
            ConvexPolygon::from_points(&points).ok()
        },
    )
}

fn polyhedron() -> impl Strategy<Value = ConvexPolyhedron> {
    proptest::collection::vec(point(), 4..9)
        .prop_filter_map("coplanar points", |points| ConvexPolyhedron::from_points(&points).ok())
}

fn shape() -> impl Strategy<Value = Geometry> {
    prop_oneof![
        point().prop_map(Geometry::Point),
        (point(), point()).prop_filter_map("coincident points", |(p, q)| Line::new(p, q).ok().map(Geometry::Line)),
        (point(), point())
            .prop_filter_map("coincident points", |(p, q)| LineSegment::new(p, q).ok().map(Geometry::LineSegment)),
        (point(), point(), point())
            .prop_filter_map("collinear points", |(p, q, r)| Plane::new(p, q, r).ok().map(Geometry::Plane)),
        (point(), point(), point())
            .prop_filter_map("collinear points", |(p, q, r)| Triangle::new(p, q, r).ok().map(Geometry::Triangle)),
        (point(), point(), point(), point()).prop_filter_map("coplanar points", |(p, q, r, s)| {
            Tetrahedron::new(p, q, r, s).ok().map(Geometry::Tetrahedron)
        }),
        (point(), point()).prop_map(|(p, q)| Geometry::Envelope(Envelope::new(&[p, q]).unwrap())),
        rectangle().prop_map(Geometry::Rectangle),
        polygon().prop_map(Geometry::ConvexPolygon),
        polyhedron().prop_map(Geometry::ConvexPolyhedron),
    ]
}

fn envelope() -> impl Strategy<Value = Envelope> {
    proptest::collection::vec(point(), 1..5).prop_map(|points| Envelope::new(&points).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn distance_is_symmetric(a in shape(), b in shape()) {
        prop_assert_eq!(a.distance_squared(&b), b.distance_squared(&a));
    }

    #[test]
    fn intersection_is_symmetric(a in shape(), b in shape()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn zero_distance_iff_intersecting(a in shape(), b in shape()) {
        prop_assert_eq!(a.distance_squared(&b).is_zero(), a.is_intersected_by(&b));
    }

    #[test]
    fn intersections_lie_in_both_operands(a in shape(), b in shape()) {
        if let Some(common) = a.intersection(&b) {
            if common.is_bounded() {
                for x in common.defining_points() {
                    let x = Geometry::Point(x);
                    prop_assert!(a.is_intersected_by(&x));
                    prop_assert!(b.is_intersected_by(&x));
                }
            }
        }
    }

    #[test]
    fn envelope_containment_matches_extents(e in envelope(), x in point()) {
        let inside = e.x_min() <= &x.x() && x.x() <= *e.x_max()
            && e.y_min() <= &x.y() && x.y() <= *e.y_max()
            && e.z_min() <= &x.z() && x.z() <= *e.z_max();
        prop_assert_eq!(e.contains_point(&x), inside);
        prop_assert_eq!(e.is_intersected_by(&x), inside);
    }

    #[test]
    fn envelope_union_covers_both(e in envelope(), f in envelope()) {
        prop_assert_eq!(e.union(&e), e.clone());
        let u = e.union(&f);
        prop_assert!(u.is_intersected_by(&e));
        prop_assert!(u.is_intersected_by(&f));
        prop_assert!(e.is_contained_by(&u) && f.is_contained_by(&u));
    }
}
