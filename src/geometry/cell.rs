use std::slice;

use super::envelope::Envelope;
use super::line_segment::LineSegment;
use super::plane::Plane;
use super::point::Point;
use super::polygon::ConvexPolygon;
use super::polyhedron::ConvexPolyhedron;
use super::rectangle::Rectangle;
use super::tetrahedron::Tetrahedron;
use super::triangle::Triangle;
use super::{Geometry, PlanarFace, Polytope};

impl PlanarFace for Triangle {
    fn plane(&self) -> &Plane {
        Triangle::plane(self)
    }

    fn corners(&self) -> &[Point] {
        Triangle::corners(self)
    }

    fn boundary(&self) -> &[LineSegment] {
        self.edges()
    }
}

impl PlanarFace for Rectangle {
    fn plane(&self) -> &Plane {
        Rectangle::plane(self)
    }

    fn corners(&self) -> &[Point] {
        Rectangle::corners(self)
    }

    fn boundary(&self) -> &[LineSegment] {
        self.edges()
    }
}

impl PlanarFace for ConvexPolygon {
    fn plane(&self) -> &Plane {
        ConvexPolygon::plane(self)
    }

    fn corners(&self) -> &[Point] {
        ConvexPolygon::corners(self)
    }

    fn boundary(&self) -> &[LineSegment] {
        self.edges()
    }
}

impl Polytope for LineSegment {
    fn vertices(&self) -> &[Point] {
        self.points()
    }

    fn edges(&self) -> &[LineSegment] {
        slice::from_ref(self)
    }

    fn faces(&self) -> Vec<&dyn PlanarFace> {
        Vec::new()
    }

    fn contains(&self, x: &Point) -> bool {
        self.contains_point(x)
    }

    fn bounds(&self) -> &Envelope {
        self.envelope()
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::LineSegment(self.clone())
    }

    fn as_segment(&self) -> Option<&LineSegment> {
        Some(self)
    }
}

/// Flat cells share one shape: the face is the cell itself.
macro_rules! impl_flat_polytope {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Polytope for $ty {
                fn vertices(&self) -> &[Point] {
                    $ty::corners(self)
                }

                fn edges(&self) -> &[LineSegment] {
                    $ty::edges(self)
                }

                fn faces(&self) -> Vec<&dyn PlanarFace> {
                    vec![self as &dyn PlanarFace]
                }

                fn contains(&self, x: &Point) -> bool {
                    self.contains_point(x)
                }

                fn bounds(&self) -> &Envelope {
                    self.envelope()
                }

                fn to_geometry(&self) -> Geometry {
                    Geometry::$ty(self.clone())
                }
            }
        )+
    };
}

impl_flat_polytope!(Triangle, Rectangle, ConvexPolygon);

impl Polytope for Tetrahedron {
    fn vertices(&self) -> &[Point] {
        Tetrahedron::corners(self)
    }

    fn edges(&self) -> &[LineSegment] {
        Tetrahedron::edges(self)
    }

    fn faces(&self) -> Vec<&dyn PlanarFace> {
        Tetrahedron::faces(self).iter().map(|f| f as &dyn PlanarFace).collect()
    }

    fn contains(&self, x: &Point) -> bool {
        self.contains_point(x)
    }

    fn bounds(&self) -> &Envelope {
        self.envelope()
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::Tetrahedron(self.clone())
    }
}

impl Polytope for ConvexPolyhedron {
    fn vertices(&self) -> &[Point] {
        ConvexPolyhedron::vertices(self)
    }

    fn edges(&self) -> &[LineSegment] {
        ConvexPolyhedron::edges(self)
    }

    fn faces(&self) -> Vec<&dyn PlanarFace> {
        ConvexPolyhedron::faces(self).iter().map(|f| f as &dyn PlanarFace).collect()
    }

    fn contains(&self, x: &Point) -> bool {
        self.contains_point(x)
    }

    fn bounds(&self) -> &Envelope {
        self.envelope()
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::ConvexPolyhedron(self.clone())
    }
}

impl Polytope for Envelope {
    fn vertices(&self) -> &[Point] {
        self.corners()
    }

    fn edges(&self) -> &[LineSegment] {
        Envelope::edges(self)
    }

    fn faces(&self) -> Vec<&dyn PlanarFace> {
        self.rectangles().iter().map(|f| f as &dyn PlanarFace).collect()
    }

    fn contains(&self, x: &Point) -> bool {
        self.contains_point(x)
    }

    fn bounds(&self) -> &Envelope {
        self
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::Envelope(self.clone())
    }

    fn as_envelope(&self) -> Option<&Envelope> {
        Some(self)
    }
}
