//! `Intersect` and `Distance` for every pair of geometry types.

use crate::math::Rational;
use crate::operations::{self, AsOperand, Operand};

use super::envelope::Envelope;
use super::line::Line;
use super::line_segment::LineSegment;
use super::plane::Plane;
use super::point::Point;
use super::polygon::ConvexPolygon;
use super::polyhedron::ConvexPolyhedron;
use super::rectangle::Rectangle;
use super::tetrahedron::Tetrahedron;
use super::triangle::Triangle;
use super::{Distance, Geometry, Intersect};

impl AsOperand for Point {
    fn operand(&self) -> Operand<'_> {
        Operand::Point(self)
    }
}

impl AsOperand for Line {
    fn operand(&self) -> Operand<'_> {
        Operand::Line(self)
    }
}

impl AsOperand for Plane {
    fn operand(&self) -> Operand<'_> {
        Operand::Plane(self)
    }
}

macro_rules! impl_cell_operand {
    ($($ty:ty),+) => {
        $(
            impl AsOperand for $ty {
                fn operand(&self) -> Operand<'_> {
                    Operand::Cell(self)
                }
            }
        )+
    };
}

impl_cell_operand!(LineSegment, Triangle, Rectangle, Tetrahedron, ConvexPolygon, ConvexPolyhedron, Envelope);

impl AsOperand for Geometry {
    fn operand(&self) -> Operand<'_> {
        match self {
            Self::Point(g) => g.operand(),
            Self::Line(g) => g.operand(),
            Self::Plane(g) => g.operand(),
            Self::LineSegment(g) => g.operand(),
            Self::Triangle(g) => g.operand(),
            Self::Rectangle(g) => g.operand(),
            Self::Tetrahedron(g) => g.operand(),
            Self::ConvexPolygon(g) => g.operand(),
            Self::ConvexPolyhedron(g) => g.operand(),
            Self::Envelope(g) => g.operand(),
        }
    }
}

macro_rules! impl_pairs {
    ($lhs:ty => $($rhs:ty),+) => {
        $(
            impl Intersect<$rhs> for $lhs {
                fn intersection(&self, other: &$rhs) -> Option<Geometry> {
                    operations::intersection(self.operand(), other.operand())
                }
            }

            impl Distance<$rhs> for $lhs {
                fn distance_squared(&self, other: &$rhs) -> Rational {
                    operations::distance_squared(self.operand(), other.operand())
                }
            }
        )+
    };
}

macro_rules! impl_all_pairs {
    ($($lhs:ty),+) => {
        $(
            impl_pairs!($lhs => Point, Line, LineSegment, Plane, Triangle, Rectangle, Tetrahedron,
                ConvexPolygon, ConvexPolyhedron, Envelope, Geometry);
        )+
    };
}

impl_all_pairs!(
    Point,
    Line,
    LineSegment,
    Plane,
    Triangle,
    Rectangle,
    Tetrahedron,
    ConvexPolygon,
    ConvexPolyhedron,
    Envelope,
    Geometry
);
