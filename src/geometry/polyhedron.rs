use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use num_traits::{Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::math::hull::{hull_facets, planar_hull};
use crate::math::{integer, Rational};

use super::envelope::Envelope;
use super::line_segment::LineSegment;
use super::plane::PointPlaneClassification;
use super::point::{hash_point_set, same_point_set, triple_product, Point};
use super::polygon::{spanning_normal, ConvexPolygon};
use super::vector::Vector;

/// A convex polyhedron with outward faces.
#[derive(Debug, Clone)]
pub struct ConvexPolyhedron {
    vertices: Vec<Point>,
    faces: Vec<ConvexPolygon>,
    edges: Vec<LineSegment>,
    envelope: OnceLock<Box<Envelope>>,
}

impl ConvexPolyhedron {
    /// The convex hull of a point set that spans a volume.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the points are coplanar.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if !distinct.contains(p) {
                distinct.push(p.clone());
            }
        }
        let flat = || GeometryError::Degenerate("polyhedron points are coplanar".into());
        let normal = spanning_normal(&distinct).ok_or_else(flat)?;
        let origin = &distinct[0];
        if distinct.iter().all(|x| normal.dot(&origin.vector_to(x)).is_zero()) {
            return Err(flat().into());
        }
        Ok(Self::from_distinct(&distinct))
    }

    /// Builds the hull of distinct points known to span a volume.
    pub(crate) fn from_distinct(points: &[Point]) -> Self {
        let faces: Vec<ConvexPolygon> = hull_facets(points)
            .into_iter()
            .map(|facet| {
                let members: Vec<Point> = facet.members.iter().map(|&i| points[i].clone()).collect();
                ConvexPolygon::from_hull(planar_hull(&members, &facet.normal))
            })
            .collect();

        let mut vertices: Vec<Point> = Vec::new();
        let mut edges: Vec<LineSegment> = Vec::new();
        for face in &faces {
            for c in face.corners() {
                if !vertices.contains(c) {
                    vertices.push(c.clone());
                }
            }
            for e in face.edges() {
                if !edges.contains(e) {
                    edges.push(e.clone());
                }
            }
        }

        Self {
            vertices,
            faces,
            edges,
            envelope: OnceLock::new(),
        }
    }

    /// Returns the strict corners.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Faces, each wound counter-clockwise seen from outside.
    #[must_use]
    pub fn faces(&self) -> &[ConvexPolygon] {
        &self.faces
    }

    /// Returns the edges shared by two faces.
    #[must_use]
    pub fn edges(&self) -> &[LineSegment] {
        &self.edges
    }

    /// Returns the bounding envelope, computed once.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        self.envelope
            .get_or_init(|| Box::new(Envelope::bounding(&self.vertices[0], &self.vertices[1..])))
    }

    /// Volume, exact: tetrahedra fanned from the first vertex.
    #[must_use]
    pub fn volume(&self) -> Rational {
        let apex = &self.vertices[0];
        let six_times: Rational = self
            .faces
            .iter()
            .filter(|f| !f.corners().contains(apex))
            .flat_map(|f| {
                let c = f.corners();
                c[1..]
                    .windows(2)
                    .map(|w| triple_product(&apex.vector_to(&c[0]), &apex.vector_to(&w[0]), &apex.vector_to(&w[1])).abs())
                    .collect::<Vec<_>>()
            })
            .sum();
        six_times / integer(6)
    }

    /// Whether `x` lies in the closed solid.
    #[must_use]
    pub fn contains_point(&self, x: &Point) -> bool {
        self.faces
            .iter()
            .all(|f| f.plane().side(x) != PointPlaneClassification::Front)
    }

    pub(crate) fn translate(&mut self, v: &Vector) {
        for p in &mut self.vertices {
            p.translate(v);
        }
        for f in &mut self.faces {
            f.translate(v);
        }
        for e in &mut self.edges {
            e.translate(v);
        }
        self.envelope = OnceLock::new();
    }
}

impl PartialEq for ConvexPolyhedron {
    fn eq(&self, other: &Self) -> bool {
        same_point_set(&self.vertices, &other.vertices)
    }
}

impl Eq for ConvexPolyhedron {}

impl Hash for ConvexPolyhedron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_point_set(&self.vertices, state);
    }
}
