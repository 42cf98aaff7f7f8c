//! Convex planar polygons, the unit of work for the BSP booleans

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// A convex polygon with a cached supporting plane.
///
/// Every constructor in the crate emits convex polygons (triangles from
/// tessellation or earcut, quads from extrusion walls), and splitting a convex
/// polygon by a plane keeps it convex, so fan triangulation is always valid.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub bounding_box: OnceLock<Aabb>,
    pub metadata: Option<S>,
}

impl<S: Clone> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.plane == other.plane
    }
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon, computing its plane from the vertices.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        let plane = Plane::from_vertices(&vertices);
        Self::with_plane(vertices, plane, metadata)
    }

    /// Create a polygon that lies on a known plane (used when splitting).
    pub fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Reverse winding, vertex normals and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan triangulation.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        let anchor = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|pair| [anchor, pair[0], pair[1]])
            .collect()
    }

    /// Axis-aligned bounds of this polygon, computed once.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Recompute the plane from the vertices and write its normal to every vertex.
    pub fn set_new_normal(&mut self) {
        self.plane = Plane::from_vertices(&self.vertices);
        let normal = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }

    /// Area via the cross-product sum projected on the plane normal.
    pub fn area(&self) -> Real {
        let sum = self
            .vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc: Vector3<Real>, (a, b)| {
                acc + a.pos.coords.cross(&b.pos.coords)
            });
        0.5 * sum.dot(&self.plane.normal()).abs()
    }
}
