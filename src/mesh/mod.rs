//! `Mesh` struct and implementations of the `CSG` trait for `Mesh`

use crate::float_types::{
    EPSILON, Real,
    parry3d::{
        bounding_volume::{Aabb, BoundingVolume},
        query::{Ray, RayCast},
        shape::Triangle,
    },
};
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon, vertex::Vertex};
use crate::traits::CSG;
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};
use std::{fmt::Debug, sync::OnceLock};
use tracing::trace;

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed polygon soup describing a solid.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        Mesh {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        polys
            .iter()
            .cloned()
            .partition(|p| p.bounding_box().intersects(other_bb))
    }

    /// Helper to collect all vertices from the mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(move |triangle| {
                    Polygon::with_plane(
                        triangle.to_vec(),
                        poly.plane.clone(),
                        poly.metadata.clone(),
                    )
                })
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles, self.metadata.clone())
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Only meaningful for closed meshes with outward winding; an inverted
    /// mesh yields a negative value.
    pub fn volume(&self) -> Real {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Total surface area.
    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Casts a ray defined by `origin` + t * `direction` against all triangles
    /// and returns a list of (intersection_point, distance),
    /// sorted by ascending distance.
    pub fn ray_intersections(
        &self,
        origin: &Point3<Real>,
        direction: &Vector3<Real>,
    ) -> Vec<(Point3<Real>, Real)> {
        let ray = Ray::new(*origin, *direction);
        let iso = Isometry3::identity();

        let mut hits: Vec<(Point3<Real>, Real)> = self
            .polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .filter_map(|[a, b, c]| {
                Triangle::new(a.pos, b.pos, c.pos)
                    .cast_ray_and_get_normal(&iso, &ray, Real::MAX, true)
                    .map(|hit| (ray.point_at(hit.time_of_impact), hit.time_of_impact))
            })
            .collect();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        // a ray through a shared edge reports the same hit once per triangle
        hits.dedup_by(|a, b| (a.1 - b.1).abs() < EPSILON);
        hits
    }

    /// Parity test: is `point` inside this closed mesh?
    ///
    /// The ray direction is off-axis so it does not graze the
    /// axis-aligned edges that dominate part geometry.
    pub fn contains_vertex(&self, point: &Point3<Real>) -> bool {
        let direction = Vector3::new(0.312_7, 0.894_1, 0.320_9);
        self.ray_intersections(point, &direction).len() % 2 == 1
    }

    /// Union of every mesh in `meshes`, left to right.
    pub fn union_all<'a, I>(meshes: I) -> Mesh<S>
    where
        I: IntoIterator<Item = &'a Mesh<S>>,
        S: 'a,
    {
        meshes
            .into_iter()
            .fold(Mesh::new(), |acc, mesh| acc.union(mesh))
    }

    /// Subtract every mesh in `tools` from `self`, left to right.
    pub fn difference_all<'a, I>(&self, tools: I) -> Mesh<S>
    where
        I: IntoIterator<Item = &'a Mesh<S>>,
        S: 'a,
    {
        tools
            .into_iter()
            .fold(self.clone(), |acc, tool| acc.difference(tool))
    }
}

fn flipped<S: Clone>(mut polygons: Vec<Polygon<S>>) -> Vec<Polygon<S>> {
    polygons.iter_mut().for_each(Polygon::flip);
    polygons
}

impl<S: Clone + Send + Sync + Debug> CSG for Mesh<S> {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh<S>) -> Mesh<S> {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        // faces clear of the other operand's box are outside it and pass through;
        // both clipping trees still hold every face
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let a = Node::from_polygons(&self.polygons);
        let b = Node::from_polygons(&other.polygons);

        let a_outside = b.clip_polygons(&a_clip);
        // a second pass with flipped faces drops b faces coplanar with and
        // facing the same way as faces of a
        let b_outside = flipped(a.clip_polygons(&flipped(a.clip_polygons(&b_clip))));

        let mut final_polys = a_outside;
        final_polys.extend(b_outside);
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);
        trace!(
            lhs = self.polygons.len(),
            rhs = other.polygons.len(),
            out = final_polys.len(),
            "union"
        );

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh<S>) -> Mesh<S> {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }

        // faces of self clear of other pass through unchanged; faces of other
        // clear of self lie outside self and never reach the result
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, _) = Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a_inverted = Node::from_polygons(&self.polygons);
        a_inverted.invert();
        let b = Node::from_polygons(&other.polygons);

        let a_outside = flipped(b.clip_polygons(&flipped(a_clip)));
        // the cavity walls: faces of other inside self, turned to face inward
        let b_inside = a_inverted.clip_polygons(&b_clip);
        let b_walls = a_inverted.clip_polygons(&flipped(b_inside));

        let mut final_polys = a_outside;
        final_polys.extend(b_walls);
        final_polys.extend(a_passthru);
        trace!(
            lhs = self.polygons.len(),
            rhs = other.polygons.len(),
            out = final_polys.len(),
            "difference"
        );

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Mesh representing intersection of the two Meshes.
    ///
    /// ```text
    /// let c = a.intersection(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Mesh<S>) -> Mesh<S> {
        if self.is_empty() || other.is_empty() {
            return Mesh::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Mesh {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Space in exactly one of the two meshes.
    fn xor(&self, other: &Mesh<S>) -> Mesh<S> {
        let a_sub_b = self.difference(other);
        let b_sub_a = other.difference(self);
        a_sub_b.union(&b_sub_a)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        // a singular matrix (zero scale) has no inverse; fall back to the matrix itself
        let normal_matrix = mat.try_inverse().map_or(*mat, |inv| inv.transpose());
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                vert.pos = mat.transform_point(&vert.pos);
                let normal = normal_matrix.transform_vector(&vert.normal);
                vert.normal = normal.try_normalize(Real::EPSILON).unwrap_or(normal);
            }
            poly.plane = Plane::from_vertices(&poly.vertices);
            poly.bounding_box = OnceLock::new();
        }

        mesh.bounding_box = OnceLock::new();
        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            if self.polygons.is_empty() {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            self.polygons
                .iter()
                .map(Polygon::bounding_box)
                .reduce(|a, b| a.merged(&b))
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh<S> {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_volume_and_area() {
        let cube: Mesh<()> = Mesh::cube(2.0, None);
        assert!((cube.volume() - 8.0).abs() < 1e-9);
        assert!((cube.surface_area() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn empty_operands() {
        let cube: Mesh<()> = Mesh::cube(1.0, None);
        let empty: Mesh<()> = Mesh::new();
        assert_eq!(empty.union(&cube).polygons.len(), cube.polygons.len());
        assert_eq!(cube.difference(&empty).polygons.len(), cube.polygons.len());
        assert!(cube.intersection(&empty).is_empty());
    }

    #[test]
    fn contains_vertex_parity() {
        let cube: Mesh<()> = Mesh::cube(6.0, None);
        assert!(cube.contains_vertex(&Point3::new(3.0, 3.0, 3.0)));
        assert!(cube.contains_vertex(&Point3::new(1.0, 2.0, 5.9)));
        assert!(!cube.contains_vertex(&Point3::new(3.0, 3.0, 7.0)));
        assert!(!cube.contains_vertex(&Point3::new(3.0, 3.0, -6.0)));
    }

    #[test]
    fn mirror_keeps_outward_orientation() {
        let cube: Mesh<()> = Mesh::cube(1.0, None).translate(1.0, 0.0, 0.0);
        let mirrored = cube.mirror(Plane::from_normal(Vector3::x(), 0.0));
        let bb = mirrored.bounding_box();
        assert!((bb.mins.x + 2.0).abs() < 1e-12);
        assert!((bb.maxs.x + 1.0).abs() < 1e-12);
        assert!((mirrored.volume() - 1.0).abs() < 1e-9);
    }
}
