//! 3D primitives as `Mesh`s

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Axis-aligned box with one corner at the origin spanning
    /// `[0, width] × [0, length] × [0, height]`.
    ///
    /// ```text
    ///     7-------6
    ///    /|      /|
    ///   4-------5 |
    ///   | |     | |
    ///   | 3-----|-2
    ///   |/      |/
    ///   0-------1
    /// ```
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Mesh<S> {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];

        // (indices, normal) with counter-clockwise winding seen from outside
        let faces: [([usize; 4], Vector3<Real>); 6] = [
            ([0, 3, 2, 1], -Vector3::z()),
            ([4, 5, 6, 7], Vector3::z()),
            ([0, 1, 5, 4], -Vector3::y()),
            ([3, 7, 6, 2], Vector3::y()),
            ([0, 4, 7, 3], -Vector3::x()),
            ([1, 2, 6, 5], Vector3::x()),
        ];

        let polygons: Vec<Polygon<S>> = faces
            .iter()
            .map(|(indices, normal)| {
                let vertices = indices
                    .iter()
                    .map(|&i| Vertex::new(corners[i], *normal))
                    .collect();
                Polygon::new(vertices, metadata.clone())
            })
            .collect();

        Mesh::from_polygons(&polygons, metadata)
    }

    pub fn cube(width: Real, metadata: Option<S>) -> Mesh<S> {
        Self::cuboid(width, width, width, metadata)
    }

    /// UV sphere centred at the origin with its poles on the Z axis.
    ///
    /// `segments` is the number of longitudinal slices, `stacks` the number of
    /// latitudinal bands. Cap bands are triangles; every other band is made of
    /// planar isosceles trapezoids.
    pub fn sphere(radius: Real, segments: usize, stacks: usize, metadata: Option<S>) -> Mesh<S> {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let point = |i: usize, j: usize| {
            let theta = TAU * (i % segments) as Real / segments as Real;
            let phi = PI * j as Real / stacks as Real;
            let normal = Vector3::new(theta.cos() * phi.sin(), theta.sin() * phi.sin(), phi.cos());
            Vertex::new(Point3::from(normal * radius), normal)
        };

        let mut polygons = Vec::with_capacity(segments * stacks);
        for i in 0..segments {
            for j in 0..stacks {
                let vertices = if j == 0 {
                    vec![point(i, 0), point(i, 1), point(i + 1, 1)]
                } else if j + 1 == stacks {
                    vec![point(i, j), point(i, stacks), point(i + 1, j)]
                } else {
                    vec![point(i, j), point(i, j + 1), point(i + 1, j + 1), point(i + 1, j)]
                };
                polygons.push(Polygon::new(vertices, metadata.clone()));
            }
        }

        Mesh::from_polygons(&polygons, metadata)
    }

    /// Right circular cylinder along +Z from z = 0 to z = `height`.
    pub fn cylinder(radius: Real, height: Real, segments: usize, metadata: Option<S>) -> Mesh<S> {
        Self::frustum(radius, radius, height, segments, metadata)
    }

    /// Truncated cone along +Z: `radius1` at z = 0, `radius2` at z = `height`.
    /// Either radius may be zero to produce a cone.
    pub fn frustum(
        radius1: Real,
        radius2: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Mesh<S> {
        let segments = segments.max(3);
        let ring = |radius: Real, z: Real| -> Vec<Point3<Real>> {
            (0..segments)
                .map(|i| {
                    let angle = TAU * i as Real / segments as Real;
                    Point3::new(radius * angle.cos(), radius * angle.sin(), z)
                })
                .collect()
        };
        let bottom = ring(radius1, 0.0);
        let top = ring(radius2, height);

        let mut polygons = Vec::with_capacity(segments + 2);

        if radius1 > EPSILON {
            let cap = bottom
                .iter()
                .rev()
                .map(|p| Vertex::new(*p, -Vector3::z()))
                .collect();
            polygons.push(Polygon::new(cap, metadata.clone()));
        }
        if radius2 > EPSILON {
            let cap = top.iter().map(|p| Vertex::new(*p, Vector3::z())).collect();
            polygons.push(Polygon::new(cap, metadata.clone()));
        }

        for i in 0..segments {
            let j = (i + 1) % segments;
            let mid = (bottom[i].coords + bottom[j].coords + top[i].coords + top[j].coords) * 0.25;
            let side_normal = Vector3::new(mid.x, mid.y, 0.0)
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector3::x);
            let mut vertices = vec![Vertex::new(bottom[i], side_normal)];
            if radius1 > EPSILON {
                vertices.push(Vertex::new(bottom[j], side_normal));
            }
            vertices.push(Vertex::new(top[j], side_normal));
            if radius2 > EPSILON {
                vertices.push(Vertex::new(top[i], side_normal));
            }
            polygons.push(Polygon::new(vertices, metadata.clone()));
        }

        Mesh::from_polygons(&polygons, metadata)
    }

    /// Creates a polyhedron from raw vertex data and face indices.
    ///
    /// Faces are wound counter-clockwise seen from outside; non-triangular
    /// faces are fan-triangulated so they need only be star-shaped from their
    /// first vertex.
    ///
    /// ```
    /// # use fixturegen::mesh::Mesh;
    /// let pts = &[
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [1.0, 1.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.5, 0.5, 1.0],
    /// ];
    /// let faces: &[&[usize]] = &[&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]];
    /// let pyramid = Mesh::<()>::polyhedron(pts, faces, None).unwrap();
    /// assert_eq!(pyramid.polygons.len(), 6);
    /// ```
    pub fn polyhedron(
        points: &[[Real; 3]],
        faces: &[&[usize]],
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        let mut polygons = Vec::with_capacity(faces.len());
        for face in faces {
            if let Some(&index) = face.iter().find(|&&idx| idx >= points.len()) {
                return Err(ValidationError::IndexOutOfRange {
                    index,
                    len: points.len(),
                });
            }
            let Some(&first) = face.first() else {
                continue;
            };
            if face.len() < 3 {
                let [x, y, z] = points[first];
                return Err(ValidationError::TooFewPoints(Point3::new(x, y, z)));
            }
            let pos = |idx: usize| {
                let [x, y, z] = points[idx];
                Point3::new(x, y, z)
            };
            for pair in face[1..].windows(2) {
                let tri = vec![
                    Vertex::new(pos(first), Vector3::zeros()),
                    Vertex::new(pos(pair[0]), Vector3::zeros()),
                    Vertex::new(pos(pair[1]), Vector3::zeros()),
                ];
                let mut polygon = Polygon::new(tri, metadata.clone());
                polygon.set_new_normal();
                polygons.push(polygon);
            }
        }
        Ok(Mesh::from_polygons(&polygons, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CSG;

    #[test]
    fn sphere_is_closed_and_round() {
        let sphere: Mesh<()> = Mesh::sphere(1.0, 32, 16, None);
        let bb = sphere.bounding_box();
        assert!((bb.maxs.z - 1.0).abs() < 1e-9);
        assert!((bb.mins.z + 1.0).abs() < 1e-9);
        let exact = 4.0 / 3.0 * PI;
        assert!(sphere.volume() > 0.9 * exact && sphere.volume() < exact);
        for poly in &sphere.polygons {
            assert!(poly.vertices.len() == 3 || poly.vertices.len() == 4);
        }
    }

    #[test]
    fn cylinder_volume() {
        let cyl: Mesh<()> = Mesh::cylinder(2.0, 5.0, 64, None);
        let exact = PI * 4.0 * 5.0;
        assert!((cyl.volume() - exact).abs() / exact < 0.01);
    }

    #[test]
    fn cone_has_no_top_cap() {
        let cone: Mesh<()> = Mesh::frustum(1.0, 0.0, 2.0, 8, None);
        // bottom cap + 8 triangular sides
        assert_eq!(cone.polygons.len(), 9);
        assert!(cone.volume() > 0.0);
    }

    #[test]
    fn polyhedron_rejects_bad_index() {
        let pts = &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let faces: &[&[usize]] = &[&[0, 1, 5]];
        let err = Mesh::<()>::polyhedron(pts, faces, None).unwrap_err();
        assert_eq!(err, ValidationError::IndexOutOfRange { index: 5, len: 3 });
    }
}
