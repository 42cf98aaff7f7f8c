//! Oriented planes and the polygon splitting used by the BSP tree

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Classification bitmask. SPANNING == FRONT | BACK.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Plane `normal · p = w` with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and the offset of the
    /// plane along that normal.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Create a plane from three points.
    /// The normal direction follows the right-hand rule: (p2-p1) × (p3-p1)
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1));
        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return Plane {
                normal: Vector3::z(),
                w: p1.z,
            };
        }
        let normal = normal.normalize();
        Plane {
            w: normal.dot(&p1.coords),
            normal,
        }
    }

    /// Best-fit plane of a planar polygon.
    ///
    /// Uses the longest chord and the vertex farthest from it, which stays well
    /// conditioned for slivers produced by repeated splitting, and orients the
    /// result to agree with the Newell normal of the winding.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let n = vertices.len();
        if n < 3 {
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        }
        if n == 3 {
            return Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        }

        let Some((i0, i1, _)) = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| (i, j, (vertices[i].pos - vertices[j].pos).norm_squared()))
            .max_by(|a, b| a.2.total_cmp(&b.2))
        else {
            return Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        };

        let p0 = vertices[i0].pos;
        let dir = vertices[i1].pos - p0;
        let Some((i2, area2)) = vertices
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != i0 && *idx != i1)
            .map(|(idx, v)| (idx, (v.pos - p0).cross(&dir).norm_squared()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            return Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        };
        if area2 < EPSILON * EPSILON {
            // all vertices collinear
            return Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        }

        let mut plane = Self::from_points(p0, vertices[i1].pos, vertices[i2].pos);

        let newell = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + curr.pos.coords.cross(&next.pos.coords)
            });
        if plane.normal.dot(&newell) < 0.0 {
            plane.flip();
        }
        plane
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and offset)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of `point` from the plane.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as FRONT, BACK or COPLANAR within [`EPSILON`].
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Bitwise OR of the classification of every vertex.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Spanning polygons are cut along the plane; the pieces keep the parent's
    /// plane so that coplanar fragments stay exactly coplanar.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> (
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
    ) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(n + 1);
                let mut split_back = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new);
                            split_back.push(vertex_new);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at_z(z: Real) -> Polygon<()> {
        Polygon::new(
            vec![
                Vertex::new(Point3::new(-1.0, -1.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, -1.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, 1.0, z), Vector3::z()),
                Vertex::new(Point3::new(-1.0, 1.0, z), Vector3::z()),
            ],
            None,
        )
    }

    #[test]
    fn from_vertices_follows_winding() {
        let plane = Plane::from_vertices(&square_at_z(2.0).vertices);
        assert!((plane.normal - Vector3::z()).norm() < 1e-12);
        assert!((plane.w - 2.0).abs() < 1e-12);
    }

    #[test]
    fn split_spanning_square() {
        let plane = Plane::from_normal(Vector3::x(), 0.0);
        let (cf, cb, front, back) = plane.split_polygon(&square_at_z(0.0));
        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        assert!(front[0].vertices.iter().all(|v| v.pos.x >= -EPSILON));
        assert!(back[0].vertices.iter().all(|v| v.pos.x <= EPSILON));
    }

    #[test]
    fn coplanar_goes_by_facing() {
        let mut plane = Plane::from_normal(Vector3::z(), 0.0);
        let (cf, cb, _, _) = plane.split_polygon(&square_at_z(0.0));
        assert_eq!((cf.len(), cb.len()), (1, 0));
        plane.flip();
        let (cf, cb, _, _) = plane.split_polygon(&square_at_z(0.0));
        assert_eq!((cf.len(), cb.len()), (0, 1));
    }
}
