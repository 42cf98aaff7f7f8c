//! Turning `Sketch` profiles into solids: linear extrusion, revolution and lofting

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::sketch::Sketch;
use crate::traits::CSG;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use tracing::trace;

/// Sketch-local axis a profile is revolved about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevolveAxis {
    /// Radius is the local y coordinate, the axis runs along local x.
    X,
    /// Radius is the local x coordinate, the axis runs along local y.
    Y,
}

impl RevolveAxis {
    /// Distance of a profile point from the axis (signed).
    fn radial(self, c: Coord<Real>) -> Real {
        match self {
            RevolveAxis::X => c.y,
            RevolveAxis::Y => c.x,
        }
    }

    /// Position of profile point `c` swept by `theta` radians, right-hand
    /// rule about the positive axis.
    fn sweep(self, c: Coord<Real>, theta: Real) -> Point3<Real> {
        let (sin, cos) = theta.sin_cos();
        match self {
            RevolveAxis::X => Point3::new(c.x, c.y * cos, c.y * sin),
            RevolveAxis::Y => Point3::new(c.x * cos, c.y, -c.x * sin),
        }
    }
}

/// Ear-cut a region into counter-clockwise triangles, dropping slivers.
fn cap_triangles(exterior: &[Coord<Real>], holes: &[Vec<Coord<Real>>]) -> Vec<[Coord<Real>; 3]> {
    let polygon = GeoPolygon::new(
        LineString::new(exterior.to_vec()),
        holes.iter().map(|h| LineString::new(h.clone())).collect(),
    );
    let raw = polygon.earcut_triangles_raw();
    let at = |i: usize| Coord {
        x: raw.vertices[2 * i],
        y: raw.vertices[2 * i + 1],
    };

    raw.triangle_indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let (a, b, c) = (at(tri[0]), at(tri[1]), at(tri[2]));
            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            if cross.abs() < EPSILON * EPSILON {
                None
            } else if cross > 0.0 {
                Some([a, b, c])
            } else {
                Some([a, c, b])
            }
        })
        .collect()
}

/// Push a planar face, collapsing repeated points (vertices on a revolve
/// axis, zero-length edges). Faces left with fewer than three points vanish.
fn push_face<S: Clone + Send + Sync + Debug>(
    polygons: &mut Vec<Polygon<S>>,
    mut points: Vec<Point3<Real>>,
    metadata: &Option<S>,
) {
    points.dedup_by(|a, b| (*a - *b).norm() < EPSILON);
    while points.len() > 1
        && points
            .first()
            .zip(points.last())
            .is_some_and(|(a, b)| (a - b).norm() < EPSILON)
    {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    let vertices = points
        .into_iter()
        .map(|p| Vertex::new(p, Vector3::zeros()))
        .collect();
    let mut polygon = Polygon::new(vertices, metadata.clone());
    polygon.set_new_normal();
    polygons.push(polygon);
}

fn lift(c: Coord<Real>, offset: &Vector3<Real>) -> Point3<Real> {
    Point3::new(c.x, c.y, 0.0) + offset
}

impl<S: Clone + Send + Sync + Debug> Sketch<S> {
    /// Extrude along +Z from z = 0 to z = `height`. A negative height
    /// extrudes downward.
    pub fn extrude(&self, height: Real) -> Mesh<S> {
        self.extrude_vector(Vector3::new(0.0, 0.0, height))
    }

    /// Extrude `height` to both sides of the sketch plane, from `-height`
    /// to `+height`.
    pub fn extrude_symmetric(&self, height: Real) -> Mesh<S> {
        self.extrude(2.0 * height).translate(0.0, 0.0, -height)
    }

    /// Linear sweep of the profile by `direction`. The direction must leave
    /// the XY plane; otherwise the result is empty.
    pub fn extrude_vector(&self, direction: Vector3<Real>) -> Mesh<S> {
        if direction.z.abs() < EPSILON {
            return Mesh::new();
        }
        let zero = Vector3::zeros();
        let mut polygons = Vec::new();

        for (exterior, holes) in self.rings() {
            for [a, b, c] in cap_triangles(&exterior, &holes) {
                push_face(
                    &mut polygons,
                    vec![lift(a, &zero), lift(c, &zero), lift(b, &zero)],
                    &self.metadata,
                );
                push_face(
                    &mut polygons,
                    vec![lift(a, &direction), lift(b, &direction), lift(c, &direction)],
                    &self.metadata,
                );
            }
            for ring in std::iter::once(&exterior).chain(holes.iter()) {
                for (i, &p) in ring.iter().enumerate() {
                    let q = ring[(i + 1) % ring.len()];
                    push_face(
                        &mut polygons,
                        vec![
                            lift(p, &zero),
                            lift(q, &zero),
                            lift(q, &direction),
                            lift(p, &direction),
                        ],
                        &self.metadata,
                    );
                }
            }
        }

        trace!(polygons = polygons.len(), "extrude");
        let mesh = Mesh::from_polygons(&polygons, self.metadata.clone());
        if direction.z < 0.0 { mesh.inverse() } else { mesh }
    }

    /// Revolve about the sketch-local Y axis. See [`Sketch::revolve_about`].
    pub fn revolve(&self, angle_degs: Real, segments: usize) -> Result<Mesh<S>, ValidationError> {
        self.revolve_about(RevolveAxis::Y, angle_degs, segments)
    }

    /// Sweep the profile `angle_degs` about a sketch-local axis using
    /// `segments` steps. A full turn closes on itself; a partial sweep is
    /// closed with the profile at both ends.
    ///
    /// The profile must stay on one side of the axis; points on the axis
    /// are allowed.
    pub fn revolve_about(
        &self,
        axis: RevolveAxis,
        angle_degs: Real,
        segments: usize,
    ) -> Result<Mesh<S>, ValidationError> {
        if !(angle_degs > 0.0 && angle_degs <= 360.0) {
            return Err(ValidationError::InvalidRevolveAngle(angle_degs));
        }
        let full = (angle_degs - 360.0).abs() < EPSILON;
        let min = if full { 3 } else { 1 };
        if segments < min {
            return Err(ValidationError::TooFewSegments {
                operation: "revolve",
                min,
                got: segments,
            });
        }

        let regions = self.rings();
        if let Some(r) = regions
            .iter()
            .flat_map(|(ext, holes)| ext.iter().chain(holes.iter().flatten()))
            .map(|&c| axis.radial(c))
            .find(|&r| r < -EPSILON)
        {
            return Err(ValidationError::ProfileCrossesAxis(r));
        }

        let sweep = angle_degs.to_radians();
        // every step angle is computed from its index so a full turn
        // lands exactly on the first profile again
        let theta = |k: usize| {
            if full && k == segments {
                0.0
            } else {
                sweep * k as Real / segments as Real
            }
        };

        let mut polygons = Vec::new();
        for (exterior, holes) in &regions {
            for ring in std::iter::once(exterior).chain(holes.iter()) {
                for (i, &p) in ring.iter().enumerate() {
                    let q = ring[(i + 1) % ring.len()];
                    for k in 0..segments {
                        let (t0, t1) = (theta(k), theta(k + 1));
                        let face = match axis {
                            RevolveAxis::X => vec![
                                axis.sweep(p, t0),
                                axis.sweep(q, t0),
                                axis.sweep(q, t1),
                                axis.sweep(p, t1),
                            ],
                            RevolveAxis::Y => vec![
                                axis.sweep(p, t0),
                                axis.sweep(p, t1),
                                axis.sweep(q, t1),
                                axis.sweep(q, t0),
                            ],
                        };
                        push_face(&mut polygons, face, &self.metadata);
                    }
                }
            }

            if !full {
                for [a, b, c] in cap_triangles(exterior, holes) {
                    let start = [axis.sweep(a, 0.0), axis.sweep(b, 0.0), axis.sweep(c, 0.0)];
                    let end = [
                        axis.sweep(a, sweep),
                        axis.sweep(b, sweep),
                        axis.sweep(c, sweep),
                    ];
                    let (start, end) = match axis {
                        // start cap faces +Z, against the sweep direction
                        RevolveAxis::Y => (
                            vec![start[0], start[1], start[2]],
                            vec![end[0], end[2], end[1]],
                        ),
                        RevolveAxis::X => (
                            vec![start[0], start[2], start[1]],
                            vec![end[0], end[1], end[2]],
                        ),
                    };
                    push_face(&mut polygons, start, &self.metadata);
                    push_face(&mut polygons, end, &self.metadata);
                }
            }
        }

        trace!(polygons = polygons.len(), angle_degs, "revolve");
        Ok(Mesh::from_polygons(&polygons, self.metadata.clone()))
    }

    /// Loft from this profile at z = 0 to `top` at z = `height`.
    ///
    /// Both profiles must be single regions without holes whose outlines
    /// have the same number of vertices; vertex `i` of the bottom joins
    /// vertex `i` of the top. Side faces are triangles so non-planar
    /// quads are never produced.
    pub fn loft(&self, top: &Sketch<S>, height: Real) -> Result<Mesh<S>, ValidationError> {
        let bottom_rings = self.rings();
        let top_rings = top.rings();
        let (bottom, top_ring) = match (bottom_rings.as_slice(), top_rings.as_slice()) {
            ([(b, bh)], [(t, th)]) if bh.is_empty() && th.is_empty() => (b, t),
            _ => {
                return Err(ValidationError::Other(
                    "loft: profiles must be single regions without holes".into(),
                ));
            },
        };
        if bottom.len() != top_ring.len() {
            return Err(ValidationError::MismatchedProfiles {
                bottom: bottom.len(),
                top: top_ring.len(),
            });
        }
        if height.abs() < EPSILON {
            return Ok(Mesh::new());
        }

        let zero = Vector3::zeros();
        let up = Vector3::new(0.0, 0.0, height);
        let mut polygons = Vec::new();

        for [a, b, c] in cap_triangles(bottom, &[]) {
            push_face(
                &mut polygons,
                vec![lift(a, &zero), lift(c, &zero), lift(b, &zero)],
                &self.metadata,
            );
        }
        for [a, b, c] in cap_triangles(top_ring, &[]) {
            push_face(
                &mut polygons,
                vec![lift(a, &up), lift(b, &up), lift(c, &up)],
                &self.metadata,
            );
        }
        for i in 0..bottom.len() {
            let j = (i + 1) % bottom.len();
            let (b0, b1) = (lift(bottom[i], &zero), lift(bottom[j], &zero));
            let (t0, t1) = (lift(top_ring[i], &up), lift(top_ring[j], &up));
            push_face(&mut polygons, vec![b0, b1, t1], &self.metadata);
            push_face(&mut polygons, vec![b0, t1, t0], &self.metadata);
        }

        let mesh = Mesh::from_polygons(&polygons, self.metadata.clone());
        Ok(if height < 0.0 { mesh.inverse() } else { mesh })
    }
}
