//! Named sketch planes and local coordinate frames.
//!
//! Parts are easiest to describe the way a machinist would: "on the side
//! face, 50 mm along the arm, tilted 25 degrees". A [`Workplane`] is that
//! frame. Profiles are drawn in its local XY plane, extruded along its
//! local +Z (the plane normal) and then mapped into world space.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::traits::CSG;
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workplane {
    pub origin: Point3<Real>,
    /// Local +X in world coordinates (unit)
    pub x_dir: Vector3<Real>,
    /// Local +Z in world coordinates (unit)
    pub normal: Vector3<Real>,
}

impl Default for Workplane {
    fn default() -> Self {
        Self::xy()
    }
}

impl Workplane {
    /// World XY: local axes coincide with world axes.
    pub fn xy() -> Self {
        Workplane {
            origin: Point3::origin(),
            x_dir: Vector3::x(),
            normal: Vector3::z(),
        }
    }

    /// World YZ: local x is world Y, local y is world Z, normal is world X.
    pub fn yz() -> Self {
        Workplane {
            origin: Point3::origin(),
            x_dir: Vector3::y(),
            normal: Vector3::x(),
        }
    }

    /// World XZ: local x is world X, local y is world Z, normal is world -Y.
    pub fn xz() -> Self {
        Workplane {
            origin: Point3::origin(),
            x_dir: Vector3::x(),
            normal: -Vector3::y(),
        }
    }

    /// Local +Y in world coordinates.
    pub fn y_dir(&self) -> Vector3<Real> {
        self.normal.cross(&self.x_dir)
    }

    /// Map a local vector to world coordinates (no translation).
    pub fn to_world_vector(&self, v: Vector3<Real>) -> Vector3<Real> {
        self.x_dir * v.x + self.y_dir() * v.y + self.normal * v.z
    }

    /// Map a local point to world coordinates.
    pub fn to_world(&self, p: Point3<Real>) -> Point3<Real> {
        self.origin + self.to_world_vector(p.coords)
    }

    /// Move the origin by a vector given in local coordinates.
    pub fn offset(&self, x: Real, y: Real, z: Real) -> Self {
        Workplane {
            origin: self.to_world(Point3::new(x, y, z)),
            ..*self
        }
    }

    /// Rotate the frame about its own axes (degrees, applied X then Y then Z).
    pub fn rotated(&self, rx: Real, ry: Real, rz: Real) -> Self {
        let local = Rotation3::from_axis_angle(&Vector3::z_axis(), rz.to_radians())
            * Rotation3::from_axis_angle(&Vector3::y_axis(), ry.to_radians())
            * Rotation3::from_axis_angle(&Vector3::x_axis(), rx.to_radians());
        Workplane {
            origin: self.origin,
            x_dir: self.to_world_vector(local * Vector3::x()),
            normal: self.to_world_vector(local * Vector3::z()),
        }
    }

    /// Local-to-world homogeneous transform.
    pub fn matrix(&self) -> Matrix4<Real> {
        let y = self.y_dir();
        #[rustfmt::skip]
        let m = Matrix4::new(
            self.x_dir.x, y.x, self.normal.x, self.origin.x,
            self.x_dir.y, y.y, self.normal.y, self.origin.y,
            self.x_dir.z, y.z, self.normal.z, self.origin.z,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Map a mesh built in local coordinates into world space.
    pub fn place<S: Clone + Send + Sync + Debug>(&self, mesh: &Mesh<S>) -> Mesh<S> {
        mesh.transform(&self.matrix())
    }

    /// Extrude `sketch` along the plane normal (negative goes against it).
    pub fn extrude<S: Clone + Send + Sync + Debug>(
        &self,
        sketch: &Sketch<S>,
        height: Real,
    ) -> Mesh<S> {
        self.place(&sketch.extrude(height))
    }

    /// Extrude `sketch` from `-height` to `+height` along the normal.
    pub fn extrude_symmetric<S: Clone + Send + Sync + Debug>(
        &self,
        sketch: &Sketch<S>,
        height: Real,
    ) -> Mesh<S> {
        self.place(&sketch.extrude_symmetric(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn named_planes_are_right_handed() {
        for plane in [Workplane::xy(), Workplane::yz(), Workplane::xz()] {
            assert_relative_eq!(plane.matrix().fixed_view::<3, 3>(0, 0).determinant(), 1.0);
        }
        assert_eq!(Workplane::yz().y_dir(), Vector3::z());
        assert_eq!(Workplane::xz().y_dir(), Vector3::z());
    }

    #[test]
    fn xz_negative_extrusion_runs_along_plus_y() {
        let bar = Workplane::xz().extrude(&Sketch::<()>::rect(2.0, 2.0, None), -50.0);
        let bb = bar.bounding_box();
        assert_relative_eq!(bb.mins.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.y, 50.0, epsilon = 1e-9);
        assert!(bar.volume() > 0.0);
    }

    #[test]
    fn offset_and_rotation_are_local() {
        let plane = Workplane::yz().offset(0.0, 0.0, 5.0);
        assert_eq!(plane.origin, Point3::new(5.0, 0.0, 0.0));

        // local +Z turns towards local -Y, which is world -Z on XZ
        let tilted = Workplane::xz().rotated(90.0, 0.0, 0.0);
        assert_relative_eq!(tilted.x_dir, Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(tilted.normal, -Vector3::z(), epsilon = 1e-12);
    }
}
