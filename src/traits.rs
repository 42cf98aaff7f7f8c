use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real};
use crate::mesh::plane::Plane;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Unit, Vector3};

/// Boolean operations + transformations
pub trait CSG: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    fn xor(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);
    fn inverse(&self) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin.
    fn center(&self) -> Self {
        let aabb = self.bounding_box();
        let center = nalgebra::center(&aabb.mins, &aabb.maxs);
        self.translate_vector(-center.coords)
    }

    /// Translates the object so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }

    /// Rotates by x_degrees, then y_degrees, then z_degrees about the world axes.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Rotate `degrees` about the line through `origin` along `axis`
    /// (right-hand rule). A zero axis leaves the object unchanged.
    fn rotate_about_axis(&self, origin: Point3<Real>, axis: Vector3<Real>, degrees: Real) -> Self {
        let Some(axis) = Unit::try_new(axis, EPSILON) else {
            return self.clone();
        };
        let rotation = Rotation3::from_axis_angle(&axis, degrees.to_radians()).to_homogeneous();
        let to_origin = Translation3::from(-origin.coords).to_homogeneous();
        let back = Translation3::from(origin.coords).to_homogeneous();
        self.transform(&(back * rotation * to_origin))
    }

    /// Scales by scale_x, scale_y, scale_z
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Reflect (mirror) about `plane`.
    ///
    /// The plane is specified by:
    ///   `plane.normal` = the plane’s normal vector (need not be unit),
    ///   `plane.w`      = the dot-product with that normal for points on the plane (offset).
    ///
    /// Polygons are flipped after the reflection so the result keeps outward winding.
    fn mirror(&self, plane: Plane) -> Self {
        let len = plane.normal().norm();
        if len.abs() < EPSILON {
            return self.clone();
        }

        let n = plane.normal() / len;
        let w = plane.offset() / len;

        // push the plane to the origin, reflect with I - 2nnᵀ, pull it back
        let offset = n * w;
        let t1 = Translation3::from(-offset).to_homogeneous();
        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);
        let t2 = Translation3::from(offset).to_homogeneous();

        self.transform(&(t2 * reflect_4 * t1)).inverse()
    }
}
