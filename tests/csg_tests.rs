mod support;

use approx::assert_relative_eq;
use fixturegen::{
    float_types::{PI, Real},
    mesh::{Mesh, plane::Plane, polygon::Polygon, vertex::Vertex},
    sketch::Sketch,
    traits::CSG,
    workplane::Workplane,
};
use nalgebra::{Point3, Vector3};

use crate::support::{approx_eq, assert_bounds, assert_closed, bounding_box, solid_at};

#[test]
fn from_polygons_and_to_polygons() {
    let poly: Polygon<()> = Polygon::new(
        vec![
            Vertex::new(Point3::origin(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ],
        None,
    );
    let csg: Mesh<()> = Mesh::from_polygons(&[poly], None);
    assert_eq!(csg.polygons.len(), 1);
    assert_eq!(csg.polygons[0].vertices.len(), 3);
}

#[test]
fn union_of_overlapping_cubes() {
    let a: Mesh<()> = Mesh::cube(2.0, None);
    let b: Mesh<()> = Mesh::cube(2.0, None).translate(1.0, 0.0, 0.0);
    let union = a.union(&b);
    assert_bounds(&union, [0.0, 0.0, 0.0, 3.0, 2.0, 2.0], 1e-9);
    assert_relative_eq!(union.volume(), 12.0, epsilon = 1e-6);
}

#[test]
fn difference_leaves_a_cavity() {
    let big: Mesh<()> = Mesh::cube(4.0, None).translate(-2.0, -2.0, -2.0);
    let small: Mesh<()> = Mesh::cube(2.0, None).translate(-1.0, -1.0, -1.0);
    let result = big.difference(&small);
    assert_bounds(&result, [-2.0, -2.0, -2.0, 2.0, 2.0, 2.0], 1e-9);
    assert_relative_eq!(result.volume(), 56.0, epsilon = 1e-6);
    assert!(!solid_at(&result, 0.1, 0.1, 0.1));
    assert!(solid_at(&result, 1.5, 1.5, 1.5));
}

#[test]
fn intersection_of_offset_cubes() {
    let a: Mesh<()> = Mesh::cube(2.0, None);
    let b: Mesh<()> = Mesh::cube(2.0, None).translate(1.0, 0.0, 0.0);
    let result = a.intersection(&b);
    assert_bounds(&result, [1.0, 0.0, 0.0, 2.0, 2.0, 2.0], 1e-9);
    assert_relative_eq!(result.volume(), 4.0, epsilon = 1e-6);
}

#[test]
fn empty_operands() {
    let cube: Mesh<()> = Mesh::cube(1.0, None);
    let empty: Mesh<()> = Mesh::new();
    assert_eq!(cube.union(&empty).polygons.len(), 6);
    assert_eq!(empty.union(&cube).polygons.len(), 6);
    assert_eq!(cube.difference(&empty).polygons.len(), 6);
    assert!(cube.intersection(&empty).is_empty());
}

#[test]
fn sphere_volume_converges() {
    let sphere: Mesh<()> = Mesh::sphere(10.0, 64, 32, None);
    let exact = 4.0 / 3.0 * PI * 1000.0;
    assert!((sphere.volume() - exact).abs() / exact < 0.01);
}

#[test]
fn inverse_flips_volume_sign() {
    let cube: Mesh<()> = Mesh::cube(2.0, None);
    assert_relative_eq!(cube.inverse().volume(), -8.0, epsilon = 1e-9);
}

#[test]
fn mirror_keeps_outward_orientation() {
    let cube: Mesh<()> = Mesh::cube(2.0, None);
    let mirrored = cube.mirror(Plane::from_normal(Vector3::x(), 0.0));
    assert_bounds(&mirrored, [-2.0, 0.0, 0.0, 0.0, 2.0, 2.0], 1e-9);
    assert_relative_eq!(mirrored.volume(), 8.0, epsilon = 1e-9);
}

#[test]
fn rotate_about_an_offset_axis() {
    let cube: Mesh<()> = Mesh::cube(1.0, None);
    let turned = cube.rotate_about_axis(Point3::new(1.0, 0.0, 0.0), Vector3::z(), 90.0);
    assert_bounds(&turned, [0.0, -1.0, 0.0, 1.0, 0.0, 1.0], 1e-9);
}

#[test]
fn sketch_with_hole_extrudes_to_a_tube() {
    let washer: Sketch<()> = Sketch::circle(10.0, 64, None)
        .difference(&Sketch::circle(5.0, 64, None));
    let tube = washer.extrude(4.0);
    let bb = bounding_box(&tube);
    assert!(approx_eq(bb[5], 4.0, 1e-9));
    assert!(!solid_at(&tube, 0.0, 0.0, 2.0));
    assert!(solid_at(&tube, 7.5, 0.0, 2.0));
}

#[test]
fn workplane_extrusion_follows_its_normal() {
    // yz: local x is world Y, local y is world Z, extrusion along +X
    let slab = Workplane::yz().extrude(&Sketch::rectangle(3.0, 2.0, None), 5.0);
    assert_bounds(&slab, [0.0, 0.0, 0.0, 5.0, 3.0, 2.0], 1e-9);

    // xz extrudes along -Y
    let slab = Workplane::xz().extrude(&Sketch::rectangle(3.0, 2.0, None), 5.0);
    assert_bounds(&slab, [0.0, -5.0, 0.0, 3.0, 0.0, 2.0], 1e-9);
}

#[test]
fn revolved_ring_volume() {
    let section: Sketch<()> = Sketch::rectangle(2.0, 4.0, None).translate(8.0, 0.0, 0.0);
    let ring = section.revolve(360.0, 128).expect("valid revolve");
    let exact: Real = PI * (10.0 * 10.0 - 8.0 * 8.0) * 4.0;
    assert!((ring.volume() - exact).abs() / exact < 0.01);
}

#[test]
fn booleans_with_partly_overlapping_operands_stay_closed() {
    // a tilted bar crossed by a long slot whose faces mostly lie outside the bar
    let bar: Mesh<()> = Sketch::rect(16.0, 16.0, None)
        .extrude(60.0)
        .rotate(0.0, 0.0, 45.0)
        .rotate(90.0, 0.0, 0.0);
    let slot = Sketch::stadium(2.0, 6.5, 32, None).extrude_symmetric(40.0);

    let cut = bar.difference(&slot);
    assert_closed(&cut, "bar minus slot");
    assert!(cut.volume() < bar.volume());

    let joined = bar.union(&slot);
    assert_closed(&joined, "bar plus slot");
    assert!(joined.volume() > bar.volume());

    let sphere: Mesh<()> = Mesh::sphere(10.0, 32, 16, None);
    let post = Sketch::circle(3.0, 32, None).extrude(30.0).translate(4.0, 0.0, -5.0);
    assert_closed(&sphere.difference(&post), "sphere minus post");
    assert_closed(&sphere.union(&post), "sphere plus post");
    assert_closed(&sphere.intersection(&post), "sphere and post");
}

#[test]
fn chained_helpers_match_folded_booleans() {
    let base: Mesh<()> = Mesh::cube(10.0, None);
    let a: Mesh<()> = Mesh::cube(2.0, None).translate(-1.0, 4.0, 4.0);
    let b: Mesh<()> = Mesh::cube(2.0, None).translate(9.0, 4.0, 4.0);

    let cut = base.difference_all([&a, &b]);
    assert_relative_eq!(cut.volume(), 1000.0 - 8.0, epsilon = 1e-6);

    let joined = Mesh::union_all([&base, &a, &b]);
    assert_relative_eq!(joined.volume(), 1000.0 + 8.0, epsilon = 1e-6);
    assert_bounds(&joined, [-1.0, 0.0, 0.0, 11.0, 10.0, 10.0], 1e-9);
}
