//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use fixturegen::{float_types::Real, mesh::Mesh, traits::CSG};
use nalgebra::Point3;

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]` of a mesh.
pub fn bounding_box(mesh: &Mesh<()>) -> [Real; 6] {
    let bb = mesh.bounding_box();
    [
        bb.mins.x, bb.mins.y, bb.mins.z, bb.maxs.x, bb.maxs.y, bb.maxs.z,
    ]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Asserts every component of a bounding box within `eps`.
pub fn assert_bounds(mesh: &Mesh<()>, expected: [Real; 6], eps: Real) {
    let got = bounding_box(mesh);
    for (axis, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
        assert!(
            approx_eq(*g, *e, eps),
            "bounding box component {axis}: got {g}, expected {e} (full: {got:?})"
        );
    }
}

pub fn solid_at(mesh: &Mesh<()>, x: Real, y: Real, z: Real) -> bool {
    mesh.contains_vertex(&Point3::new(x, y, z))
}

/// A closed surface encloses the same volume wherever it sits; a mesh with
/// holes picks up a translation dependent term.
pub fn assert_closed(mesh: &Mesh<()>, label: &str) {
    let volume = mesh.volume();
    let moved = mesh.translate(100.0, -200.0, 300.0).volume();
    assert!(
        (moved - volume).abs() < 1e-3,
        "{label} is not closed: volume {volume} becomes {moved} after translation"
    );
}
