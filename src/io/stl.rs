//! STL export of meshes.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::vertex::Vertex;
use nalgebra::Vector3;
use std::fmt::{Debug, Write as _};
use std::io::Cursor;

/// Facet normal from the polygon plane; vertex normals may be smoothed.
fn facets<S: Clone + Debug + Send + Sync>(
    mesh: &Mesh<S>,
) -> impl Iterator<Item = ([Vertex; 3], Vector3<Real>)> + '_ {
    mesh.polygons.iter().flat_map(|poly| {
        let normal = poly.plane.normal().normalize();
        poly.triangulate().into_iter().map(move |tri| (tri, normal))
    })
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Convert this Mesh to an **ASCII STL** string with the given `name`.
    ///
    /// ```rust
    /// # use fixturegen::mesh::Mesh;
    /// let mesh = Mesh::<()>::cube(1.0, None);
    /// let text = mesh.to_stl_ascii("my_solid");
    /// assert!(text.starts_with("solid my_solid"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "solid {name}");
        for (tri, n) in facets(self) {
            let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
            out.push_str("    outer loop\n");
            for v in &tri {
                let p = v.pos;
                let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }
        let _ = writeln!(out, "endsolid {name}");
        out
    }

    /// Convert this Mesh to a **binary STL** byte vector.
    ///
    /// Binary STL has no room for a solid name beyond the unused header,
    /// so `_name` is accepted for symmetry with [`Mesh::to_stl_ascii`].
    pub fn to_stl_binary(&self, _name: &str) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex as StlVertex, write_stl};

        let triangles: Vec<Triangle> = facets(self)
            .map(|(tri, n)| Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    StlVertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])
                }),
            })
            .collect();

        let mut cursor = Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_cube_has_twelve_facets() {
        let cube = Mesh::<()>::cube(2.0, None);
        let text = cube.to_stl_ascii("cube");
        assert!(text.starts_with("solid cube\n"));
        assert!(text.trim_end().ends_with("endsolid cube"));
        assert_eq!(text.matches("facet normal").count(), 12);
    }

    #[test]
    fn binary_cube_reads_back() {
        let cube = Mesh::<()>::cube(2.0, None);
        let bytes = cube.to_stl_binary("cube").expect("in-memory write");
        // 80 byte header, u32 count, 50 bytes per facet
        assert_eq!(bytes.len(), 84 + 12 * 50);
        let mut reader = Cursor::new(bytes);
        let indexed = stl_io::read_stl(&mut reader).expect("valid stl");
        assert_eq!(indexed.faces.len(), 12);
    }
}
