//! `Sketch`: planar profiles in the local XY plane, the input to extrusions,
//! revolves and lofts.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::traits::CSG;
use geo::{
    AffineOps, AffineTransform, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon,
    Orient, Polygon as GeoPolygon, orient::Direction,
};
use nalgebra::{Matrix4, Point3};
use std::fmt::Debug;
use std::sync::OnceLock;

pub mod extrudes;
pub mod shapes;

#[derive(Clone, Debug)]
pub struct Sketch<S: Clone + Send + Sync + Debug> {
    /// Profile regions. Exteriors are kept counter-clockwise, holes clockwise.
    pub geometry: MultiPolygon<Real>,

    /// Lazily calculated AABB (z is always 0).
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata carried over to every polygon of meshes built from this sketch
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Sketch<S> {
    /// Wrap geo polygons, normalising ring orientation.
    pub fn from_geo(geometry: MultiPolygon<Real>, metadata: Option<S>) -> Self {
        Sketch {
            geometry: geometry.orient(Direction::Default),
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Single closed ring.
    pub fn from_ring(coords: Vec<(Real, Real)>, metadata: Option<S>) -> Self {
        let polygon = GeoPolygon::new(LineString::from(coords), vec![]);
        Self::from_geo(MultiPolygon(vec![polygon]), metadata)
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Every ring of every region as open coordinate lists
    /// (closing point dropped): `(exterior, holes)` per region.
    pub fn rings(&self) -> Vec<(Vec<Coord<Real>>, Vec<Vec<Coord<Real>>>)> {
        fn open(ring: &LineString<Real>) -> Vec<Coord<Real>> {
            let mut coords = ring.0.clone();
            if coords.len() > 1 && coords.first() == coords.last() {
                coords.pop();
            }
            coords
        }
        self.geometry
            .iter()
            .map(|poly| {
                (
                    open(poly.exterior()),
                    poly.interiors().iter().map(open).collect(),
                )
            })
            .collect()
    }

    fn with_geometry(&self, geometry: MultiPolygon<Real>) -> Self {
        Self::from_geo(geometry, self.metadata.clone())
    }
}

impl<S: Clone + Send + Sync + Debug> CSG for Sketch<S> {
    fn new() -> Self {
        Sketch {
            geometry: MultiPolygon(Vec::new()),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    fn union(&self, other: &Self) -> Self {
        self.with_geometry(self.geometry.union(&other.geometry))
    }

    fn difference(&self, other: &Self) -> Self {
        self.with_geometry(self.geometry.difference(&other.geometry))
    }

    fn intersection(&self, other: &Self) -> Self {
        self.with_geometry(self.geometry.intersection(&other.geometry))
    }

    fn xor(&self, other: &Self) -> Self {
        self.with_geometry(self.geometry.xor(&other.geometry))
    }

    /// Applies the XY affine part of `matrix`; Z terms are ignored.
    fn transform(&self, m: &Matrix4<Real>) -> Self {
        let affine = AffineTransform::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 3)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 3)],
        );
        self.with_geometry(self.geometry.affine_transform(&affine))
    }

    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| match self.geometry.bounding_rect() {
            Some(rect) => Aabb::new(
                Point3::new(rect.min().x, rect.min().y, 0.0),
                Point3::new(rect.max().x, rect.max().y, 0.0),
            ),
            None => Aabb::new(Point3::origin(), Point3::origin()),
        })
    }

    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Orientation is normalised on construction, so there is nothing to flip.
    fn inverse(&self) -> Self {
        self.clone()
    }
}
