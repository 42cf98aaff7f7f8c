//! 2D profiles as `Sketch`s

use crate::errors::ValidationError;
use crate::float_types::{FRAC_PI_2, PI, Real, TAU};
use crate::sketch::Sketch;
use nalgebra::Point3;
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Sketch<S> {
    /// Rectangle with one corner at the origin spanning `[0, width] × [0, length]`.
    pub fn rectangle(width: Real, length: Real, metadata: Option<S>) -> Self {
        Self::from_ring(
            vec![(0.0, 0.0), (width, 0.0), (width, length), (0.0, length)],
            metadata,
        )
    }

    /// Rectangle centred on the origin.
    pub fn rect(width: Real, length: Real, metadata: Option<S>) -> Self {
        let (hw, hl) = (width / 2.0, length / 2.0);
        Self::from_ring(vec![(-hw, -hl), (hw, -hl), (hw, hl), (-hw, hl)], metadata)
    }

    pub fn square(width: Real, metadata: Option<S>) -> Self {
        Self::rectangle(width, width, metadata)
    }

    /// Circle centred on the origin, approximated by `segments` vertices
    /// (the first on +X).
    pub fn circle(radius: Real, segments: usize, metadata: Option<S>) -> Self {
        Self::regular_ngon(segments.max(3), radius, metadata)
    }

    /// Arbitrary simple polygon from its outline.
    ///
    /// Fails on fewer than three points or a non-finite coordinate.
    pub fn polygon(points: &[[Real; 2]], metadata: Option<S>) -> Result<Self, ValidationError> {
        if let Some([x, y]) = points.iter().find(|[x, y]| !x.is_finite() || !y.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(Point3::new(*x, *y, 0.0)));
        }
        if points.len() < 3 {
            let at = points.first().map_or(Point3::origin(), |[x, y]| Point3::new(*x, *y, 0.0));
            return Err(ValidationError::TooFewPoints(at));
        }
        Ok(Self::from_ring(
            points.iter().map(|[x, y]| (*x, *y)).collect(),
            metadata,
        ))
    }

    /// Regular polygon with circumradius `radius`, first vertex on +X.
    pub fn regular_ngon(sides: usize, radius: Real, metadata: Option<S>) -> Self {
        let sides = sides.max(3);
        let coords = (0..sides)
            .map(|i| {
                let theta = TAU * i as Real / sides as Real;
                (radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Self::from_ring(coords, metadata)
    }

    /// Hexagon measured across its flats (a wrench size), corners on ±X.
    pub fn hexagon_across_flats(across_flats: Real, metadata: Option<S>) -> Self {
        let circumradius = across_flats / 2.0 / (PI / 6.0).cos();
        Self::regular_ngon(6, circumradius, metadata)
    }

    /// Centred rectangle with its four corners rounded by `radius`.
    ///
    /// Every corner contributes `corner_segments + 1` vertices, starting at
    /// the +X/-Y corner, so two rounded rectangles built with the same
    /// `corner_segments` pair up vertex for vertex (see [`Sketch::loft`]).
    /// The radius is clamped to half the shorter side.
    pub fn rounded_rectangle(
        width: Real,
        length: Real,
        radius: Real,
        corner_segments: usize,
        metadata: Option<S>,
    ) -> Self {
        let corner_segments = corner_segments.max(1);
        let r = radius.clamp(0.0, width.min(length) / 2.0);
        let (hw, hl) = (width / 2.0 - r, length / 2.0 - r);
        let centres = [(hw, -hl), (hw, hl), (-hw, hl), (-hw, -hl)];

        let mut coords = Vec::with_capacity(4 * (corner_segments + 1));
        for (k, (cx, cy)) in centres.iter().enumerate() {
            let start = -FRAC_PI_2 + k as Real * FRAC_PI_2;
            for i in 0..=corner_segments {
                let theta = start + FRAC_PI_2 * i as Real / corner_segments as Real;
                coords.push((cx + r * theta.cos(), cy + r * theta.sin()));
            }
        }
        if r <= 0.0 {
            coords.dedup();
        }
        Self::from_ring(coords, metadata)
    }

    /// Rounded slot of width `width` whose semicircle centres are `(0, 0)`
    /// and `(0, length)`.
    pub fn stadium(length: Real, width: Real, segments: usize, metadata: Option<S>) -> Self {
        let r = width / 2.0;
        let half = (segments.max(4) / 2).max(2);
        let mut coords = Vec::with_capacity(2 * (half + 1));
        // lower semicircle, right to left through -Y
        for i in 0..=half {
            let theta = -PI * i as Real / half as Real;
            coords.push((r * theta.cos(), r * theta.sin()));
        }
        coords.reverse();
        // upper semicircle, right to left through +Y
        for i in 0..=half {
            let theta = PI * i as Real / half as Real;
            coords.push((r * theta.cos(), length + r * theta.sin()));
        }
        Self::from_ring(coords, metadata)
    }
}
