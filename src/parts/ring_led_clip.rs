//! Hold a ring LED circuit board of a given diameter: an open ring with
//! three inward claws spaced 120 degrees apart that grip the board edge
//! from above and below.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::plane::Plane;
use crate::parts::{Body, Part, Resolution, Solid, angle_between, fits, positive};
use crate::sketch::Sketch;
use crate::traits::CSG;
use crate::workplane::Workplane;
use nalgebra::Vector3;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Radius of the LED board.
    pub radius: Real,
    pub ring_height: Real,
    /// Keep this a multiple of the nozzle diameter.
    pub ring_thickness: Real,
    /// Arc each claw occupies, degrees.
    pub clip_angular_length: Real,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            radius: 30.0,
            ring_height: 4.0,
            ring_thickness: 1.6,
            clip_angular_length: 30.0,
        }
    }
}

pub struct RingLedClip;

impl Part for RingLedClip {
    const NAME: &'static str = "ring_led_clip";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        const PART: &str = RingLedClip::NAME;
        positive(PART, "radius", p.radius)?;
        positive(PART, "ring_height", p.ring_height)?;
        positive(PART, "ring_thickness", p.ring_thickness)?;
        angle_between(PART, "clip_angular_length", p.clip_angular_length, 0.0, 120.0)?;
        fits(PART, "claw", p.ring_height / 2.0, "radius", p.radius)?;

        let (r, h, t, c) = (p.radius, p.ring_height, p.ring_thickness, p.clip_angular_length);
        // each half is drawn above the board plane and mirrored below it
        let mirrored = |upper: Sketch<()>| {
            upper.union(&upper.mirror(Plane::from_normal(Vector3::y(), 0.0)))
        };

        let ring_section = mirrored(Sketch::polygon(
            &[[r, 0.0], [r + t, 0.0], [r + t, h / 2.0], [r, h / 2.0]],
            None,
        )?);
        // claws reach halfway into the ring wall so they fuse with it
        let claw_section = mirrored(Sketch::polygon(
            &[
                [r, 0.0],
                [r + t / 2.0, 0.0],
                [r + t / 2.0, h / 2.0],
                [r - h / 2.0, h / 2.0],
            ],
            None,
        )?);

        let ring_arc = 240.0 + c;
        let ring = revolve_on_yz(&ring_section, ring_arc, res)?;
        let claw = revolve_on_yz(&claw_section, c, res)?;

        let ring = ring.rotate(0.0, 0.0, -120.0 - c / 2.0);
        let claws =
            [-c / 2.0, 120.0 - c / 2.0, -120.0 - c / 2.0].map(|angle| claw.rotate(0.0, 0.0, angle));
        let clip = Mesh::union_all(std::iter::once(&ring).chain(&claws));
        Ok(vec![Body::new("clip", clip)])
    }
}

/// Revolve a section drawn on the world YZ plane about the world Z axis,
/// starting from +Y and turning towards -X.
fn revolve_on_yz(
    section: &Sketch<()>,
    degrees: Real,
    res: &Resolution,
) -> Result<Solid, PartError> {
    let solid = section.revolve(degrees, res.arc_segments(degrees))?;
    Ok(Workplane::yz().place(&solid))
}
