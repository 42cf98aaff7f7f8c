//! Clip a 1/4"-20 bolt to an aluminium extrusion beam (the 30 x 30 mm beam
//! of the Prusa MK3/MK4 frames).
//!
//! Coordinates are relative to the beam centre. The profile is a chain of
//! rounded strips of perimeter thickness: the top hooks into the rail, the
//! bottom has only a lip (hooks on both sides could not be installed) and a
//! lever to pry the clip off again.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::parts::{Body, Part, Resolution, fits, non_negative, positive};
use crate::sketch::Sketch;
use crate::traits::CSG;
use nalgebra::Vector3;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub extrusion_size: Real,
    pub channel_entrance_half: Real,
    pub channel_lip: Real,
    /// Thin enough to flex on installation, thick enough to grip, and a
    /// multiple of the nozzle diameter.
    pub perimeter_thickness: Real,
    pub clip_length: Real,
    pub extra_gap: Real,
    pub hook_size: Real,
    pub lever_size: Real,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            extrusion_size: 30.0,
            channel_entrance_half: 4.0,
            channel_lip: 2.0,
            perimeter_thickness: 1.6,
            clip_length: 40.0,
            extra_gap: 0.1,
            hook_size: 1.0,
            lever_size: 5.0,
        }
    }
}

pub struct ExtrusionClip;

impl Part for ExtrusionClip {
    const NAME: &'static str = "extrusion_clip";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        const PART: &str = ExtrusionClip::NAME;
        positive(PART, "extrusion_size", p.extrusion_size)?;
        positive(PART, "channel_entrance_half", p.channel_entrance_half)?;
        positive(PART, "channel_lip", p.channel_lip)?;
        positive(PART, "perimeter_thickness", p.perimeter_thickness)?;
        positive(PART, "clip_length", p.clip_length)?;
        non_negative(PART, "extra_gap", p.extra_gap)?;
        positive(PART, "hook_size", p.hook_size)?;
        positive(PART, "lever_size", p.lever_size)?;
        let half = p.extrusion_size / 2.0;
        fits(PART, "channel entrance", p.channel_entrance_half, "beam half", half)?;
        fits(PART, "channel lip", p.channel_lip, "beam half", half)?;

        let clip = profile(p, res).extrude_symmetric(p.clip_length / 2.0);
        Ok(vec![Body::new("clip", clip)])
    }
}

/// The 2D clip outline, unioned before a single extrusion.
fn profile(p: &Params, res: &Resolution) -> Sketch<()> {
    let t = p.perimeter_thickness;
    let gap = p.extra_gap;
    let inner = p.extrusion_size / 2.0;
    let lip_x = p.channel_entrance_half - t / 2.0;
    let strip = |length: Real| Sketch::stadium(length, t, res.segments, None);

    let side = strip(inner * 2.0 + t + gap * 2.0).translate(
        inner + t / 2.0 + gap,
        -inner - t / 2.0 - gap,
        0.0,
    );
    let top = strip(inner - p.channel_entrance_half + t + gap)
        .rotate(0.0, 0.0, -90.0)
        .translate(lip_x, inner + gap + t / 2.0, 0.0);
    let bottom = top.mirror(Plane::from_normal(Vector3::y(), 0.0));
    let lip_top =
        strip(p.channel_lip + t / 2.0 + gap).translate(lip_x, inner - p.channel_lip, 0.0);
    let lip_bottom =
        strip(p.channel_lip / 2.0 + gap).translate(lip_x, -inner - gap - t / 2.0, 0.0);
    let hook = strip(p.hook_size)
        .rotate(0.0, 0.0, -135.0)
        .translate(lip_x, inner - p.channel_lip, 0.0);
    let lever = strip(p.lever_size)
        .rotate(0.0, 0.0, 135.0)
        .translate(lip_x, -inner - t / 2.0 - gap, 0.0);

    [top, bottom, lip_top, lip_bottom, hook, lever]
        .iter()
        .fold(side, |acc, feature| acc.union(feature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_one_connected_region() {
        let sketch = profile(&Params::default(), &Resolution::draft());
        assert_eq!(sketch.geometry.0.len(), 1);
        let bb = sketch.bounding_box();
        assert!((bb.maxs.x - 16.7).abs() < 1e-6);
        assert!((bb.maxs.y - 16.7).abs() < 1e-6);
    }
}
