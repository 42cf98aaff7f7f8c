//! Clip a 3/8" dial indicator shaft to a 1/4"-20 hex bolt head.
//!
//! A head block captures the bolt; an arm-like block beside it holds the
//! indicator shaft in a vertical hole that a slit and a cross screw turn
//! into a clamp.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::parts::{BoltHead, Body, Part, Resolution, fits, hex_head_block, positive};
use crate::sketch::Sketch;
use crate::traits::CSG;
use crate::workplane::Workplane;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub head_block_side: Real,
    pub nozzle_diameter: Real,
    pub slit_width: Real,
    pub indicator_shaft_diameter: Real,
    pub clamp_screw_diameter: Real,
    /// Clamp screw distance from the free end of the block.
    pub clamp_screw_inset: Real,
    pub bolt: BoltHead,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            head_block_side: 15.0,
            nozzle_diameter: 0.4,
            slit_width: 1.0,
            indicator_shaft_diameter: 9.45,
            clamp_screw_diameter: 3.5,
            clamp_screw_inset: 3.5,
            bolt: BoltHead::default(),
        }
    }
}

pub struct IndicatorHolder;

impl Part for IndicatorHolder {
    const NAME: &'static str = "indicator_holder";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        const PART: &str = IndicatorHolder::NAME;
        positive(PART, "head_block_side", p.head_block_side)?;
        positive(PART, "nozzle_diameter", p.nozzle_diameter)?;
        positive(PART, "slit_width", p.slit_width)?;
        positive(PART, "indicator_shaft_diameter", p.indicator_shaft_diameter)?;
        positive(PART, "clamp_screw_diameter", p.clamp_screw_diameter)?;
        positive(PART, "clamp_screw_inset", p.clamp_screw_inset)?;
        p.bolt.validate(PART)?;
        fits(
            PART,
            "bolt head",
            p.bolt.head_across_flats,
            "head block",
            p.head_block_side,
        )?;
        let d = p.indicator_shaft_diameter;
        fits(PART, "slit", p.slit_width, "indicator shaft", d)?;
        fits(
            PART,
            "clamp screw",
            p.clamp_screw_inset + p.clamp_screw_diameter / 2.0,
            "slit",
            d * 2.0,
        )?;
        fits(
            PART,
            "clamp screw",
            p.clamp_screw_diameter,
            "block height",
            p.head_block_side,
        )?;

        let head_thickness = p.bolt.block_thickness();
        let head = Workplane::yz().place(&hex_head_block(p.head_block_side, 0.0, &p.bolt, res));

        let width = d + p.nozzle_diameter * 4.0;
        let length = d * 3.0;
        let height = p.head_block_side;
        let shaft_x = -(length / 2.0 - d * 1.25);

        // free end at -X; the outer corner at the head end is rounded
        let outline = round_corner(
            Sketch::rect(length, width, None),
            [length / 2.0, width / 2.0],
            head_thickness.min(width),
            res,
        );
        let through = height / 2.0 + 1.0;
        let shaft_hole = Sketch::circle(d / 2.0, res.segments, None)
            .translate(shaft_x, 0.0, 0.0)
            .extrude_symmetric(through);
        let slit = Sketch::rect(d * 2.0 + 1.0, p.slit_width, None)
            .translate(-length / 2.0 + d - 0.5, 0.0, 0.0)
            .extrude_symmetric(through);
        let clamp_screw = Workplane::xz()
            .offset(-length / 2.0 + p.clamp_screw_inset, 0.0, 0.0)
            .extrude_symmetric(
                &Sketch::circle(p.clamp_screw_diameter / 2.0, res.segments, None),
                width,
            );
        let block = outline
            .extrude_symmetric(height / 2.0)
            .difference_all([&shaft_hole, &slit, &clamp_screw]);

        let holder = head.union(&block.translate(
            head_thickness - length / 2.0,
            p.head_block_side / 2.0 + width / 2.0,
            0.0,
        ));
        Ok(vec![Body::new("holder", holder)])
    }
}

/// Round the `corner` of a profile whose two edges meeting there run
/// towards the origin side (the +X/+Y corner of a centred outline).
fn round_corner(
    profile: Sketch<()>,
    corner: [Real; 2],
    radius: Real,
    res: &Resolution,
) -> Sketch<()> {
    let [cx, cy] = corner;
    let notch = Sketch::rectangle(radius, radius, None).translate(cx - radius, cy - radius, 0.0);
    let fillet = Sketch::circle(radius, res.segments, None)
        .translate(cx - radius, cy - radius, 0.0)
        .intersection(&notch);
    profile.difference(&notch).union(&fillet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    #[test]
    fn rounded_corner_removes_the_corner_square_remainder() {
        let res = Resolution::default();
        let square = Sketch::rect(20.0, 20.0, None);
        let rounded = round_corner(square, [10.0, 10.0], 4.0, &res);
        let removed = 400.0 - rounded.geometry.unsigned_area();
        let expected = 16.0 - std::f64::consts::PI * 16.0 / 4.0;
        assert!((removed - expected).abs() < 0.1);
    }
}
