//! Clamp a 1/4"-20 bolt head onto the spindle of a Bridgeport knee mill so
//! an indicator can be attached to tram the head.
//!
//! A chamfered ring around the spindle is split by a slot through a tab
//! and tightened with a screw across the tab. A block on the opposite side
//! captures the bolt head.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::parts::{
    BoltHead, Body, Part, Resolution, fits, hex_head_block, non_negative, positive,
    xz_head_block_frame,
};
use crate::sketch::Sketch;
use crate::traits::CSG;
use crate::workplane::Workplane;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Spindle radius.
    pub radius: Real,
    pub ring_height: Real,
    /// Keep this a multiple of the nozzle diameter.
    pub ring_thickness: Real,
    /// Chamfer on the four circular ring edges.
    pub ring_chamfer: Real,
    pub hex_head_side: Real,
    /// Rounding of the head block's top edges.
    pub head_fillet: Real,
    pub slot_width: Real,
    pub tab_length: Real,
    pub tab_screw_diameter: Real,
    pub bolt: BoltHead,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            radius: 24.0,
            ring_height: 10.0,
            ring_thickness: 8.0,
            ring_chamfer: 2.0,
            hex_head_side: 18.0,
            head_fillet: 5.0,
            slot_width: 2.0,
            tab_length: 20.0,
            tab_screw_diameter: 3.5,
            bolt: BoltHead::default(),
        }
    }
}

impl Params {
    fn validate(&self) -> Result<(), PartError> {
        const PART: &str = SpindleClamp::NAME;
        positive(PART, "radius", self.radius)?;
        positive(PART, "ring_height", self.ring_height)?;
        positive(PART, "ring_thickness", self.ring_thickness)?;
        non_negative(PART, "ring_chamfer", self.ring_chamfer)?;
        positive(PART, "hex_head_side", self.hex_head_side)?;
        non_negative(PART, "head_fillet", self.head_fillet)?;
        positive(PART, "slot_width", self.slot_width)?;
        positive(PART, "tab_length", self.tab_length)?;
        positive(PART, "tab_screw_diameter", self.tab_screw_diameter)?;
        self.bolt.validate(PART)?;
        fits(
            PART,
            "ring chamfers",
            2.0 * self.ring_chamfer,
            "ring section",
            self.ring_thickness.min(self.ring_height),
        )?;
        fits(
            PART,
            "bolt head",
            self.bolt.head_across_flats,
            "hex head block",
            self.hex_head_side,
        )?;
        fits(
            PART,
            "tab screw",
            self.tab_screw_diameter,
            "ring height",
            self.ring_height,
        )?;
        fits(
            PART,
            "head fillet",
            self.head_fillet,
            "half the head block",
            self.hex_head_side / 2.0,
        )
    }

    fn tab_width(&self) -> Real {
        self.slot_width + 8.0
    }
}

pub struct SpindleClamp;

impl Part for SpindleClamp {
    const NAME: &'static str = "bridgeport_spindle_clamp";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        p.validate()?;
        let (r, t, h, c) = (p.radius, p.ring_thickness, p.ring_height, p.ring_chamfer);
        let yz = Workplane::yz();

        let section = Sketch::polygon(
            &[
                [r + c, -h / 2.0],
                [r + t - c, -h / 2.0],
                [r + t, -h / 2.0 + c],
                [r + t, h / 2.0 - c],
                [r + t - c, h / 2.0],
                [r + c, h / 2.0],
                [r, h / 2.0 - c],
                [r, -h / 2.0 + c],
            ],
            None,
        )?;
        let ring = yz.place(&section.revolve(360.0, res.segments)?);

        let connection_x = r + t / 2.0;
        let connection_length = 10.0 + p.bolt.block_thickness();
        let connection = yz.extrude_symmetric(
            &Sketch::rectangle(connection_length, h, None).translate(connection_x, -h / 2.0, 0.0),
            p.hex_head_side / 2.0,
        );

        let head = xz_head_block_frame(&p.bolt)
            .place(&hex_head_block(p.hex_head_side, p.head_fillet, &p.bolt, res))
            .translate(
                0.0,
                connection_x + connection_length,
                p.hex_head_side / 2.0 + h / 2.0,
            );

        let tab_width = p.tab_width();
        let tab_screw = Workplane::yz()
            .offset(-p.tab_length / 4.0, 0.0, 0.0)
            .extrude_symmetric(
                &Sketch::circle(p.tab_screw_diameter / 2.0, res.segments, None),
                tab_width,
            );
        let tab = Sketch::rect(tab_width, p.tab_length, None)
            .extrude_symmetric(h / 2.0)
            .difference(&tab_screw);
        let slot =
            Sketch::rect(p.slot_width, p.tab_length * 2.0, None).extrude_symmetric(h / 2.0 + 1.0);

        let tab_offset = -r - p.tab_length / 2.0 - t / 2.0;
        let clamp = ring
            .union(&connection)
            .union(&head)
            .union(&tab.translate(0.0, tab_offset, 0.0))
            .difference(&slot.translate(0.0, tab_offset, 0.0));

        Ok(vec![Body::new("clamp", clamp)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chamfers_must_fit_the_ring_section() {
        let p = Params {
            ring_chamfer: 4.5,
            ..Default::default()
        };
        assert!(matches!(
            SpindleClamp::build(&p, &Resolution::draft()),
            Err(PartError::DoesNotFit { feature: "ring chamfers", .. })
        ));
    }

    #[test]
    fn head_block_must_hold_the_bolt() {
        let p = Params {
            hex_head_side: 10.0,
            ..Default::default()
        };
        assert!(SpindleClamp::build(&p, &Resolution::draft()).is_err());
    }
}
