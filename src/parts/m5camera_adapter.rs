//! Clip an M5CAMERA to a 1/4"-20 hex bolt head through the camera's
//! studless-LEGO-beam mounting points.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::parts::{BoltHead, Body, Part, Resolution, Solid, fits, positive};
use crate::sketch::Sketch;
use crate::traits::CSG;
use crate::workplane::Workplane;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub lego_pin_length: Real,
    pub lego_pin_hole_diameter: Real,
    pub lego_pin_lip_diameter: Real,
    pub lego_pin_lip_depth: Real,
    /// Centre distance of the two pin holes (4 LEGO units).
    pub lego_pin_spacing: Real,
    pub adapter_length: Real,
    pub lego_bar_height: Real,
    pub bolt: BoltHead,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            lego_pin_length: 15.25,
            lego_pin_hole_diameter: 4.85,
            lego_pin_lip_diameter: 6.22,
            lego_pin_lip_depth: 1.0,
            lego_pin_spacing: 32.2,
            adapter_length: 45.0,
            lego_bar_height: 10.0,
            bolt: BoltHead::default(),
        }
    }
}

impl Params {
    fn validate(&self) -> Result<(), PartError> {
        const PART: &str = CameraAdapter::NAME;
        positive(PART, "lego_pin_length", self.lego_pin_length)?;
        positive(PART, "lego_pin_hole_diameter", self.lego_pin_hole_diameter)?;
        positive(PART, "lego_pin_lip_diameter", self.lego_pin_lip_diameter)?;
        positive(PART, "lego_pin_lip_depth", self.lego_pin_lip_depth)?;
        positive(PART, "lego_pin_spacing", self.lego_pin_spacing)?;
        positive(PART, "adapter_length", self.adapter_length)?;
        positive(PART, "lego_bar_height", self.lego_bar_height)?;
        self.bolt.validate(PART)?;
        fits(
            PART,
            "pin lip",
            self.lego_pin_lip_diameter,
            "LEGO bar",
            self.lego_bar_height,
        )?;
        fits(
            PART,
            "pin hole",
            self.lego_pin_hole_diameter,
            "pin lip",
            self.lego_pin_lip_diameter,
        )?;
        fits(
            PART,
            "pin lips",
            2.0 * self.lego_pin_lip_depth,
            "bar thickness",
            self.lego_pin_length / 2.0,
        )?;
        fits(
            PART,
            "pin spacing",
            self.lego_pin_spacing + self.lego_pin_lip_diameter,
            "adapter length",
            self.adapter_length,
        )
    }
}

pub struct CameraAdapter;

impl Part for CameraAdapter {
    const NAME: &'static str = "m5camera_adapter";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        p.validate()?;
        let bolt = &p.bolt;
        let head = bolt.head_across_flats;
        let block_height = head * 3.0;
        let yz = Workplane::yz();

        // plate with rounded top corners and the bolt shaft hole above centre
        let plate = Sketch::rounded_rectangle(
            p.adapter_length,
            block_height,
            head / 2.0,
            res.corner_segments(),
            None,
        )
        .union(
            &Sketch::rect(p.adapter_length, block_height / 2.0, None).translate(
                0.0,
                -block_height / 4.0,
                0.0,
            ),
        )
        .difference(
            &Sketch::circle(bolt.shaft_diameter / 2.0, res.segments, None).translate(
                0.0,
                head / 2.0,
                0.0,
            ),
        );
        let block = yz.extrude(&plate, bolt.block_thickness());

        let hex_pocket = yz.offset(0.0, head / 2.0, bolt.head_thickness).extrude(
            &Sketch::hexagon_across_flats(head, None),
            -bolt.head_thickness - p.lego_bar_height,
        );

        let bar = lego_bar(p, res).translate(-p.lego_bar_height / 2.0, 0.0, -block_height / 2.0);
        let adapter = block.union(&bar).difference(&hex_pocket);
        Ok(vec![Body::new("adapter", adapter)])
    }
}

/// Bar of half a pin's length with two pin holes, each lipped at both ends.
/// Cutters run 1 mm past the bar faces.
fn lego_bar(p: &Params, res: &Resolution) -> Solid {
    let thickness = p.lego_pin_length / 2.0;
    let pin = {
        let hole = Sketch::circle(p.lego_pin_hole_diameter / 2.0, res.segments, None)
            .extrude(thickness + 2.0)
            .translate(0.0, 0.0, -1.0);
        let lip = Sketch::circle(p.lego_pin_lip_diameter / 2.0, res.segments, None)
            .extrude(p.lego_pin_lip_depth + 1.0);
        hole.union(&lip.translate(0.0, 0.0, -1.0))
            .union(&lip.translate(0.0, 0.0, thickness - p.lego_pin_lip_depth))
    };

    let half_spacing = p.lego_pin_spacing / 2.0;
    Sketch::rect(p.lego_bar_height, p.adapter_length, None)
        .extrude(thickness)
        .difference(&pin.translate(0.0, half_spacing, 0.0))
        .difference(&pin.translate(0.0, -half_spacing, 0.0))
}
