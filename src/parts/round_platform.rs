//! A thin round platform standing on a 1/4"-20 hex bolt head at its rim.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::parts::{
    BoltHead, Body, Part, Resolution, fits, hex_head_block, positive, xz_head_block_frame,
};
use crate::sketch::Sketch;
use crate::traits::CSG;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub radius: Real,
    pub thickness: Real,
    pub hex_head_side: Real,
    pub bolt: BoltHead,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            radius: 30.0,
            thickness: 1.2,
            hex_head_side: 18.0,
            bolt: BoltHead::default(),
        }
    }
}

pub struct RoundPlatform;

impl Part for RoundPlatform {
    const NAME: &'static str = "round_platform";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        const PART: &str = RoundPlatform::NAME;
        positive(PART, "radius", p.radius)?;
        positive(PART, "thickness", p.thickness)?;
        positive(PART, "hex_head_side", p.hex_head_side)?;
        p.bolt.validate(PART)?;
        fits(
            PART,
            "bolt head",
            p.bolt.head_across_flats,
            "hex head block",
            p.hex_head_side,
        )?;
        fits(
            PART,
            "hex head block",
            p.hex_head_side / 2.0,
            "platform radius",
            p.radius,
        )?;

        let flat = Sketch::circle(p.radius, res.segments, None).extrude(p.thickness);
        let head = xz_head_block_frame(&p.bolt)
            .place(&hex_head_block(
                p.hex_head_side,
                p.bolt.head_across_flats / 2.0,
                &p.bolt,
                res,
            ))
            .translate(0.0, p.radius, p.hex_head_side / 2.0);

        Ok(vec![Body::new("platform", flat.union(&head))])
    }
}
