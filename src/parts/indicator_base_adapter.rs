//! Crude adapter that mounts the printed adjustable arm on the magnetic
//! base of an ordinary indicator holder, using two fasteners through a
//! rounded, chamfered block.

use crate::errors::PartError;
use crate::float_types::Real;
use crate::parts::{Body, Part, Resolution, Solid, fits, non_negative, positive};
use crate::sketch::Sketch;
use crate::traits::CSG;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub width: Real,
    pub length: Real,
    pub height: Real,
    /// Rounding of the vertical edges.
    pub corner_radius: Real,
    /// Chamfer around the top and bottom faces.
    pub chamfer: Real,
    pub base_hole_radius: Real,
    /// Y position of the base fastener clearance hole.
    pub base_hole_y: Real,
    pub arm_shaft_radius: Real,
    /// Y position of the arm fastener and its hex pocket.
    pub arm_hole_y: Real,
    pub arm_hex_across_flats: Real,
    pub arm_hex_depth: Real,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 30.0,
            length: 40.0,
            height: 12.5,
            corner_radius: 3.0,
            chamfer: 1.0,
            base_hole_radius: 4.0,
            base_hole_y: -7.5,
            arm_shaft_radius: 3.25,
            arm_hole_y: 7.5,
            arm_hex_across_flats: 12.0,
            arm_hex_depth: 4.2,
        }
    }
}

pub struct BaseAdapter;

impl Part for BaseAdapter {
    const NAME: &'static str = "indicator_base_adapter";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        const PART: &str = BaseAdapter::NAME;
        positive(PART, "width", p.width)?;
        positive(PART, "length", p.length)?;
        positive(PART, "height", p.height)?;
        non_negative(PART, "corner_radius", p.corner_radius)?;
        non_negative(PART, "chamfer", p.chamfer)?;
        positive(PART, "base_hole_radius", p.base_hole_radius)?;
        positive(PART, "arm_shaft_radius", p.arm_shaft_radius)?;
        positive(PART, "arm_hex_across_flats", p.arm_hex_across_flats)?;
        positive(PART, "arm_hex_depth", p.arm_hex_depth)?;
        fits(
            PART,
            "corner radius",
            2.0 * p.corner_radius,
            "block width",
            p.width.min(p.length),
        )?;
        fits(PART, "chamfers", 2.0 * p.chamfer, "block height", p.height)?;
        if p.chamfer > 0.0 {
            fits(PART, "chamfer", p.chamfer, "corner radius", p.corner_radius)?;
        }
        fits(PART, "arm hex pocket", p.arm_hex_depth, "block height", p.height)?;
        fits(
            PART,
            "arm shaft",
            p.arm_shaft_radius * 2.0,
            "arm hex pocket",
            p.arm_hex_across_flats,
        )?;
        fits(
            PART,
            "holes",
            p.base_hole_radius + p.arm_hex_across_flats / 2.0,
            "hole spacing",
            (p.arm_hole_y - p.base_hole_y).abs(),
        )?;
        let (half_width, half_length) = (p.width / 2.0, p.length / 2.0);
        fits(
            PART,
            "base hole",
            p.base_hole_y.abs() + p.base_hole_radius,
            "block half length",
            half_length,
        )?;
        fits(
            PART,
            "arm hex pocket",
            p.arm_hole_y.abs() + p.arm_hex_across_flats / 2.0,
            "block half length",
            half_length,
        )?;
        // hex corners point along X
        let hex_circumradius = p.arm_hex_across_flats / 3.0_f64.sqrt();
        fits(
            PART,
            "holes",
            p.base_hole_radius.max(hex_circumradius),
            "block half width",
            half_width,
        )?;

        let block = chamfered_block(p, res)?;

        // cutters overshoot the faces they open onto
        let through = |radius: Real, y: Real| {
            Sketch::circle(radius, res.segments, None)
                .extrude(p.height + 2.0)
                .translate(0.0, y, -1.0)
        };
        let hex = Sketch::hexagon_across_flats(p.arm_hex_across_flats, None)
            .extrude(p.arm_hex_depth + 1.0)
            .translate(0.0, p.arm_hole_y, -1.0);

        let adapter = block.difference_all(&[
            through(p.base_hole_radius, p.base_hole_y),
            through(p.arm_shaft_radius, p.arm_hole_y),
            hex,
        ]);
        Ok(vec![Body::new("adapter", adapter)])
    }
}

/// Rounded block standing on z = 0 whose top and bottom outlines are
/// chamfered: two lofted bands around a straight extrusion.
fn chamfered_block(p: &Params, res: &Resolution) -> Result<Solid, PartError> {
    let corners = res.corner_segments();
    let outline = Sketch::rounded_rectangle(p.width, p.length, p.corner_radius, corners, None);
    let c = p.chamfer;
    if c <= 0.0 {
        return Ok(outline.extrude(p.height));
    }
    let inset = Sketch::rounded_rectangle(
        p.width - 2.0 * c,
        p.length - 2.0 * c,
        p.corner_radius - c,
        corners,
        None,
    );

    let bottom = inset.loft(&outline, c)?;
    let middle = outline.extrude(p.height - 2.0 * c).translate(0.0, 0.0, c);
    let top = outline.loft(&inset, c)?.translate(0.0, 0.0, p.height - c);
    Ok(bottom.union(&middle).union(&top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chamfer_needs_a_larger_corner_radius() {
        let p = Params {
            corner_radius: 1.0,
            chamfer: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            BaseAdapter::build(&p, &Resolution::draft()),
            Err(PartError::DoesNotFit { feature: "chamfer", .. })
        ));
    }

    #[test]
    fn corner_radius_is_limited_by_the_block() {
        let p = Params {
            corner_radius: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            BaseAdapter::build(&p, &Resolution::draft()),
            Err(PartError::DoesNotFit { feature: "corner radius", .. })
        ));
    }

    #[test]
    fn holes_must_stay_inside_the_block() {
        let p = Params {
            base_hole_y: -18.0,
            ..Default::default()
        };
        assert!(matches!(
            BaseAdapter::build(&p, &Resolution::draft()),
            Err(PartError::DoesNotFit { feature: "base hole", .. })
        ));

        let p = Params {
            arm_hole_y: 16.0,
            ..Default::default()
        };
        assert!(matches!(
            BaseAdapter::build(&p, &Resolution::draft()),
            Err(PartError::DoesNotFit { feature: "arm hex pocket", .. })
        ));
    }

    #[test]
    fn sharp_block_without_chamfer() {
        let p = Params {
            corner_radius: 0.0,
            chamfer: 0.0,
            ..Default::default()
        };
        let block = chamfered_block(&p, &Resolution::draft()).expect("plain block");
        assert!((block.volume() - 30.0 * 40.0 * 12.5).abs() < 1e-6);
    }
}
