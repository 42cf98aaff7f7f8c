//! One half of a three-joint "magic arm": a ball-and-socket at the effector
//! end, a square arm and a mid joint where a knob-driven wedge pushes an
//! actuating rod against the ball. Print the arm twice for the full
//! mechanism.
//!
//! Every dimension of the wedge mechanism derives from a handful of inputs
//! (ball size, socket wall, fastener, wedge angle); see [`ArmGeometry`].

use crate::errors::PartError;
use crate::float_types::{FRAC_1_SQRT_2, Real};
use crate::mesh::Mesh;
use crate::parts::{Body, Part, Resolution, Solid, angle_between, derived, fits, positive};
use crate::sketch::Sketch;
use crate::sketch::extrudes::RevolveAxis;
use crate::traits::CSG;
use crate::workplane::Workplane;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub ball_diameter: Real,
    /// Clearance diameter of the fasteners through ball and arm.
    pub fastener_diameter: Real,
    pub fastener_thread_pitch: Real,
    /// Captive nut inside the end ball.
    pub nut_thickness: Real,
    pub nut_across_flats: Real,
    pub nozzle_diameter: Real,
    /// Radial gap between ball and socket.
    pub ball_gap: Real,
    /// Horizontal travel of the wedge.
    pub wedge_range_horizontal: Real,
    pub socket_wall: Real,
    /// Ball centre to mid-joint axis.
    pub arm_length: Real,
    pub wedge_fastener_diameter: Real,
    /// Incline of the wedge face, degrees.
    pub wedge_angle: Real,
    /// Lay the bodies out flat on z = 0 for slicing.
    pub reposition_for_printing: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            ball_diameter: 20.0,
            fastener_diameter: 6.5,
            fastener_thread_pitch: 1.2,
            nut_thickness: 5.7,
            nut_across_flats: 11.25,
            nozzle_diameter: 0.4,
            ball_gap: 0.2,
            wedge_range_horizontal: 2.0,
            socket_wall: 5.0,
            arm_length: 50.0,
            wedge_fastener_diameter: 6.5,
            wedge_angle: 25.0,
            reposition_for_printing: false,
        }
    }
}

/// Dimensions derived from [`Params`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmGeometry {
    /// Socket cavity radius (ball radius plus gap).
    pub inner_radius: Real,
    /// Socket outer radius (ball radius plus wall).
    pub outer_radius: Real,
    pub inner_45: Real,
    pub outer_45: Real,
    /// Side of the square arm shell.
    pub arm_side_outer: Real,
    /// Side of the square actuating rod.
    pub rod_side: Real,
    /// Side of the channel the rod slides in.
    pub arm_side_inner: Real,
    /// Vertical wedge travel for the horizontal range at the wedge angle.
    pub wedge_range_vertical: Real,
    /// Diameter of the wedge cylinder, the rod's diagonal.
    pub wedge_diameter: Real,
    /// Mid-joint clearance around the wedge.
    pub clearance_size: Real,
    /// Height of the hex bolt-head pocket in the wedge block.
    pub wedge_hex_z: Real,
    /// Bottom of the printable arm (ball chopped flat here).
    pub cutoff_z: Real,
}

impl ArmGeometry {
    pub fn derive(p: &Params) -> Result<Self, PartError> {
        const PART: &str = AdjustableArm::NAME;
        positive(PART, "ball_diameter", p.ball_diameter)?;
        positive(PART, "fastener_diameter", p.fastener_diameter)?;
        positive(PART, "fastener_thread_pitch", p.fastener_thread_pitch)?;
        positive(PART, "nut_thickness", p.nut_thickness)?;
        positive(PART, "nut_across_flats", p.nut_across_flats)?;
        positive(PART, "nozzle_diameter", p.nozzle_diameter)?;
        positive(PART, "ball_gap", p.ball_gap)?;
        positive(PART, "wedge_range_horizontal", p.wedge_range_horizontal)?;
        positive(PART, "socket_wall", p.socket_wall)?;
        positive(PART, "arm_length", p.arm_length)?;
        positive(PART, "wedge_fastener_diameter", p.wedge_fastener_diameter)?;
        angle_between(PART, "wedge_angle", p.wedge_angle, 0.0, 90.0)?;
        fits(PART, "fastener", p.fastener_diameter, "nut", p.nut_across_flats)?;
        fits(PART, "captive nut", p.nut_across_flats, "ball", p.ball_diameter)?;

        let inner_radius = p.ball_gap + p.ball_diameter / 2.0;
        let outer_radius = p.socket_wall + p.ball_diameter / 2.0;
        fits(PART, "socket cavity", inner_radius, "socket", outer_radius)?;

        let inner_45 = inner_radius * FRAC_1_SQRT_2;
        let outer_45 = outer_radius * FRAC_1_SQRT_2;
        let arm_side_outer = outer_45 * 2.0;
        let rod_side = derived(PART, "rod_side", arm_side_outer - p.socket_wall)?;
        let arm_side_inner = rod_side + p.ball_gap * 4.0;
        fits(PART, "rod channel", arm_side_inner, "arm shell", arm_side_outer)?;
        let wedge_tan = p.wedge_angle.to_radians().tan();
        let wedge_range_vertical = p.wedge_range_horizontal / wedge_tan;
        let wedge_diameter = rod_side / FRAC_1_SQRT_2;
        fits(
            PART,
            "wedge fastener",
            p.wedge_fastener_diameter,
            "wedge",
            wedge_diameter,
        )?;
        let clearance_size = wedge_diameter + p.ball_gap * 2.0;
        // lowest point of the inclined face under the nut, plus a layer of support
        let wedge_hex_z = p.nut_across_flats * wedge_tan / 2.0 + 1.2;
        fits(
            PART,
            "wedge hex pocket top",
            wedge_hex_z + p.nut_thickness,
            "socket",
            outer_radius,
        )?;
        let cutoff_z = -p.ball_diameter * FRAC_1_SQRT_2 / 2.0;

        Ok(ArmGeometry {
            inner_radius,
            outer_radius,
            inner_45,
            outer_45,
            arm_side_outer,
            rod_side,
            arm_side_inner,
            wedge_range_vertical,
            wedge_diameter,
            clearance_size,
            wedge_hex_z,
            cutoff_z,
        })
    }
}

impl fmt::Display for ArmGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("inner_radius", self.inner_radius),
            ("outer_radius", self.outer_radius),
            ("inner_45", self.inner_45),
            ("outer_45", self.outer_45),
            ("arm_side_outer", self.arm_side_outer),
            ("rod_side", self.rod_side),
            ("arm_side_inner", self.arm_side_inner),
            ("wedge_range_vertical", self.wedge_range_vertical),
            ("wedge_diameter", self.wedge_diameter),
            ("clearance_size", self.clearance_size),
            ("wedge_hex_z", self.wedge_hex_z),
            ("cutoff_z", self.cutoff_z),
        ];
        for (name, value) in rows {
            writeln!(f, "{name:<22} {value:>9.4}")?;
        }
        Ok(())
    }
}

pub struct AdjustableArm;

impl Part for AdjustableArm {
    const NAME: &'static str = "adjustable_arm";
    type Params = Params;

    fn build(p: &Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
        res.validate()?;
        let g = ArmGeometry::derive(p)?;
        debug!(?g, "derived arm geometry");

        let ball = end_ball(p, res)?;
        let wedge = WedgeParts::new(p, &g, res);
        let arm = arm_half(p, &g, &wedge, res)?;

        let chop = Workplane::xy()
            .offset(0.0, 0.0, g.cutoff_z)
            .extrude(
                &Sketch::rect(p.arm_length * 3.0, p.arm_length * 3.0, None),
                -g.outer_radius,
            );
        let combined = ball.union(&arm).difference(&chop);
        let wedge_block = wedge.hex_bolt_block();

        let (combined, wedge_block) = if p.reposition_for_printing {
            (
                combined.translate(0.0, 0.0, -g.cutoff_z),
                wedge_block
                    .translate(g.outer_radius * 2.0, -p.arm_length, 0.0)
                    .rotate_about_axis(Point3::origin(), Vector3::x(), p.wedge_angle),
            )
        } else {
            (combined, wedge_block)
        };

        Ok(vec![
            Body::new("arm", combined),
            Body::new("wedge_block_hex_bolt", wedge_block),
        ])
    }
}

/// The ball at the effector end with a blind fastener hole from below and
/// a captive nut at its centre.
pub fn end_ball(p: &Params, res: &Resolution) -> Result<Solid, PartError> {
    res.validate()?;
    let ball = Mesh::sphere(p.ball_diameter / 2.0, res.segments, res.stacks, None);
    let shaft = Workplane::xy()
        .offset(0.0, 0.0, p.fastener_thread_pitch + p.nut_thickness / 2.0)
        .extrude(
            &Sketch::circle(p.fastener_diameter / 2.0, res.segments, None),
            -p.ball_diameter,
        );
    let nut = Sketch::hexagon_across_flats(p.nut_across_flats, None)
        .extrude_symmetric(p.nut_thickness / 2.0);
    Ok(ball.difference(&shaft).difference(&nut))
}

/// Solids shared between the arm and the wedge block, all centred on the
/// mid-joint axis at (0, arm_length).
struct WedgeParts {
    /// Wedge cylinder the rod ends in.
    mid: Solid,
    /// Half space above the inclined wedge face.
    upper_slice: Solid,
    /// Fastener slot through the rod end, elongated by the wedge travel.
    fastener_slot: Solid,
    /// Everything above the hex bolt head.
    trim: Solid,
    /// Pocket for the hex bolt head.
    bolt_head: Solid,
    /// Straight fastener hole through the wedge block.
    fastener_hole: Solid,
}

impl WedgeParts {
    fn new(p: &Params, g: &ArmGeometry, res: &Resolution) -> Self {
        let axis = Workplane::xy().offset(0.0, p.arm_length, 0.0);
        let r = g.outer_radius;
        let fastener = |d: Real| Sketch::circle(d / 2.0, res.segments, None);

        let upper_slice = axis
            .rotated(-p.wedge_angle, 0.0, 0.0)
            .extrude(&Sketch::rect(r * 4.0, r * 4.0, None), r * 4.0);
        let mid = axis.extrude_symmetric(&fastener(g.wedge_diameter), r);

        let range = p.wedge_range_horizontal;
        let slot_profile = fastener(p.wedge_fastener_diameter)
            .union(&fastener(p.wedge_fastener_diameter).translate(0.0, range, 0.0))
            .union(
                &Sketch::rect(p.wedge_fastener_diameter, range, None)
                    .translate(0.0, range / 2.0, 0.0),
            );
        let fastener_slot = axis.extrude_symmetric(&slot_profile, r);

        let trim = axis
            .offset(0.0, 0.0, g.wedge_hex_z + p.nut_thickness)
            .extrude(&fastener(2.0 * r), r * 2.0);
        let bolt_head = axis
            .offset(0.0, 0.0, g.wedge_hex_z)
            .rotated(0.0, 0.0, 30.0)
            .extrude(
                &Sketch::hexagon_across_flats(p.nut_across_flats, None),
                p.nut_thickness,
            );
        let fastener_hole =
            axis.extrude_symmetric(&fastener(p.wedge_fastener_diameter), g.wedge_diameter / 2.0);

        WedgeParts {
            mid,
            upper_slice,
            fastener_slot,
            trim,
            bolt_head,
            fastener_hole,
        }
    }

    /// The wedge cut to the inclined face, trimmed above and pocketed for
    /// a hex bolt head.
    fn hex_bolt_block(&self) -> Solid {
        self.mid
            .intersection(&self.upper_slice)
            .difference(&self.fastener_hole)
            .difference(&self.trim)
            .difference(&self.bolt_head)
    }
}

fn arm_half(
    p: &Params,
    g: &ArmGeometry,
    wedge: &WedgeParts,
    res: &Resolution,
) -> Result<Solid, PartError> {
    let yz = Workplane::yz();

    // 90 degree cone the lug swivels in, along -Y
    let lug_clearance = yz.place(
        &Sketch::polygon(
            &[
                [0.0, 0.0],
                [p.fastener_diameter / 2.0, 0.0],
                [-p.ball_diameter, p.ball_diameter + p.fastener_diameter / 2.0],
                [-p.ball_diameter, 0.0],
            ],
            None,
        )?
        .revolve_about(RevolveAxis::X, 360.0, res.segments)?,
    );
    let socket = Mesh::sphere(g.outer_radius, res.segments, res.stacks, None)
        .difference(&lug_clearance);

    let diagonal = Workplane::xz().rotated(0.0, 0.0, 45.0);
    let shell = diagonal.extrude(
        &Sketch::rounded_rectangle(
            g.arm_side_outer,
            g.arm_side_outer,
            p.socket_wall / 2.0,
            res.corner_segments(),
            None,
        ),
        -p.arm_length,
    );
    let channel = diagonal.extrude(
        &Sketch::rect(g.arm_side_inner, g.arm_side_inner, None),
        -p.arm_length - p.ball_gap * 2.0,
    );
    let rod = diagonal
        .offset(0.0, 0.0, -p.wedge_range_horizontal)
        .extrude(
            &Sketch::rect(g.rod_side, g.rod_side, None),
            p.wedge_range_horizontal - p.arm_length,
        );
    let rod = rod
        .union(&wedge.mid)
        .difference(&wedge.upper_slice)
        .difference(&wedge.fastener_slot);

    let axis = Workplane::xy().offset(0.0, p.arm_length, 0.0);
    let mid_joint = axis.extrude_symmetric(
        &Sketch::circle(g.outer_radius + p.nozzle_diameter * 2.0, res.segments, None),
        g.outer_radius,
    );
    let clearance_circle = || Sketch::circle(g.clearance_size / 2.0, res.segments, None);
    let range = p.wedge_range_horizontal;
    let clearance = axis.extrude_symmetric(
        &clearance_circle()
            .union(&Sketch::rect(g.clearance_size, range, None).translate(0.0, -range / 2.0, 0.0))
            .union(&clearance_circle().translate(0.0, -range, 0.0)),
        g.outer_radius,
    );

    let cavity = Mesh::sphere(g.inner_radius, res.segments, res.stacks, None);

    Ok(socket
        .union(&shell)
        .union(&mid_joint)
        .difference(&channel)
        .difference(&clearance)
        .difference(&wedge.trim.translate(0.0, 0.0, -g.wedge_range_vertical))
        .union(&rod)
        .difference(&cavity))
}
