//! Parametric part generators.
//!
//! Every generator is a [`Part`]: a name, a serde-deserialisable parameter
//! struct whose `Default` is the reference design, and a `build` function
//! that validates the parameters and returns one or more named [`Body`]s.
//! Coordinates are millimetres.

use crate::errors::{PartError, ValidationError};
use crate::float_types::{Real, tolerance};
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::traits::CSG;
use crate::workplane::Workplane;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt::{self, Debug};
use std::str::FromStr;
use tracing::{debug, info, info_span};

pub mod adjustable_arm;
pub mod bridgeport_spindle_clamp;
pub mod extrusion_clip;
pub mod indicator_base_adapter;
pub mod indicator_holder;
pub mod m5camera_adapter;
pub mod ring_led_clip;
pub mod round_platform;

/// Geometry type every generator produces.
pub type Solid = Mesh<()>;

/// One printable solid of a part.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub mesh: Solid,
}

impl Body {
    pub fn new(name: impl Into<String>, mesh: Solid) -> Self {
        Body {
            name: name.into(),
            mesh,
        }
    }
}

/// Tessellation density for curved surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Resolution {
    /// Segments around a full circle.
    pub segments: usize,
    /// Latitude bands of a sphere.
    pub stacks: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            segments: 48,
            stacks: 24,
        }
    }
}

impl Resolution {
    /// Coarse settings for previews and tests.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            segments: 16,
            stacks: 8,
        }
    }

    /// Segments for a quarter-circle fillet.
    pub fn corner_segments(&self) -> usize {
        (self.segments / 4).max(2)
    }

    /// Every [`Part::build`] rejects settings below 8 segments or 4 stacks.
    pub fn validate(&self) -> Result<(), PartError> {
        for (got, min) in [(self.segments, 8), (self.stacks, 4)] {
            if got < min {
                return Err(ValidationError::TooFewSegments {
                    operation: "tessellation",
                    min,
                    got,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Segments for an arc of `degrees`.
    pub fn arc_segments(&self, degrees: Real) -> usize {
        ((self.segments as Real * degrees / 360.0).ceil() as usize).max(1)
    }
}

/// The 1/4"-20 hex bolt every fixture clamps onto.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoltHead {
    pub head_across_flats: Real,
    pub head_thickness: Real,
    pub shaft_diameter: Real,
}

impl Default for BoltHead {
    fn default() -> Self {
        Self {
            head_across_flats: 11.0,
            head_thickness: 4.25,
            shaft_diameter: 6.5,
        }
    }
}

impl BoltHead {
    /// Block thickness that leaves 2 mm of plastic under the head.
    pub fn block_thickness(&self) -> Real {
        self.head_thickness + 2.0
    }

    pub fn validate(&self, part: &'static str) -> Result<(), PartError> {
        positive(part, "bolt.head_across_flats", self.head_across_flats)?;
        positive(part, "bolt.head_thickness", self.head_thickness)?;
        positive(part, "bolt.shaft_diameter", self.shaft_diameter)?;
        fits(
            part,
            "bolt shaft",
            self.shaft_diameter,
            "bolt head",
            self.head_across_flats,
        )
    }
}

/// Square block that captures a bolt head: a `side`-square plate
/// `bolt.block_thickness()` thick with a shaft hole, and a hex pocket
/// `bolt.head_thickness` deep opening on the z = 0 face.
///
/// Built in local coordinates (plate in XY, thickness along +Z); the two
/// top corners (local +Y) are rounded by `top_radius` when it is positive.
pub fn hex_head_block(
    side: Real,
    top_radius: Real,
    bolt: &BoltHead,
    res: &Resolution,
) -> Solid {
    let plate = if top_radius > 0.0 {
        Sketch::rounded_rectangle(side, side, top_radius, res.corner_segments(), None)
            .union(&Sketch::rect(side, side / 2.0, None).translate(0.0, -side / 4.0, 0.0))
    } else {
        Sketch::rect(side, side, None)
    };
    let plate = plate.difference(&Sketch::circle(bolt.shaft_diameter / 2.0, res.segments, None));
    let pocket = Sketch::hexagon_across_flats(bolt.head_across_flats, None);

    plate
        .extrude(bolt.block_thickness())
        .difference(&pocket.extrude(bolt.head_thickness))
}

/// Frame for a [`hex_head_block`] drawn on the world XZ plane whose
/// thickness runs from y = 0 towards -Y with the pocket on the -Y face.
pub fn xz_head_block_frame(bolt: &BoltHead) -> Workplane {
    Workplane::xz()
        .offset(0.0, 0.0, bolt.block_thickness())
        .rotated(0.0, 180.0, 0.0)
}

/// A parametric generator.
pub trait Part {
    /// Name used on the command line, in config tables and output files.
    const NAME: &'static str;

    type Params: DeserializeOwned + Default + Debug + Clone;

    /// Validate `params` and `res`, then build the bodies.
    fn build(params: &Self::Params, res: &Resolution) -> Result<Vec<Body>, PartError>;
}

/// Parameter overrides for every generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartParams {
    pub adjustable_arm: adjustable_arm::Params,
    pub bridgeport_spindle_clamp: bridgeport_spindle_clamp::Params,
    pub extrusion_clip: extrusion_clip::Params,
    pub indicator_base_adapter: indicator_base_adapter::Params,
    pub indicator_holder: indicator_holder::Params,
    pub m5camera_adapter: m5camera_adapter::Params,
    pub ring_led_clip: ring_led_clip::Params,
    pub round_platform: round_platform::Params,
}

/// Registry of the available generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    AdjustableArm,
    BridgeportSpindleClamp,
    ExtrusionClip,
    IndicatorBaseAdapter,
    IndicatorHolder,
    M5CameraAdapter,
    RingLedClip,
    RoundPlatform,
}

impl PartKind {
    pub const ALL: [PartKind; 8] = [
        PartKind::AdjustableArm,
        PartKind::BridgeportSpindleClamp,
        PartKind::ExtrusionClip,
        PartKind::IndicatorBaseAdapter,
        PartKind::IndicatorHolder,
        PartKind::M5CameraAdapter,
        PartKind::RingLedClip,
        PartKind::RoundPlatform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PartKind::AdjustableArm => adjustable_arm::AdjustableArm::NAME,
            PartKind::BridgeportSpindleClamp => bridgeport_spindle_clamp::SpindleClamp::NAME,
            PartKind::ExtrusionClip => extrusion_clip::ExtrusionClip::NAME,
            PartKind::IndicatorBaseAdapter => indicator_base_adapter::BaseAdapter::NAME,
            PartKind::IndicatorHolder => indicator_holder::IndicatorHolder::NAME,
            PartKind::M5CameraAdapter => m5camera_adapter::CameraAdapter::NAME,
            PartKind::RingLedClip => ring_led_clip::RingLedClip::NAME,
            PartKind::RoundPlatform => round_platform::RoundPlatform::NAME,
        }
    }

    /// One-line description for `fixturegen list`.
    pub fn summary(self) -> &'static str {
        match self {
            PartKind::AdjustableArm => {
                "ball-and-socket arm half with wedge lock and hex-bolt wedge"
            },
            PartKind::BridgeportSpindleClamp => {
                "split ring clamping a bolt head onto a mill spindle"
            },
            PartKind::ExtrusionClip => "snap-on clip profile for 30 mm aluminium extrusion",
            PartKind::IndicatorBaseAdapter => "block adapting the arm to a magnetic indicator base",
            PartKind::IndicatorHolder => "clamp for a 3/8\" indicator shaft on a bolt head",
            PartKind::M5CameraAdapter => "LEGO-beam bar mounting an M5 camera on a bolt head",
            PartKind::RingLedClip => "three-claw clip holding a ring LED board",
            PartKind::RoundPlatform => "thin round platform on a bolt head",
        }
    }

    /// Build with the matching parameter table.
    pub fn build(self, params: &PartParams, res: &Resolution) -> Result<Vec<Body>, PartError> {
        match self {
            PartKind::AdjustableArm => {
                run::<adjustable_arm::AdjustableArm>(&params.adjustable_arm, res)
            },
            PartKind::BridgeportSpindleClamp => run::<bridgeport_spindle_clamp::SpindleClamp>(
                &params.bridgeport_spindle_clamp,
                res,
            ),
            PartKind::ExtrusionClip => {
                run::<extrusion_clip::ExtrusionClip>(&params.extrusion_clip, res)
            },
            PartKind::IndicatorBaseAdapter => {
                run::<indicator_base_adapter::BaseAdapter>(&params.indicator_base_adapter, res)
            },
            PartKind::IndicatorHolder => {
                run::<indicator_holder::IndicatorHolder>(&params.indicator_holder, res)
            },
            PartKind::M5CameraAdapter => {
                run::<m5camera_adapter::CameraAdapter>(&params.m5camera_adapter, res)
            },
            PartKind::RingLedClip => run::<ring_led_clip::RingLedClip>(&params.ring_led_clip, res),
            PartKind::RoundPlatform => {
                run::<round_platform::RoundPlatform>(&params.round_platform, res)
            },
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown part name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown part `{0}`")]
pub struct UnknownPart(pub String);

impl FromStr for PartKind {
    type Err = UnknownPart;

    /// Accepts the snake_case name or the same with dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        PartKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownPart(s.to_string()))
    }
}

fn run<P: Part>(params: &P::Params, res: &Resolution) -> Result<Vec<Body>, PartError> {
    let _span = info_span!("part", name = P::NAME).entered();
    debug!(?params, ?res, "building");
    let bodies = P::build(params, res)?;
    for body in &bodies {
        debug!(
            body = %body.name,
            polygons = body.mesh.polygons.len(),
            "body complete"
        );
    }
    info!(bodies = bodies.len(), "part built");
    Ok(bodies)
}

/// `value` must be strictly positive (and finite).
pub(crate) fn positive(
    part: &'static str,
    name: &'static str,
    value: Real,
) -> Result<(), PartError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PartError::NonPositive { part, name, value })
    }
}

/// `value` must not be negative (and finite).
pub(crate) fn non_negative(
    part: &'static str,
    name: &'static str,
    value: Real,
) -> Result<(), PartError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PartError::NonPositive { part, name, value })
    }
}

/// A dimension computed from parameters must stay positive.
pub(crate) fn derived(
    part: &'static str,
    name: &'static str,
    value: Real,
) -> Result<Real, PartError> {
    if value.is_finite() && value > tolerance() {
        Ok(value)
    } else {
        Err(PartError::DegenerateDerived { part, name, value })
    }
}

/// A feature (hole, pocket) must be strictly smaller than what hosts it.
pub(crate) fn fits(
    part: &'static str,
    feature: &'static str,
    feature_size: Real,
    host: &'static str,
    host_size: Real,
) -> Result<(), PartError> {
    if feature_size < host_size - tolerance() {
        Ok(())
    } else {
        Err(PartError::DoesNotFit {
            part,
            feature,
            feature_size,
            host,
            host_size,
        })
    }
}

/// Angle strictly inside `(min, max)` degrees.
pub(crate) fn angle_between(
    part: &'static str,
    name: &'static str,
    value: Real,
    min: Real,
    max: Real,
) -> Result<(), PartError> {
    if value.is_finite() && value > min && value < max {
        Ok(())
    } else {
        Err(PartError::AngleOutOfRange {
            part,
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_names_round_trip() {
        for kind in PartKind::ALL {
            assert_eq!(kind.name().parse::<PartKind>(), Ok(kind));
        }
        assert_eq!("ring-led-clip".parse::<PartKind>(), Ok(PartKind::RingLedClip));
        assert!("teapot".parse::<PartKind>().is_err());
    }

    #[test]
    fn head_block_has_pocket_and_shaft_hole() {
        let bolt = BoltHead::default();
        let block = hex_head_block(18.0, 5.0, &bolt, &Resolution::draft());
        let bb = block.bounding_box();
        assert!((bb.maxs.z - bolt.block_thickness()).abs() < 1e-9);
        assert!((bb.maxs.x - 9.0).abs() < 1e-9);
        // pocket, shaft, and solid plastic behind a hex flat
        assert!(!block.contains_vertex(&nalgebra::Point3::new(4.0, 0.1, 1.0)));
        assert!(!block.contains_vertex(&nalgebra::Point3::new(0.1, 0.1, 5.5)));
        assert!(block.contains_vertex(&nalgebra::Point3::new(7.0, 0.1, 1.0)));
    }

    #[test]
    fn xz_frame_puts_pocket_on_the_minus_y_face() {
        let bolt = BoltHead::default();
        let frame = xz_head_block_frame(&bolt);
        let block = frame.place(&hex_head_block(18.0, 0.0, &bolt, &Resolution::draft()));
        let bb = block.bounding_box();
        assert!((bb.mins.y + bolt.block_thickness()).abs() < 1e-9);
        assert!(bb.maxs.y.abs() < 1e-9);
        // pocket opens at y = -6.25
        assert!(!block.contains_vertex(&nalgebra::Point3::new(4.0, -6.0, 0.1)));
        assert!(block.contains_vertex(&nalgebra::Point3::new(4.0, -1.0, 0.1)));
    }

    #[test]
    fn validation_helpers() {
        assert!(positive("p", "x", 1.0).is_ok());
        assert!(matches!(positive("p", "x", 0.0), Err(PartError::NonPositive { .. })));
        assert!(matches!(
            positive("p", "x", Real::NAN),
            Err(PartError::NonPositive { .. })
        ));
        assert!(fits("p", "hole", 3.0, "block", 2.0).is_err());
        assert!(angle_between("p", "a", 90.0, 0.0, 90.0).is_err());
    }
}
