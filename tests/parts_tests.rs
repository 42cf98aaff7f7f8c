mod support;

use fixturegen::{
    errors::{PartError, ValidationError},
    parts::{
        Body, Part, PartKind, PartParams, Resolution,
        adjustable_arm::{self, ArmGeometry},
        round_platform::{self, RoundPlatform},
    },
};

use crate::support::{approx_eq, assert_bounds, assert_closed, bounding_box, solid_at};

fn build_default(kind: PartKind) -> Vec<Body> {
    kind.build(&PartParams::default(), &Resolution::draft())
        .unwrap_or_else(|err| panic!("{kind} failed with default parameters: {err}"))
}

fn assert_closed_bodies(res: &Resolution) {
    for kind in PartKind::ALL {
        let bodies = kind
            .build(&PartParams::default(), res)
            .unwrap_or_else(|err| panic!("{kind} failed at {res:?}: {err}"));
        assert!(!bodies.is_empty(), "{kind} produced no bodies");
        for body in &bodies {
            let label = format!("{kind}/{} at {} segments", body.name, res.segments);
            assert!(!body.mesh.is_empty(), "{label} is empty");
            assert!(body.mesh.volume() > 0.0, "{label} has non-positive volume");
            assert_closed(&body.mesh, &label);
        }
    }
}

#[test]
fn every_part_builds_closed_bodies_at_draft_resolution() {
    assert_closed_bodies(&Resolution::draft());
}

#[test]
fn every_part_builds_closed_bodies_at_default_resolution() {
    assert_closed_bodies(&Resolution::default());
}

#[test]
fn body_names() {
    let names = |kind| {
        build_default(kind)
            .into_iter()
            .map(|b| b.name)
            .collect::<Vec<_>>()
    };
    assert_eq!(
        names(PartKind::AdjustableArm),
        ["arm", "wedge_block_hex_bolt"]
    );
    assert_eq!(names(PartKind::RoundPlatform), ["platform"]);
    assert_eq!(names(PartKind::RingLedClip), ["clip"]);
}

#[test]
fn round_platform_disc_and_head_block() {
    let platform = &build_default(PartKind::RoundPlatform)[0].mesh;
    // the head block stands on the rim at +Y and is 18 tall
    assert_bounds(platform, [-30.0, -30.0, 0.0, 30.0, 30.0, 18.0], 1e-6);
    assert!(solid_at(platform, 0.0, 0.0, 0.6));
    assert!(!solid_at(platform, 0.0, 0.0, 2.0));
    // shaft hole through the head block
    assert!(!solid_at(platform, 0.0, 28.0, 9.0));
    assert!(solid_at(platform, 7.0, 28.5, 9.0));
}

#[test]
fn base_adapter_holes() {
    let adapter = &build_default(PartKind::IndicatorBaseAdapter)[0].mesh;
    assert_bounds(adapter, [-15.0, -20.0, 0.0, 15.0, 20.0, 12.5], 1e-6);
    assert!(solid_at(adapter, 10.0, 0.0, 6.0));
    assert!(!solid_at(adapter, 0.0, -7.5, 6.0), "base fastener hole");
    assert!(!solid_at(adapter, 0.0, 7.5, 8.0), "arm shaft hole");
    assert!(!solid_at(adapter, 4.5, 7.5, 2.0), "hex pocket");
    assert!(solid_at(adapter, 4.5, 7.5, 8.0), "above the hex pocket");
}

#[test]
fn spindle_clamp_bore_and_split() {
    let clamp = &build_default(PartKind::BridgeportSpindleClamp)[0].mesh;
    assert!(!solid_at(clamp, 0.0, 0.0, 0.0), "spindle bore");
    assert!(solid_at(clamp, 28.0, 0.0, 0.0), "ring wall");
    assert!(!solid_at(clamp, 0.0, -27.0, 0.0), "slot through the ring");
    assert!(solid_at(clamp, 3.0, -27.0, 0.0), "ring wall beside the slot");
    let bb = bounding_box(clamp);
    assert!(approx_eq(bb[2], -5.0, 1e-6));
}

#[test]
fn extrusion_clip_spans_its_length() {
    let clip = &build_default(PartKind::ExtrusionClip)[0].mesh;
    let bb = bounding_box(clip);
    assert!(approx_eq(bb[2], -20.0, 1e-6));
    assert!(approx_eq(bb[5], 20.0, 1e-6));
    assert!(approx_eq(bb[3], 16.7, 1e-6));
}

#[test]
fn ring_led_clip_stays_within_the_ring() {
    let clip = &build_default(PartKind::RingLedClip)[0].mesh;
    let bb = bounding_box(clip);
    assert!(bb[3] <= 31.6 + 1e-6);
    assert!(approx_eq(bb[2], -2.0, 1e-6));
    assert!(approx_eq(bb[5], 2.0, 1e-6));
}

#[test]
fn indicator_holder_clamp_features() {
    let holder = &build_default(PartKind::IndicatorHolder)[0].mesh;
    // clamp block beside the 15 mm head block, shaft axis at x = -10.2875, y = 13.025
    assert!(solid_at(holder, -18.6, 16.5, 5.0), "clamp block");
    assert!(!solid_at(holder, -10.2875, 16.025, 3.0), "indicator shaft hole");
    assert!(!solid_at(holder, -20.0, 13.025, 5.0), "slit from the free end");
    assert!(!solid_at(holder, -18.6, 16.5, 0.0), "clamp screw hole");
    assert!(!solid_at(holder, 2.0, 4.0, 0.0), "bolt head pocket");
    assert!(solid_at(holder, 5.5, 4.0, 0.0), "plastic behind the bolt head");
}

#[test]
fn camera_adapter_pocket_shaft_and_pins() {
    let adapter = &build_default(PartKind::M5CameraAdapter)[0].mesh;
    assert!(!solid_at(adapter, 2.0, 4.0, 5.5), "bolt head pocket");
    assert!(!solid_at(adapter, 5.5, 0.0, 5.5), "bolt shaft hole");
    assert!(solid_at(adapter, 5.5, 10.0, 5.5), "plate beside the shaft");
    assert!(solid_at(adapter, -5.0, 10.0, -12.0), "LEGO bar");
    assert!(!solid_at(adapter, -5.0, 16.1, -12.0), "pin hole");
    assert!(!solid_at(adapter, -2.2, 16.1, -16.0), "pin hole lip");
}

#[test]
fn wedge_block_pocket_and_fastener_hole() {
    let wedge = &build_default(PartKind::AdjustableArm)[1].mesh;
    assert!(!solid_at(wedge, 0.0, 50.0, 2.0), "fastener hole");
    assert!(solid_at(wedge, 5.0, 50.0, 2.0), "wedge below the pocket");
    assert!(!solid_at(wedge, 5.0, 50.0, 6.0), "hex bolt head pocket");
    assert!(solid_at(wedge, 8.0, 50.0, 6.0), "wedge beside the pocket");
    assert!(!solid_at(wedge, 8.0, 50.0, 10.5), "trimmed above the head");
}

#[test]
fn end_ball_captive_nut_and_blind_shaft() {
    let params = adjustable_arm::Params::default();
    let ball = adjustable_arm::end_ball(&params, &Resolution::draft()).expect("end ball");
    assert_closed(&ball, "end ball");
    assert!(!solid_at(&ball, 0.0, 0.0, -7.0), "fastener shaft from below");
    assert!(solid_at(&ball, 0.0, 0.0, 7.0), "shaft is blind");
    assert!(!solid_at(&ball, 4.5, 0.0, 0.0), "captive nut");
    assert!(solid_at(&ball, 4.5, 0.0, 4.0), "ball above the nut");
}

#[test]
fn arm_shell_runs_between_socket_and_mid_joint() {
    let arm = &build_default(PartKind::AdjustableArm)[0].mesh;
    assert!(solid_at(arm, 5.0, 25.0, 9.0));
}

#[test]
fn arm_is_chopped_at_the_cutoff_plane() {
    let params = PartParams::default();
    let geometry = ArmGeometry::derive(&params.adjustable_arm).expect("default geometry");
    let arm = &build_default(PartKind::AdjustableArm)[0].mesh;
    let bb = bounding_box(arm);
    assert!(bb[2] >= geometry.cutoff_z - 1e-6);
}

#[test]
fn arm_repositioned_for_printing_sits_on_the_bed() {
    let mut params = PartParams::default();
    params.adjustable_arm.reposition_for_printing = true;
    let bodies = PartKind::AdjustableArm
        .build(&params, &Resolution::draft())
        .expect("arm");
    let bb = bounding_box(&bodies[0].mesh);
    assert!(approx_eq(bb[2], 0.0, 1e-6), "arm min z {}", bb[2]);
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut params = PartParams::default();
    params.round_platform.radius = -1.0;
    let err = PartKind::RoundPlatform
        .build(&params, &Resolution::draft())
        .expect_err("negative radius");
    assert!(matches!(
        err,
        PartError::NonPositive {
            name: "radius",
            ..
        }
    ));

    let mut params = PartParams::default();
    params.adjustable_arm.wedge_angle = 0.0;
    assert!(matches!(
        PartKind::AdjustableArm.build(&params, &Resolution::draft()),
        Err(PartError::AngleOutOfRange { .. })
    ));
}

#[test]
fn coarse_resolution_is_rejected() {
    let res = Resolution {
        segments: 4,
        stacks: 8,
    };
    let err = PartKind::RoundPlatform
        .build(&PartParams::default(), &res)
        .expect_err("too coarse");
    assert!(matches!(
        err,
        PartError::Geometry(ValidationError::TooFewSegments { .. })
    ));
}

#[test]
fn coarse_resolution_is_rejected_by_direct_builds() {
    let res = Resolution {
        segments: 6,
        stacks: 2,
    };
    assert!(matches!(
        RoundPlatform::build(&round_platform::Params::default(), &res),
        Err(PartError::Geometry(ValidationError::TooFewSegments { min: 8, got: 6, .. }))
    ));
    assert!(matches!(
        adjustable_arm::end_ball(&adjustable_arm::Params::default(), &res),
        Err(PartError::Geometry(ValidationError::TooFewSegments { .. }))
    ));
}

#[test]
fn part_names_parse_with_dashes() {
    assert_eq!(
        "m5camera-adapter".parse::<PartKind>(),
        Ok(PartKind::M5CameraAdapter)
    );
    assert!("teapot".parse::<PartKind>().is_err());
}
