use fixturegen::{
    config::FixtureConfig,
    io::{ExportFormat, body_file_name, write_bodies},
    parts::{PartKind, Resolution},
};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fixturegen-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn writes_one_binary_stl_per_body() {
    let config = FixtureConfig::default();
    let bodies = PartKind::AdjustableArm
        .build(&config.parts, &Resolution::draft())
        .expect("arm builds");
    let dir = scratch_dir("binary").join("nested");

    let paths = write_bodies(&dir, "adjustable_arm", &bodies, ExportFormat::BinaryStl)
        .expect("export succeeds");
    assert_eq!(
        paths,
        [
            dir.join("adjustable_arm_arm.stl"),
            dir.join("adjustable_arm_wedge_block_hex_bolt.stl"),
        ]
    );
    for path in &paths {
        let mut file = std::fs::File::open(path).expect("written file");
        let stl = stl_io::read_stl(&mut file).expect("valid binary stl");
        assert!(!stl.faces.is_empty());
    }
    let _ = std::fs::remove_dir_all(dir.parent().expect("scratch root"));
}

#[test]
fn ascii_export_names_the_solid() {
    let config = FixtureConfig::from_toml_str("[export]\nascii = true\n").expect("config");
    assert_eq!(config.export.format(), ExportFormat::AsciiStl);

    let bodies = PartKind::RoundPlatform
        .build(&config.parts, &Resolution::draft())
        .expect("platform builds");
    let dir = scratch_dir("ascii");
    let paths = write_bodies(&dir, "round_platform", &bodies, config.export.format())
        .expect("export succeeds");

    let text = std::fs::read_to_string(&paths[0]).expect("ascii file");
    assert!(text.starts_with("solid round_platform_platform"));
    assert_eq!(body_file_name("round_platform", "platform"), "round_platform_platform.stl");
    let _ = std::fs::remove_dir_all(&dir);
}
