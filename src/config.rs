//! TOML configuration: tessellation, export settings and per-part overrides.
//!
//! ```toml
//! [resolution]
//! segments = 64
//!
//! [export]
//! out_dir = "stl"
//! ascii = true
//!
//! [round_platform]
//! radius = 40.0
//! ```
//!
//! Every table and key is optional; anything left out keeps its default.

use crate::errors::IoError;
use crate::io::ExportFormat;
use crate::parts::{PartParams, Resolution};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub out_dir: PathBuf,
    pub ascii: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            ascii: false,
        }
    }
}

impl ExportConfig {
    pub const fn format(&self) -> ExportFormat {
        ExportFormat::from_ascii_flag(self.ascii)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub resolution: Resolution,
    pub export: ExportConfig,
    #[serde(flatten)]
    pub parts: PartParams,
}

impl FixtureConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, IoError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = FixtureConfig::from_toml_str("").expect("empty toml");
        assert_eq!(config.resolution, Resolution::default());
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.parts.round_platform.radius, 30.0);
    }

    #[test]
    fn overrides_merge_with_defaults() {
        let config = FixtureConfig::from_toml_str(
            r#"
            [resolution]
            segments = 64

            [ring_led_clip]
            radius = 42.5

            [adjustable_arm]
            wedge_angle = 30.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.resolution.segments, 64);
        assert_eq!(config.resolution.stacks, 24);
        assert_eq!(config.parts.ring_led_clip.radius, 42.5);
        assert_eq!(config.parts.ring_led_clip.ring_height, 4.0);
        assert_eq!(config.parts.adjustable_arm.wedge_angle, 30.0);
    }

    #[test]
    fn misspelled_part_parameter_is_rejected() {
        let err = FixtureConfig::from_toml_str("[round_platform]\nradus = 40.0\n")
            .expect_err("unknown key inside a part table");
        assert!(matches!(err, IoError::Config(_)));
        assert!(err.to_string().contains("radus"));

        let err = FixtureConfig::from_toml_str("[resolution]\nsegmnets = 64\n")
            .expect_err("unknown key in resolution");
        assert!(matches!(err, IoError::Config(_)));
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = FixtureConfig::from_toml_str("[resolution]\nsegments = \"many\"")
            .expect_err("string for an integer");
        assert!(matches!(err, IoError::Config(_)));
    }
}
