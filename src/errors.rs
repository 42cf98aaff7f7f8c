//! Error types for geometry construction, part parameters and export

use crate::float_types::Real;
use nalgebra::Point3;
use std::path::PathBuf;

/// Geometry that cannot be constructed from the given inputs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A ring or polygon has fewer than the minimal number of points
    #[error("(TooFewPoints) A ring or polygon has fewer than 3 points at: {0}")]
    TooFewPoints(Point3<Real>),
    /// The coordinate has a NaN or infinite component
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// A polyhedron face references a point that does not exist
    #[error("Face index {index} is out of range (points.len = {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Revolve sweep angle outside (0, 360]
    #[error("revolve angle must be in (0, 360] degrees, got {0}")]
    InvalidRevolveAngle(Real),
    /// Too few segments for a sweep or tessellation
    #[error("{operation} requires at least {min} segments, got {got}")]
    TooFewSegments {
        operation: &'static str,
        min: usize,
        got: usize,
    },
    /// Loft profiles must pair up vertex for vertex
    #[error("loft: both profiles must have the same number of vertices ({bottom} vs {top})")]
    MismatchedProfiles { bottom: usize, top: usize },
    /// Revolved profile crosses the revolution axis
    #[error("revolve: profile crosses the axis at x = {0}")]
    ProfileCrossesAxis(Real),
    /// In general, anything else
    #[error("{0}")]
    Other(String),
}

/// A part could not be generated from its parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PartError {
    /// A dimension that must be strictly positive is not
    #[error("{part}: parameter `{name}` must be positive, got {value}")]
    NonPositive {
        part: &'static str,
        name: &'static str,
        value: Real,
    },
    /// An angle outside its open interval
    #[error("{part}: angle `{name}` = {value} must lie strictly between {min} and {max} degrees")]
    AngleOutOfRange {
        part: &'static str,
        name: &'static str,
        value: Real,
        min: Real,
        max: Real,
    },
    /// A dimension computed from the parameters collapsed
    #[error("{part}: derived dimension `{name}` = {value} is not positive")]
    DegenerateDerived {
        part: &'static str,
        name: &'static str,
        value: Real,
    },
    /// A hole or pocket does not fit inside the material around it
    #[error("{part}: {feature} ({feature_size}) does not fit inside {host} ({host_size})")]
    DoesNotFit {
        part: &'static str,
        feature: &'static str,
        feature_size: Real,
        host: &'static str,
        host_size: Real,
    },
    /// The geometry layer rejected an intermediate shape
    #[error(transparent)]
    Geometry(#[from] ValidationError),
}

/// Export and configuration failures
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PartError::NonPositive {
            part: "round_platform",
            name: "radius",
            value: -1.0,
        };
        assert_eq!(
            format!("{err}"),
            "round_platform: parameter `radius` must be positive, got -1"
        );

        let err = ValidationError::MismatchedProfiles { bottom: 4, top: 6 };
        assert!(format!("{err}").contains("4 vs 6"));
    }

    #[test]
    fn test_geometry_error_converts() {
        let err: PartError = ValidationError::InvalidRevolveAngle(0.0).into();
        assert!(matches!(err, PartError::Geometry(_)));
    }
}
