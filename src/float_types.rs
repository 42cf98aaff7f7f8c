//! Scalar type, tolerances and unit constants shared by the kernel and the parts.

use core::str::FromStr;
use std::sync::OnceLock;

// Re-export parry for the f64 scalar
pub use parry3d_f64 as parry3d;

/// Scalar used for every coordinate in the crate.
pub type Real = f64;

/// Linear tolerance for plane classification and degenerate-edge checks.
pub const EPSILON: Real = 1e-5;

/// Lazily-initialized tolerance used when comparing derived part dimensions.
///  1) **Build-time**: set env var `FIXTUREGEN_TOLERANCE` (e.g. `FIXTUREGEN_TOLERANCE=1e-6`)
///  2) **Runtime**: call [`set_tolerance`] once before building any part
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

const DEFAULT_TOLERANCE: Real = 1e-6;

/// Returns the current tolerance value.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("FIXTUREGEN_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;
/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;
/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
/// 1/√2, the 45° projection factor used all over the arm geometry
pub const FRAC_1_SQRT_2: Real = core::f64::consts::FRAC_1_SQRT_2;
