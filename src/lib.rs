//! Parametric generators for 3D-printable fixtures.
//!
//! Parts are composed from 2D [`sketch`] profiles and 3D [`mesh`]
//! primitives through the Boolean operations of the [`CSG`] trait, which
//! operate on polygon soups stored in [BSP](mesh::bsp) trees. Each
//! generator in [`parts`] turns a parameter struct into named bodies that
//! [`io`] writes out as STL.
//!
//! ```rust
//! use fixturegen::parts::{PartKind, PartParams, Resolution};
//!
//! let bodies = PartKind::RoundPlatform
//!     .build(&PartParams::default(), &Resolution::draft())
//!     .expect("default parameters are valid");
//! assert_eq!(bodies[0].name, "platform");
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod parts;
pub mod sketch;
pub mod traits;
pub mod workplane;

pub use errors::{IoError, PartError, ValidationError};
pub use mesh::Mesh;
pub use sketch::Sketch;
pub use traits::CSG;
pub use workplane::Workplane;
