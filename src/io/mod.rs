//! Writing generated bodies to disk.

use crate::errors::IoError;
use crate::parts::Body;
use std::path::{Path, PathBuf};
use tracing::debug;

mod stl;

/// STL flavour used by [`write_bodies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    BinaryStl,
    AsciiStl,
}

impl ExportFormat {
    pub const fn from_ascii_flag(ascii: bool) -> Self {
        if ascii {
            ExportFormat::AsciiStl
        } else {
            ExportFormat::BinaryStl
        }
    }
}

/// File name of one body of a part: `<part>_<body>.stl`.
pub fn body_file_name(part: &str, body: &str) -> String {
    format!("{part}_{body}.stl")
}

/// Write every body of `part` into `dir`, creating it if needed.
/// Returns the written paths in body order.
pub fn write_bodies(
    dir: &Path,
    part: &str,
    bodies: &[Body],
    format: ExportFormat,
) -> Result<Vec<PathBuf>, IoError> {
    std::fs::create_dir_all(dir).map_err(|source| IoError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(bodies.len());
    for body in bodies {
        let path = dir.join(body_file_name(part, &body.name));
        let solid_name = format!("{part}_{}", body.name);
        let bytes = match format {
            ExportFormat::AsciiStl => body.mesh.to_stl_ascii(&solid_name).into_bytes(),
            ExportFormat::BinaryStl => body.mesh.to_stl_binary(&solid_name)?,
        };
        std::fs::write(&path, &bytes).map_err(|source| IoError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote body");
        written.push(path);
    }
    Ok(written)
}
