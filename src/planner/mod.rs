//! Package layout planning - piece length and content size

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AioError, AioResult};

pub mod layout;

pub use layout::{directory_files, directory_size};

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * MIB;

/// Piece length staircase as `(max content size, piece length)`, inclusive bounds
const PIECE_STEPS: &[(u64, u64)] = &[
    (GIB, MIB),
    (2 * GIB, 2 * MIB),
    (4 * GIB, 4 * MIB),
    (8 * GIB, 8 * MIB),
];
const MAX_PIECE_LENGTH: u64 = 16 * MIB;

/// Piece length for a package of `total_size` bytes
pub fn piece_length(total_size: u64) -> u64 {
    PIECE_STEPS
        .iter()
        .find(|(limit, _)| total_size <= *limit)
        .map_or(MAX_PIECE_LENGTH, |(_, piece)| *piece)
}

/// One member file of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFile {
    /// Path relative to the package root, `/`-separated
    pub path: String,
    pub size: u64,
}

/// Layout decisions handed to the content hasher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePlan {
    pub root: PathBuf,
    pub is_dir: bool,
    pub total_size: u64,
    pub piece_length: u64,
    /// Member files sorted by path
    pub files: Vec<PackageFile>,
}

impl PackagePlan {
    /// Number of pieces the content splits into
    pub fn piece_count(&self) -> u64 {
        if self.piece_length == 0 {
            return 0;
        }
        self.total_size.div_ceil(self.piece_length)
    }

    /// Piece length for display, e.g. `4 MiB`
    pub fn piece_length_formatted(&self) -> String {
        format!("{} MiB", self.piece_length / MIB)
    }
}

/// Plan the package for a single file or a directory tree
pub fn plan_path(path: &Path) -> AioResult<PackagePlan> {
    let metadata = std::fs::metadata(path).map_err(|_| AioError::InputFileNotFound {
        path: path.display().to_string(),
    })?;

    let (total_size, files) = if metadata.is_dir() {
        (directory_size(path), directory_files(path))
    } else {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        (
            metadata.len(),
            vec![PackageFile {
                path: name,
                size: metadata.len(),
            }],
        )
    };

    let plan = PackagePlan {
        root: path.to_path_buf(),
        is_dir: metadata.is_dir(),
        total_size,
        piece_length: piece_length(total_size),
        files,
    };

    info!(
        "Planned package: {} bytes, piece length {}, {} pieces",
        plan.total_size,
        plan.piece_length_formatted(),
        plan.piece_count()
    );
    Ok(plan)
}
