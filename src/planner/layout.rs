//! Directory traversal for package layouts

use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use crate::planner::PackageFile;

/// Regular files under `root`, relative and sorted by path
///
/// Entries that cannot be read are skipped with a warning.
pub fn directory_files(root: &Path) -> Vec<PackageFile> {
    let mut files: Vec<PackageFile> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Skipping {}: {}", entry.path().display(), e);
                    return None;
                }
            };
            let relative = entry.path().strip_prefix(root).ok()?;
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            Some(PackageFile { path, size })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Recursive byte size of the regular files under `root`
pub fn directory_size(root: &Path) -> u64 {
    directory_files(root).iter().map(|file| file.size).sum()
}
