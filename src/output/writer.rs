//! Report file writer and media relocation

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AioError, AioResult};

/// Writes report files into one output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a text file atomically and return its final path
    pub fn write_text(&self, file_name: &str, contents: &str) -> AioResult<PathBuf> {
        let target = self.output_dir.join(file_name);
        self.ensure_output_directory()?;
        write_atomic(&target, contents.as_bytes())?;

        info!("Report written: {}", target.display());
        Ok(target)
    }

    /// Move a media file into the output directory under a new name
    pub fn relocate(&self, source: &Path, file_name: &str) -> AioResult<PathBuf> {
        let target = self.output_dir.join(file_name);
        if target == source {
            debug!("File already in place: {}", target.display());
            return Ok(target);
        }
        if target.exists() {
            return Err(AioError::OutputError {
                message: format!("Refusing to overwrite {}", target.display()),
            });
        }
        self.ensure_output_directory()?;

        if let Err(e) = std::fs::rename(source, &target) {
            // Cross-device moves fail with rename; fall back to copy + remove.
            warn!("Rename failed ({}), copying instead", e);
            std::fs::copy(source, &target).map_err(|e| AioError::OutputError {
                message: format!("Failed to copy {}: {}", source.display(), e),
            })?;
            std::fs::remove_file(source)?;
        }

        info!("Media file moved to {}", target.display());
        Ok(target)
    }

    fn ensure_output_directory(&self) -> AioResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| AioError::OutputError {
            message: format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ),
        })
    }
}

/// Write through a temporary sibling file, then rename over the target
pub fn write_atomic(target: &Path, data: &[u8]) -> AioResult<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = target.file_name().ok_or_else(|| AioError::OutputError {
        message: format!("Invalid output file path: {}", target.display()),
    })?;

    let temp = tempfile::Builder::new()
        .prefix(&format!(".tmp_{}", file_name.to_string_lossy()))
        .tempfile_in(dir)
        .map_err(|e| AioError::OutputError {
            message: format!("Failed to create temporary file in {}: {}", dir.display(), e),
        })?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        writer.write_all(data)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(target).map_err(|e| AioError::OutputError {
        message: format!("Failed to rename temporary file: {}", e.error),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_text_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path().join("nested/out"));

        let path = writer.write_text("release.nfo", "╔═╗\n").unwrap();

        assert_eq!(path, dir.path().join("nested/out/release.nfo"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "╔═╗\n");
        let entries = std::fs::read_dir(dir.path().join("nested/out")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_text_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());
        writer.write_text("a.bbcode", "old").unwrap();
        writer.write_text("a.bbcode", "new").unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("a.bbcode")).unwrap(), "new");
    }

    #[test]
    fn test_relocate_renames_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("movie.mkv");
        std::fs::write(&source, b"data").unwrap();

        let writer = ReportWriter::new(dir.path().join("out"));
        let target = writer.relocate(&source, "Movie.2023.1080p-AIO.mkv").unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(&target).unwrap(), b"data");
    }

    #[test]
    fn test_relocate_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.mkv");
        std::fs::write(&source, b"a").unwrap();
        std::fs::write(dir.path().join("b.mkv"), b"b").unwrap();

        let writer = ReportWriter::new(dir.path());
        assert!(writer.relocate(&source, "b.mkv").is_err());
        assert!(source.exists());
    }

    #[test]
    fn test_relocate_same_path_is_noop() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.mkv");
        std::fs::write(&source, b"a").unwrap();

        let writer = ReportWriter::new(dir.path());
        assert_eq!(writer.relocate(&source, "a.mkv").unwrap(), source);
    }
}
