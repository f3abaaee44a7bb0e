//! mediainfo subprocess runner

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::model::FactSheet;
use crate::error::{AioError, AioResult};
use crate::probe::parse_document;

/// Runs `mediainfo --Output=JSON` on media files
#[derive(Debug, Clone)]
pub struct MediaInfoInspector {
    binary: PathBuf,
}

impl Default for MediaInfoInspector {
    fn default() -> Self {
        Self::new("mediainfo")
    }
}

impl MediaInfoInspector {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Inspect a media file and build its fact sheet
    pub async fn inspect(&self, path: &Path) -> AioResult<FactSheet> {
        info!("Inspecting media file: {}", path.display());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| AioError::InputFileNotFound {
                path: path.display().to_string(),
            })?;
        if !metadata.is_file() {
            return Err(AioError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }

        let output = Command::new(&self.binary)
            .arg("--Output=JSON")
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| AioError::ProbeError {
                message: format!("Failed to run {}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AioError::ProbeError {
                message: format!("mediainfo exited with {}: {}", output.status, stderr.trim()),
            });
        }

        let json = String::from_utf8_lossy(&output.stdout);
        debug!(bytes = json.len(), "mediainfo output received");

        let sheet = parse_document(&json, path, metadata.len())?;
        info!(
            "Probe complete: {} {}x{}, {} audio, {} subtitle track(s)",
            sheet.container,
            sheet.video.width,
            sheet.video.height,
            sheet.audio.len(),
            sheet.subtitles.len()
        );
        Ok(sheet)
    }
}
