//! mediainfo adapter for media file probing

use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::FactSheet;
use crate::error::AioResult;
use crate::ports::ProbePort;
use crate::probe::MediaInfoInspector;

/// Probe adapter running the mediainfo command line tool
#[derive(Debug, Clone, Default)]
pub struct MediaInfoProbeAdapter {
    inspector: MediaInfoInspector,
}

impl MediaInfoProbeAdapter {
    pub fn new(binary: impl Into<std::path::PathBuf>) -> Self {
        Self {
            inspector: MediaInfoInspector::new(binary),
        }
    }
}

#[async_trait]
impl ProbePort for MediaInfoProbeAdapter {
    async fn probe(&self, path: &Path) -> AioResult<FactSheet> {
        self.inspector.inspect(path).await
    }
}
