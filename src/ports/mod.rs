// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::AioResult;
use crate::planner::PackagePlan;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file into its fact sheet
    async fn probe(&self, path: &Path) -> AioResult<FactSheet>;
}

/// Port for the movie database
#[async_trait]
pub trait MoviePort: Send + Sync {
    /// Search movies by keywords, best match first
    async fn search(&self, query: &str) -> AioResult<Vec<Movie>>;

    /// Full movie record by database id
    async fn details(&self, id: u64) -> AioResult<Movie>;
}

/// Port for torrent metainfo creation
#[async_trait]
pub trait TorrentPort: Send + Sync {
    /// Hash the planned content and write its `.torrent` file to `target`
    async fn create(&self, plan: &PackagePlan, target: &Path) -> AioResult<()>;
}
