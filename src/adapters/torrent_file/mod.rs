//! lava_torrent adapter writing v1 `.torrent` metainfo files

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use lava_torrent::bencode::BencodeElem;
use lava_torrent::torrent::v1::{Torrent, TorrentBuilder};
use tracing::{debug, info};

use crate::error::{AioError, AioResult};
use crate::output::writer::write_atomic;
use crate::planner::PackagePlan;
use crate::ports::TorrentPort;

pub const COMMENT: &str = "Created by Torrent All-In-One";

fn created_by() -> String {
    format!("torrent-aio/{}", env!("CARGO_PKG_VERSION"))
}

fn torrent_error(message: impl ToString) -> AioError {
    AioError::TorrentError {
        message: message.to_string(),
    }
}

/// Torrent adapter hashing content with lava_torrent
#[derive(Debug, Clone, Default)]
pub struct LavaTorrentAdapter {
    announce_url: Option<String>,
    private: bool,
}

impl LavaTorrentAdapter {
    pub fn new(announce_url: Option<String>, private: bool) -> Self {
        Self {
            announce_url,
            private,
        }
    }

    /// Build the metainfo for a plan, hashing its content with the plan's piece length
    pub fn build(&self, plan: &PackagePlan) -> AioResult<Torrent> {
        let piece_length = i64::try_from(plan.piece_length)
            .map_err(|_| torrent_error(format!("piece length {} is too large", plan.piece_length)))?;

        let mut builder = TorrentBuilder::new(&plan.root, piece_length)
            .add_extra_field("comment".to_string(), BencodeElem::String(COMMENT.to_string()))
            .add_extra_field("created by".to_string(), BencodeElem::String(created_by()))
            .add_extra_field(
                "creation date".to_string(),
                BencodeElem::Integer(Utc::now().timestamp()),
            );
        if let Some(url) = &self.announce_url {
            builder = builder.set_announce(Some(url.clone()));
        }
        if self.private {
            builder = builder.set_privacy(true);
        }

        debug!(
            "Hashing {} ({} bytes, {} pieces)",
            plan.root.display(),
            plan.total_size,
            plan.piece_count()
        );
        builder.build().map_err(torrent_error)
    }

    /// Build and write the metainfo file
    pub fn write(&self, plan: &PackagePlan, target: &Path) -> AioResult<()> {
        let torrent = self.build(plan)?;
        let bytes = torrent.clone().encode().map_err(torrent_error)?;
        write_atomic(target, &bytes)?;
        info!("Torrent written: {} (info hash {})", target.display(), torrent.info_hash());
        Ok(())
    }
}

#[async_trait]
impl TorrentPort for LavaTorrentAdapter {
    async fn create(&self, plan: &PackagePlan, target: &Path) -> AioResult<()> {
        let adapter = self.clone();
        let plan = plan.clone();
        let target: PathBuf = target.to_path_buf();
        tokio::task::spawn_blocking(move || adapter.write(&plan, &target))
            .await
            .map_err(torrent_error)?
    }
}
