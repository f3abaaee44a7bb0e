//! torrent-aio library
//!
//! Movie release preparation: classifies a media file's technical facts into
//! scene tags, composes the release name, renders the NFO and BBCode reports
//! and plans the torrent package layout.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use domain::model::{AudioFacts, FactSheet, Movie, SubtitleFacts, VideoFacts};
pub use domain::naming::ReleaseNamer;
pub use error::{AioError, AioResult};
pub use planner::{plan_path, PackagePlan};
