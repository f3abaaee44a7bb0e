use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::adapters::{
    JsonMovieAdapter, LavaTorrentAdapter, MediaInfoProbeAdapter, TmdbScrapeAdapter,
};
use crate::app::process_interactor::ProcessInteractor;
use crate::config::AppConfig;
use crate::error::AioResult;
use crate::ports::{MoviePort, ProbePort, TorrentPort};

pub trait AppContainer: Send + Sync {
    fn process_interactor(&self) -> Arc<ProcessInteractor>;
}

pub struct DefaultAppContainer {
    process_interactor: Arc<ProcessInteractor>,
}

impl DefaultAppContainer {
    /// Wire the mediainfo probe, the TMDB scraper and the torrent writer
    pub fn new(config: AppConfig) -> AioResult<Self> {
        Self::with_movie_source(config, None)
    }

    /// Wire the adapters, reading the movie record from `movie_json` when given
    pub fn with_movie_source(config: AppConfig, movie_json: Option<&Path>) -> AioResult<Self> {
        let probe_port: Arc<dyn ProbePort> =
            Arc::new(MediaInfoProbeAdapter::new(&config.mediainfo_path));

        let movie_port: Arc<dyn MoviePort> = match movie_json {
            Some(path) => {
                debug!("Movie source: {}", path.display());
                Arc::new(JsonMovieAdapter::new(path))
            }
            None => {
                debug!("Movie source: TMDB ({})", config.tmdb_language);
                Arc::new(TmdbScrapeAdapter::new(&config.tmdb_language)?)
            }
        };

        let torrent_port: Arc<dyn TorrentPort> = Arc::new(LavaTorrentAdapter::new(
            config.announce_url.clone(),
            config.private_torrent,
        ));

        let process_interactor = Arc::new(ProcessInteractor::new(
            probe_port,
            movie_port,
            torrent_port,
            config,
        ));

        Ok(Self { process_interactor })
    }
}

impl AppContainer for DefaultAppContainer {
    fn process_interactor(&self) -> Arc<ProcessInteractor> {
        Arc::clone(&self.process_interactor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_with_json_movie_source() {
        let config = AppConfig {
            group_name: "GRP".to_string(),
            ..Default::default()
        };
        let container =
            DefaultAppContainer::with_movie_source(config, Some(Path::new("movie.json"))).unwrap();
        assert_eq!(container.process_interactor().config().group_name, "GRP");
    }

    #[test]
    fn test_container_with_tmdb() {
        let container = DefaultAppContainer::new(AppConfig::default()).unwrap();
        assert_eq!(container.process_interactor().config().tmdb_language, "fr-FR");
    }
}
