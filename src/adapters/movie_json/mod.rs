//! Movie record loaded from a local JSON file

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::model::Movie;
use crate::error::{AioError, AioResult};
use crate::ports::MoviePort;

/// Movie port serving a single record from disk
///
/// Stands in for the movie database when the record is already known.
#[derive(Debug, Clone)]
pub struct JsonMovieAdapter {
    path: PathBuf,
}

impl JsonMovieAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and decode the movie record
    pub async fn load(&self) -> AioResult<Movie> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|_| {
            AioError::InputFileNotFound {
                path: self.path.display().to_string(),
            }
        })?;
        let movie: Movie = serde_json::from_str(&contents)?;
        info!("Loaded movie record from {}: {}", self.path.display(), movie.title);
        Ok(movie)
    }
}

#[async_trait]
impl MoviePort for JsonMovieAdapter {
    async fn search(&self, _query: &str) -> AioResult<Vec<Movie>> {
        Ok(vec![self.load().await?])
    }

    async fn details(&self, id: u64) -> AioResult<Movie> {
        let movie = self.load().await?;
        if id != 0 && movie.id != id {
            warn!("Requested movie {} but {} holds {}", id, self.path.display(), movie.id);
        }
        Ok(movie)
    }
}
