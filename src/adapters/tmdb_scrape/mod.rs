//! TMDB adapter scraping the public website

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::domain::model::Movie;
use crate::error::{AioError, AioResult};
use crate::ports::MoviePort;

pub mod parse;

pub const TMDB_BASE_URL: &str = "https://www.themoviedb.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Movie port backed by TMDB HTML pages
#[derive(Debug, Clone)]
pub struct TmdbScrapeAdapter {
    client: Client,
    base_url: String,
    language: String,
}

impl TmdbScrapeAdapter {
    /// Create an adapter requesting pages in `language` (e.g. `fr-FR`)
    pub fn new(language: impl Into<String>) -> AioResult<Self> {
        Self::with_base_url(TMDB_BASE_URL, language)
    }

    pub fn with_base_url(base_url: impl Into<String>, language: impl Into<String>) -> AioResult<Self> {
        let language = language.into();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        let accept_language = HeaderValue::from_str(&format!("{},en;q=0.5", language))
            .map_err(|e| AioError::ConfigError {
                message: format!("Invalid TMDB language '{}': {}", language, e),
            })?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> AioResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("language", self.language.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AioError::TmdbError {
                message: format!("{} returned {}", url, status),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MoviePort for TmdbScrapeAdapter {
    async fn search(&self, query: &str) -> AioResult<Vec<Movie>> {
        info!("Searching TMDB for \"{}\"", query);
        let html = self.fetch("/search/movie", &[("query", query)]).await?;
        let movies = parse::parse_search_results(&html)?;
        info!("{} result(s) for \"{}\"", movies.len(), query);
        Ok(movies)
    }

    async fn details(&self, id: u64) -> AioResult<Movie> {
        info!("Fetching TMDB movie {}", id);
        let html = self.fetch(&format!("/movie/{}", id), &[]).await?;
        let mut movie = parse::parse_movie_page(&html, id)?;

        // Credits are best effort.
        match self.fetch(&format!("/movie/{}/cast", id), &[]).await {
            Ok(html) => {
                if let Err(e) = parse::apply_credits(&html, &mut movie) {
                    warn!("Ignoring unparseable credits for movie {}: {}", id, e);
                }
            }
            Err(e) => warn!("Credits unavailable for movie {}: {}", id, e),
        }

        Ok(movie)
    }
}
