// Process interactor - Orchestrates the probe, identify, name and report pipeline

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::domain::keywords::{extract_keywords, parse_direct_id};
use crate::domain::model::*;
use crate::domain::naming::ReleaseNamer;
use crate::error::{AioError, AioResult};
use crate::output::writer::write_atomic;
use crate::output::{render_presentation, NfoRenderer, ReportKind, ReportWriter};
use crate::planner::{plan_path, PackagePlan};
use crate::ports::*;

/// Interactor for the full release preparation use case
pub struct ProcessInteractor {
    probe_port: Arc<dyn ProbePort>,
    movie_port: Arc<dyn MoviePort>,
    torrent_port: Arc<dyn TorrentPort>,
    config: AppConfig,
}

/// How to pick the movie for one input file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessRequest {
    pub input: PathBuf,
    /// Skip the search and fetch this movie directly
    pub tmdb_id: Option<u64>,
    /// Search text replacing the keywords extracted from the file name
    pub query: Option<String>,
    /// 0-based index into the search results
    pub pick: usize,
}

impl ProcessRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }
}

/// Everything produced for one release
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub release_name: String,
    pub movie: Movie,
    pub sheet: FactSheet,
    /// Media file location after the optional rename
    pub media_path: PathBuf,
    pub nfo_path: PathBuf,
    pub presentation_path: PathBuf,
    pub layout_path: Option<PathBuf>,
    pub torrent_path: Option<PathBuf>,
    pub plan: Option<PackagePlan>,
}

impl ProcessInteractor {
    /// Create new process interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        movie_port: Arc<dyn MoviePort>,
        torrent_port: Arc<dyn TorrentPort>,
        config: AppConfig,
    ) -> Self {
        Self {
            probe_port,
            movie_port,
            torrent_port,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the pipeline, dating the NFO with today's local date
    pub async fn execute(&self, request: ProcessRequest) -> AioResult<ProcessReport> {
        self.execute_on(request, Local::now().date_naive()).await
    }

    /// Run the pipeline with an explicit NFO generation date
    pub async fn execute_on(
        &self,
        request: ProcessRequest,
        generated_on: NaiveDate,
    ) -> AioResult<ProcessReport> {
        info!("Processing {}", request.input.display());

        if !request.input.is_file() {
            return Err(AioError::InputFileNotFound {
                path: request.input.display().to_string(),
            });
        }

        let timeout = self.config.identify_timeout();
        let identify = async {
            tokio::time::timeout(timeout, self.identify(&request))
                .await
                .map_err(|_| AioError::Timeout {
                    operation: "identifying the movie".to_string(),
                    seconds: timeout.as_secs(),
                })?
        };

        let (mut sheet, movie) =
            tokio::try_join!(self.probe_port.probe(&request.input), identify)?;
        info!("Identified \"{}\" ({})", movie.title, movie.year());

        let release_name =
            ReleaseNamer::new(&self.config.group_name).compose(&movie, &sheet, &self.config.source_type);
        info!("Release name: {}", release_name);

        let writer = ReportWriter::new(self.config.output_dir_for(&request.input));
        let (media_path, base_name) = if self.config.no_rename {
            debug!("Rename disabled, keeping {}", request.input.display());
            (request.input.clone(), file_stem(&request.input))
        } else {
            let target_name = media_file_name(&release_name, &request.input);
            (writer.relocate(&request.input, &target_name)?, release_name.clone())
        };
        sheet.file_path = media_path.clone();

        let nfo = NfoRenderer::new(&self.config.group_name).render(&movie, &sheet, generated_on);
        let nfo_path = writer.write_text(&ReportKind::Nfo.file_name(&base_name), &nfo)?;

        let presentation = render_presentation(&movie, &sheet);
        let presentation_path =
            writer.write_text(&ReportKind::Presentation.file_name(&base_name), &presentation)?;

        let plan = if self.config.skip_layout && self.config.skip_torrent {
            debug!("Layout and torrent skipped");
            None
        } else {
            Some(plan_path(&media_path)?)
        };

        let layout_path = match &plan {
            Some(plan) if !self.config.skip_layout => {
                let path = writer.output_dir().join(ReportKind::Layout.file_name(&base_name));
                write_atomic(&path, serde_json::to_string_pretty(plan)?.as_bytes())?;
                info!("Layout written: {}", path.display());
                Some(path)
            }
            _ => None,
        };

        let torrent_path = match &plan {
            Some(plan) if !self.config.skip_torrent => {
                let path = writer.output_dir().join(ReportKind::Torrent.file_name(&base_name));
                info!("Creating torrent ({} pieces)", plan.piece_count());
                self.torrent_port.create(plan, &path).await?;
                Some(path)
            }
            _ => None,
        };

        Ok(ProcessReport {
            release_name,
            movie,
            sheet,
            media_path,
            nfo_path,
            presentation_path,
            layout_path,
            torrent_path,
            plan,
        })
    }

    /// Resolve the movie record for a request
    pub async fn identify(&self, request: &ProcessRequest) -> AioResult<Movie> {
        if let Some(id) = request.tmdb_id {
            info!("Using movie id {}", id);
            return self.movie_port.details(id).await;
        }

        let query = match &request.query {
            Some(query) => {
                if let Some(id) = parse_direct_id(query) {
                    info!("Query is a direct movie id: {}", id);
                    return self.movie_port.details(id).await;
                }
                query.trim().to_string()
            }
            None => {
                let file_name = file_name(&request.input);
                let keywords = extract_keywords(&file_name);
                debug!("Keywords for {}: \"{}\"", file_name, keywords);
                keywords
            }
        };

        if query.is_empty() {
            return Err(AioError::MovieNotFound { query });
        }

        let results = self.movie_port.search(&query).await?;
        let selected = match results.get(request.pick) {
            Some(movie) => movie,
            None => {
                let first = results
                    .first()
                    .ok_or_else(|| AioError::MovieNotFound { query: query.clone() })?;
                if request.pick > 0 {
                    warn!(
                        "Pick {} is out of range ({} results), using the first result",
                        request.pick,
                        results.len()
                    );
                }
                first
            }
        };

        info!("Selected \"{}\" ({}) id {}", selected.title, selected.year(), selected.id);
        self.movie_port.details(selected.id).await
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Release name carrying over the media file's extension
fn media_file_name(release_name: &str, input: &Path) -> String {
    match input.extension() {
        Some(ext) => format!("{}.{}", release_name, ext.to_string_lossy()),
        None => release_name.to_string(),
    }
}
