//! Command implementations

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer, ProcessRequest};
use crate::cli::args::{KeywordsArgs, NameArgs, PlanArgs, ProcessArgs};
use crate::config::AppConfig;
use crate::domain::keywords::extract_keywords;
use crate::domain::model::{format_binary_size, Movie};
use crate::domain::naming::ReleaseNamer;
use crate::output::{render_presentation, NfoRenderer};
use crate::planner::plan_path;
use crate::probe::parse_saved_document;
use crate::utils::Utils;

/// Execute the process command
pub async fn process(args: ProcessArgs, config_file: Option<&Path>) -> Result<()> {
    let (config, source) = AppConfig::resolve(config_file, &args.overrides())
        .context("Failed to load configuration")?;
    if let Some(source) = source {
        info!("Configuration: {}", source.display());
    }

    let container = DefaultAppContainer::with_movie_source(config, args.movie_json.as_deref())
        .context("Failed to set up adapters")?;

    let request = ProcessRequest {
        input: args.input.clone(),
        tmdb_id: args.tmdb_id,
        query: args.query.clone(),
        pick: args.pick,
    };

    let started = Instant::now();
    let report = container
        .process_interactor()
        .execute(request)
        .await
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    println!("{}", report.release_name);
    println!("  Media:        {}", report.media_path.display());
    println!("  NFO:          {}", report.nfo_path.display());
    println!("  Presentation: {}", report.presentation_path.display());
    if let (Some(path), Some(plan)) = (&report.layout_path, &report.plan) {
        println!(
            "  Layout:       {} ({}, {} pieces)",
            path.display(),
            plan.piece_length_formatted(),
            plan.piece_count()
        );
    }

    if let Some(path) = &report.torrent_path {
        println!("  Torrent:      {}", path.display());
    }

    info!(
        "Process completed in {}",
        Utils::format_duration(started.elapsed())
    );
    Ok(())
}

/// Execute the name command
pub fn name(args: NameArgs, config_file: Option<&Path>) -> Result<()> {
    let (config, _) = AppConfig::resolve(config_file, &args.overrides())
        .context("Failed to load configuration")?;

    let probe_json = std::fs::read_to_string(&args.probe)
        .with_context(|| format!("Failed to read probe file {}", args.probe.display()))?;
    let sheet = parse_saved_document(&probe_json)
        .with_context(|| format!("Invalid probe file {}", args.probe.display()))?;

    let movie_json = std::fs::read_to_string(&args.movie)
        .with_context(|| format!("Failed to read movie file {}", args.movie.display()))?;
    let movie: Movie = serde_json::from_str(&movie_json)
        .with_context(|| format!("Invalid movie file {}", args.movie.display()))?;

    let release_name =
        ReleaseNamer::new(&config.group_name).compose(&movie, &sheet, &config.source_type);
    println!("{}", release_name);

    if args.nfo {
        let nfo = NfoRenderer::new(&config.group_name).render(
            &movie,
            &sheet,
            Local::now().date_naive(),
        );
        println!();
        print!("{}", nfo);
    }

    if args.presentation {
        println!();
        print!("{}", render_presentation(&movie, &sheet));
    }

    Ok(())
}

/// Execute the plan command
pub fn plan(args: PlanArgs) -> Result<()> {
    let plan = plan_path(&args.path)
        .with_context(|| format!("Failed to plan {}", args.path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Path:         {}", plan.root.display());
    println!(
        "Total size:   {} ({} bytes)",
        format_binary_size(plan.total_size),
        plan.total_size
    );
    println!("Piece length: {}", plan.piece_length_formatted());
    println!("Pieces:       {}", plan.piece_count());
    println!("Files:        {}", plan.files.len());
    Ok(())
}

/// Execute the keywords command
pub fn keywords(args: KeywordsArgs) -> Result<()> {
    println!("{}", extract_keywords(&args.filename));
    Ok(())
}
