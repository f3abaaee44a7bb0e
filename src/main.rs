//! torrent-aio
//!
//! Command-line tool preparing movie releases: probes the file with
//! mediainfo, identifies the movie on TMDB, renames it to a scene-style
//! release name and writes the NFO, the BBCode presentation and the
//! package layout.
//!
//! # Usage
//!
//! ```bash
//! torrent-aio process "Movie.2023.1080p.mkv" --group AIO --source WEB-DL
//! torrent-aio name --probe mediainfo.json --movie movie.json --nfo
//! torrent-aio plan ./Release.Dir --json
//! torrent-aio keywords "The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv"
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use torrent_aio::cli::{commands, Cli, Commands};
use torrent_aio::utils::logging::{LoggingConfig, LoggingSystem};

/// Main entry point for the torrent-aio CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingSystem::new(LoggingConfig {
        level: cli.log_level,
        format: cli.log_format,
        ..Default::default()
    });
    logging
        .initialize()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    logging.log_system_info();

    let config_file = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => {
            info!("Executing process command");
            commands::process(args, config_file).await?;
        }
        Commands::Name(args) => {
            info!("Executing name command");
            commands::name(args, config_file)?;
        }
        Commands::Plan(args) => {
            info!("Executing plan command");
            commands::plan(args)?;
        }
        Commands::Keywords(args) => {
            info!("Executing keywords command");
            commands::keywords(args)?;
        }
    }

    Ok(())
}
