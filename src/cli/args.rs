//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config::ConfigOverrides;
use crate::domain::keywords::parse_direct_id;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Movie file to process
    pub input: PathBuf,

    /// Output directory (default: the input's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Release group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Source type placed in the release name (WEB-DL, BluRay, ...)
    #[arg(long)]
    pub source: Option<String>,

    /// TMDB movie id (`603`, `id:603` or `tmdb:603`)
    #[arg(long, value_parser = parse_movie_id)]
    pub tmdb_id: Option<u64>,

    /// Search text replacing the keywords extracted from the file name
    #[arg(long, conflicts_with = "tmdb_id")]
    pub query: Option<String>,

    /// Search result to use, 0 being the best match
    #[arg(long, default_value_t = 0)]
    pub pick: usize,

    /// Read the movie record from a JSON file instead of TMDB
    #[arg(long)]
    pub movie_json: Option<PathBuf>,

    /// Do not write the package layout file
    #[arg(long)]
    pub skip_layout: bool,

    /// Do not create the .torrent file
    #[arg(long)]
    pub skip_torrent: bool,

    /// Tracker announce URL written into the torrent
    #[arg(long, value_name = "URL")]
    pub announce: Option<String>,

    /// Mark the torrent as private
    #[arg(long)]
    pub private: bool,

    /// Keep the file name and location untouched
    #[arg(long)]
    pub no_rename: bool,
}

impl ProcessArgs {
    /// Command line values layered over the configuration
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            group_name: self.group.clone(),
            output_dir: self.output.clone(),
            source_type: self.source.clone(),
            skip_layout: self.skip_layout.then_some(true),
            skip_torrent: self.skip_torrent.then_some(true),
            announce_url: self.announce.clone(),
            private_torrent: self.private.then_some(true),
            no_rename: self.no_rename.then_some(true),
        }
    }
}

/// Arguments for the name command
#[derive(Args, Debug)]
pub struct NameArgs {
    /// Saved `mediainfo --Output=JSON` output
    #[arg(long)]
    pub probe: PathBuf,

    /// Movie record JSON file
    #[arg(long)]
    pub movie: PathBuf,

    /// Source type placed in the release name
    #[arg(long)]
    pub source: Option<String>,

    /// Release group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Also print the NFO report
    #[arg(long)]
    pub nfo: bool,

    /// Also print the BBCode presentation
    #[arg(long)]
    pub presentation: bool,
}

impl NameArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            group_name: self.group.clone(),
            source_type: self.source.clone(),
            ..Default::default()
        }
    }
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// File or directory to package
    pub path: PathBuf,

    /// Print the full plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the keywords command
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// Release file name
    pub filename: String,
}

fn parse_movie_id(value: &str) -> Result<u64, String> {
    parse_direct_id(value).ok_or_else(|| format!("'{}' is not a movie id", value))
}
