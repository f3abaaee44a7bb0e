// Adapters - External system implementations

pub mod mediainfo_cli;
pub mod movie_json;
pub mod tmdb_scrape;
pub mod torrent_file;

// Re-export adapters
pub use mediainfo_cli::MediaInfoProbeAdapter;
pub use movie_json::JsonMovieAdapter;
pub use tmdb_scrape::TmdbScrapeAdapter;
pub use torrent_file::LavaTorrentAdapter;
