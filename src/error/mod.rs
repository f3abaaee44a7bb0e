//! Error handling module for torrent-aio
//!
//! The naming core never fails; every variant here originates from an I/O
//! collaborator (subprocess, network, filesystem, configuration files).

use thiserror::Error;

/// Main error type for torrent-aio operations
#[derive(Error, Debug)]
pub enum AioError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// The media inspection tool failed or produced unusable output
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// The probe document has no video track
    #[error("No video track found in {path}")]
    NoVideoTrack { path: String },

    /// Movie search returned nothing
    #[error("No movie found for query: {query}")]
    MovieNotFound { query: String },

    /// Movie database request or page layout error
    #[error("Movie database error: {message}")]
    TmdbError { message: String },

    /// An operation exceeded its deadline
    #[error("Timed out while {operation} after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    /// Configuration file or value error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Report or layout file write error
    #[error("Failed to write output file: {message}")]
    OutputError { message: String },

    /// Torrent metainfo could not be built
    #[error("Failed to create torrent: {message}")]
    TorrentError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Result type alias for torrent-aio operations
pub type AioResult<T> = std::result::Result<T, AioError>;
