// src/utils/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the scanner
///
/// This enum represents the run-level error conditions: configuration
/// problems, unreadable source lists, and result publishing failures.
/// Per-candidate network failures (resolution, connect, handshake,
/// malformed responses) are deliberately absent; those degrade to
/// "no result for this unit" inside the worker that hit them and are
/// never propagated across the worker boundary.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A configured source list could not be opened or read
    #[error("Source list {path:?} unreadable: {source}")]
    SourceList {
        /// Path of the offending list
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// Standard I/O operation errors (result staging and publication)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}
