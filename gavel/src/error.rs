use std::io;

use thiserror::Error;

/// Errors raised while loading fixture files.
///
/// All of these are fatal: a run cannot start without fixtures, so the CLI
/// surfaces them and exits before any worker is spawned.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file does not exist yet
    #[error("fixture file '{path}' not found; run `gavel generate` first")]
    NotFound { path: String },

    /// Reading the fixture file failed for a reason other than absence
    #[error("failed to read fixture file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The fixture file is not valid JSON for the expected record type
    #[error("failed to parse fixture file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The fixture file parsed but holds no entries
    #[error("fixture file '{path}' contains no entries")]
    Empty { path: String },
}

/// Errors raised while persisting a run report.
///
/// Never fatal: the in-memory report has already been printed by the time a
/// write is attempted.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
