//! Error types for loading and querying team data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the team data file.
///
/// All of these are fatal for the load that produced them: no partially
/// built model is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON or does not match the selected schema.
    #[error("could not parse team data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Schema auto-detection could not decide between the eras and flat layouts.
    #[error("could not detect team data schema: {0}")]
    UnknownSchema(String),
}

/// Errors returned by the lookup operations of [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("league not found")]
    LeagueNotFound,

    #[error("team not found")]
    TeamNotFound,
}
