//! Error types for loading, selecting and laying out sessions

use std::path::PathBuf;

use crate::model::ParticipantId;

/// Everything that can go wrong inside the core pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("participant id must not be empty (node #{position})")]
    EmptyParticipantId { position: usize },

    #[error("participant {0} is defined more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("interruption #{position} has no caller")]
    MissingCaller { position: usize },

    #[error("interruption #{position} has an unparseable date: {value:?}")]
    InvalidDate { position: usize, value: String },

    /// The session selector does not parse as a session number.
    #[error("invalid session selector {0:?}")]
    InvalidSession(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("layout failed: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
