// src/models/error.rs
//
// Errors raised while turning a backend reply into trajectories

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("invalid trajectory JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("path for '{character}' is not an array of segments")]
    MalformedPath { character: String },

    #[error("unknown segment tag '{tag}' at index {index} of '{character}'")]
    UnknownTag {
        character: String,
        index: usize,
        tag: String,
    },

    #[error("malformed '{tag}' segment at index {index} of '{character}': {reason}")]
    MalformedSegment {
        character: String,
        index: usize,
        tag: String,
        reason: String,
    },

    /// The backend answered with an `{"error": ...}` body or a failing status.
    #[error("{0}")]
    Backend(String),

    #[error("request failed: {0}")]
    Transport(String),
}
