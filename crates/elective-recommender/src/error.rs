// elective-recommender/crates/elective-recommender/src/error.rs
//! Error taxonomy for the recommendation pipeline.
//!
//! External-service failures from the tag suggester are recovered locally
//! (empty suggestion list) and never reach this type from that path; the
//! `ExternalService` variant is raised by the embedding encoder, where a
//! backend failure cannot be papered over.

use thiserror::Error;

/// Result type alias for recommendation operations
pub type Result<T> = std::result::Result<T, RecommenderError>;

#[derive(Error, Debug)]
pub enum RecommenderError {
    /// A required field failed validation (e.g. empty name on registration)
    #[error("validation error: {0}")]
    Validation(String),

    /// An entity id or a required persisted artifact does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// An external collaborator (embedding backend) failed
    #[error("external service error: {0}")]
    ExternalService(String),

    /// A backing file was missing or unusable when an operation expected it
    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Encode(#[from] bincode::Error),
}

impl RecommenderError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(what: impl Into<String>) -> Self {
        Self::Validation(what.into())
    }
}
