//! Error types for the idea lifecycle service.
use ideaboard_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur while mutating ideas.
#[derive(Debug, Error)]
pub enum IdeaError {
    #[error("Idea not found")]
    NotFound,
    #[error("Only the idea's owner may perform this operation")]
    Unauthorized,
    /// Mint fields are immutable once set; repeat calls are rejected and
    /// leave the first mint untouched.
    #[error("Idea is already minted")]
    AlreadyMinted,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
