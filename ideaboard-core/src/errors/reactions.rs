//! Error types for the interaction state machine.
use ideaboard_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur while recording a reaction.
///
/// Validation failures are detected and returned before any mutation
/// reaches the store.
#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("Idea not found")]
    IdeaNotFound,
    #[error("Comments require non-empty content")]
    MissingCommentContent,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
