//! Error types for the feed read side.
use ideaboard_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur while serving feed reads.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Idea not found")]
    IdeaNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
