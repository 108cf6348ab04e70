//! Error types for the notification inbox operations.
//! Fan-out itself never surfaces errors; only the read-state operations do.
use ideaboard_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur while reading or updating the inbox.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
