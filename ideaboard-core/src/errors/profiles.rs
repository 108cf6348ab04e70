//! Error types for accounts and the follow graph.
use ideaboard_repository::RepositoryError;
use ideaboard_shared::types::InvalidWalletAddress;
use thiserror::Error;

/// Represents errors that can occur while managing accounts and follows.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    InvalidWallet(#[from] InvalidWalletAddress),
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Users cannot follow themselves")]
    SelfFollow,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
