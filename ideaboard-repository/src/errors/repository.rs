//! Error types for the entity store.
//! Defines specific errors that can occur during database operations.
use thiserror::Error;
use uuid::Uuid;

/// Represents errors that can occur within the entity store.
///
/// This enum consolidates sqlx failures with decode errors for rows whose
/// text columns fall outside the closed domain enums.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid idea category: {0}")]
    InvalidCategory(String),

    #[error("Invalid interaction type: {0}")]
    InvalidInteractionType(String),

    #[error("Invalid notification kind: {0}")]
    InvalidNotificationKind(String),

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    /// Mint columns are written all-or-nothing; a partially set group means
    /// the row no longer satisfies the schema's own invariant.
    #[error("Inconsistent mint columns for idea {0}")]
    InconsistentMint(Uuid),
}

impl RepositoryError {
    /// Whether this is the store's uniqueness constraint firing, meaning a
    /// concurrent writer already created the row.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::Database(db_error)) if db_error.is_unique_violation())
    }
}
