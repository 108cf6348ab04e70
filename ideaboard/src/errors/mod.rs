//! Error types for the ideaboard application host.
//! Consolidates startup and shutdown failures from configuration, the
//! database pool, and schema migrations.
use thiserror::Error;

/// Errors that can occur during host initialization or execution.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Signal handling error.
    #[error("Signal error: {0}")]
    Signal(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
