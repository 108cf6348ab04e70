//! Error types for the ideaboard repository.
//! Consolidates and re-exports error types related to entity store operations.
mod repository;

pub use repository::RepositoryError;
