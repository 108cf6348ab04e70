//! # Ideaboard Repository
//! This crate provides traits and implementations for interacting with the
//! ideaboard entity store. It includes definitions for errors, interfaces,
//! and concrete implementations for PostgreSQL.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{
    FollowRepository, IdeaRepository, InteractionRepository, NotificationRepository,
    UserRepository,
};
pub use postgres::{
    MIGRATOR, PostgresFollowRepository, PostgresIdeaRepository, PostgresInteractionRepository,
    PostgresNotificationRepository, PostgresUserRepository,
};
