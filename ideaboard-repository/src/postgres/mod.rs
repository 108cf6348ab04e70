//! PostgreSQL implementation of the ideaboard entity store.
//!
//! Provides a production-ready PostgreSQL backend for the repository traits
//! with connection pooling, transaction safety, and dynamic query assembly.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - ACID transactions with automatic rollback
//! - Dynamic filter compilation using `QueryBuilder` with bound parameters
//! - Toggle support with `ON CONFLICT DO NOTHING` against a partial unique
//!   index
//! - Live engagement aggregation, never stored counters
//!
//! ## Database Tables
//!
//! - `users`: wallet-identified accounts
//! - `ideas`: authored content with optional mint columns
//! - `interactions`: typed reactions, unique per (idea, user, kind) for
//!   non-comment kinds
//! - `notifications`: per-user inbox rows
//! - `follows`: directed follow edges, unique per ordered pair
mod feed_query;
mod follows_repository;
mod ideas_repository;
mod interactions_repository;
mod notifications_repository;
mod users_repository;

pub use follows_repository::PostgresFollowRepository;
pub use ideas_repository::PostgresIdeaRepository;
pub use interactions_repository::PostgresInteractionRepository;
pub use notifications_repository::PostgresNotificationRepository;
pub use users_repository::PostgresUserRepository;

/// Embedded schema migrations, applied at startup and mounted by the
/// integration tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("src/postgres/migrations");
