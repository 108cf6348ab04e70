//! Dependency initialization and wiring for the ideaboard host.
//!
//! One connection pool is created at startup and passed explicitly into
//! every repository; nothing in the system reaches a pool through a global.
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ideaboard_core::{
    FeedService, IdeaService, NotificationService, ProfileService, ReactionService,
};
use ideaboard_repository::{
    FollowRepository, IdeaRepository, InteractionRepository, NotificationRepository,
    PostgresFollowRepository, PostgresIdeaRepository, PostgresInteractionRepository,
    PostgresNotificationRepository, PostgresUserRepository, UserRepository,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::warn;

use crate::errors::AppError;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default bound on waiting for a pooled connection, in seconds. Every
/// store call in the system is bounded by this acquisition timeout.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Container for all initialized dependencies.
///
/// Holds the pool for lifecycle control (drain on shutdown) and the wired
/// service instances the enclosing API layer calls into.
pub struct Dependencies {
    pub pool: PgPool,
    pub feed: FeedService,
    pub ideas: IdeaService,
    pub reactions: ReactionService,
    pub notifications: NotificationService,
    pub profiles: ProfileService,
}

/// Reads an env var with a parsed fallback: unset or unparseable values use
/// the default.
fn env_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid {} value {:?}, using the default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// Reads the environment, builds the connection pool with a bounded
    /// acquisition timeout, and wires up every repository and service.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or an
    /// `AppError` if configuration is missing or the pool cannot connect.
    pub async fn new() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::config("DATABASE_URL must be set"))?;
        let max_connections = env_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let acquire_timeout =
            Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS));

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(&database_url)
            .await?;

        Ok(Self::with_pool(pool))
    }

    /// Wires every repository and service onto an existing pool.
    pub fn with_pool(pool: PgPool) -> Self {
        let idea_repo: Arc<dyn IdeaRepository> =
            Arc::new(PostgresIdeaRepository::new(pool.clone()));
        let interaction_repo: Arc<dyn InteractionRepository> =
            Arc::new(PostgresInteractionRepository::new(pool.clone()));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(PostgresNotificationRepository::new(pool.clone()));
        let user_repo: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(pool.clone()));
        let follow_repo: Arc<dyn FollowRepository> =
            Arc::new(PostgresFollowRepository::new(pool.clone()));

        let notifications = NotificationService::new(notification_repo, user_repo.clone());

        Self {
            feed: FeedService::new(idea_repo.clone(), interaction_repo.clone()),
            ideas: IdeaService::new(idea_repo.clone(), notifications.clone()),
            reactions: ReactionService::new(idea_repo, interaction_repo, notifications.clone()),
            profiles: ProfileService::new(user_repo, follow_repo, notifications.clone()),
            notifications,
            pool,
        }
    }
}
