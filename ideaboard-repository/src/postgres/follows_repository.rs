//! PostgreSQL implementation of [`FollowRepository`].
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ideaboard_shared::types::Follow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::FollowRepository;

/// PostgreSQL implementation of the follow store.
///
/// The unique-pair constraint resolves duplicate-follow races: inserting an
/// existing edge is a no-op, reported through the return value.
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FollowRow {
    id: Uuid,
    follower_id: Uuid,
    followed_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<FollowRow> for Follow {
    fn from(row: FollowRow) -> Self {
        Follow {
            id: row.id,
            follower_id: row.follower_id,
            followed_id: row.followed_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn insert(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Follow>, RepositoryError> {
        let row: Option<FollowRow> = sqlx::query_as(
            "INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2) \
             ON CONFLICT (follower_id, followed_id) DO NOTHING \
             RETURNING id, follower_id, followed_id, created_at",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Follow::from))
    }

    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
