//! PostgreSQL implementation of [`InteractionRepository`].
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ideaboard_shared::types::{
    Interaction, InteractionStats, InteractionType, ReactOutcome,
};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::InteractionRepository;

const INTERACTION_COLUMNS: &str =
    "id, idea_id, user_id, interaction_type, content, created_at";

/// PostgreSQL implementation of the reaction store.
///
/// The partial unique index on non-comment rows is the enforcement boundary
/// for toggle races: the delete-or-insert below never surfaces a constraint
/// violation to the caller.
pub struct PostgresInteractionRepository {
    pool: PgPool,
}

impl PostgresInteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct InteractionRow {
    id: Uuid,
    idea_id: Uuid,
    user_id: Uuid,
    interaction_type: String,
    content: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = RepositoryError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let kind = row
            .interaction_type
            .parse()
            .map_err(|_| RepositoryError::InvalidInteractionType(row.interaction_type.clone()))?;
        Ok(Interaction {
            id: row.id,
            idea_id: row.idea_id,
            user_id: row.user_id,
            kind,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl InteractionRepository for PostgresInteractionRepository {
    async fn toggle(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
    ) -> Result<ReactOutcome, RepositoryError> {
        debug_assert!(kind.toggles(), "comments are append-only");

        let mut tx = self.pool.begin().await?;

        let deleted: Option<(Uuid,)> = sqlx::query_as(
            "DELETE FROM interactions \
             WHERE idea_id = $1 AND user_id = $2 AND interaction_type = $3 \
             RETURNING id",
        )
        .bind(idea_id)
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        if deleted.is_some() {
            tx.commit().await?;
            return Ok(ReactOutcome::Removed);
        }

        let inserted: Option<InteractionRow> = sqlx::query_as(&format!(
            "INSERT INTO interactions (idea_id, user_id, interaction_type) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (idea_id, user_id, interaction_type) \
             WHERE interaction_type <> 'comment' DO NOTHING \
             RETURNING {INTERACTION_COLUMNS}"
        ))
        .bind(idea_id)
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        match inserted {
            Some(row) => Ok(ReactOutcome::Created(row.try_into()?)),
            // A concurrent request flipped the state between our delete and
            // insert. The surviving row, if any, is the state the caller
            // asked for.
            None => {
                let row: Option<InteractionRow> = sqlx::query_as(&format!(
                    "SELECT {INTERACTION_COLUMNS} FROM interactions \
                     WHERE idea_id = $1 AND user_id = $2 AND interaction_type = $3"
                ))
                .bind(idea_id)
                .bind(user_id)
                .bind(kind.as_str())
                .fetch_optional(&self.pool)
                .await?;
                match row {
                    Some(row) => Ok(ReactOutcome::Created(row.try_into()?)),
                    None => Ok(ReactOutcome::Removed),
                }
            }
        }
    }

    async fn insert_comment(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<Interaction, RepositoryError> {
        let row: InteractionRow = sqlx::query_as(&format!(
            "INSERT INTO interactions (idea_id, user_id, interaction_type, content) \
             VALUES ($1, $2, 'comment', $3) \
             RETURNING {INTERACTION_COLUMNS}"
        ))
        .bind(idea_id)
        .bind(user_id)
        .bind(&content)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_by_idea(
        &self,
        idea_id: Uuid,
        kind: Option<InteractionType>,
    ) -> Result<Vec<Interaction>, RepositoryError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions WHERE idea_id = "
        ));
        builder.push_bind(idea_id);
        if let Some(kind) = kind {
            builder.push(" AND interaction_type = ");
            builder.push_bind(kind.as_str());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");
        let rows: Vec<InteractionRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let mut interactions = Vec::with_capacity(rows.len());
        for row in rows {
            interactions.push(row.try_into()?);
        }
        Ok(interactions)
    }

    async fn find_user_interaction(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
    ) -> Result<Option<Interaction>, RepositoryError> {
        let row: Option<InteractionRow> = sqlx::query_as(&format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions \
             WHERE idea_id = $1 AND user_id = $2 AND interaction_type = $3 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        ))
        .bind(idea_id)
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Interaction::try_from).transpose()
    }

    async fn stats(&self, idea_id: Uuid) -> Result<InteractionStats, RepositoryError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT interaction_type, COUNT(*) FROM interactions \
             WHERE idea_id = $1 \
             GROUP BY interaction_type",
        )
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await?;

        let mut stats = InteractionStats::default();
        for (kind, count) in rows {
            match kind.parse() {
                Ok(InteractionType::Like) => stats.likes = count,
                Ok(InteractionType::Comment) => stats.comments = count,
                Ok(InteractionType::Build) => stats.builds = count,
                Ok(InteractionType::Share) => stats.shares = count,
                Err(_) => return Err(RepositoryError::InvalidInteractionType(kind)),
            }
        }
        Ok(stats)
    }
}
