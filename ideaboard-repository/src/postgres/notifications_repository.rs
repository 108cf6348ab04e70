//! PostgreSQL implementation of [`NotificationRepository`].
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ideaboard_shared::types::{
    NewNotification, Notification, NotificationWithContext, Page,
};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::NotificationRepository;

const NOTIFICATION_COLUMNS: &str = "id, user_id, type AS kind, title, content, \
 related_user_id, related_idea_id, is_read, created_at";

/// PostgreSQL implementation of the notification store.
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    title: String,
    content: Option<String>,
    related_user_id: Option<Uuid>,
    related_idea_id: Option<Uuid>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse()
            .map_err(|_| RepositoryError::InvalidNotificationKind(row.kind.clone()))?;
        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            kind,
            title: row.title,
            content: row.content,
            related_user_id: row.related_user_id,
            related_idea_id: row.related_idea_id,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct NotificationContextRow {
    #[sqlx(flatten)]
    notification: NotificationRow,
    related_username: Option<String>,
    related_idea_title: Option<String>,
}

impl TryFrom<NotificationContextRow> for NotificationWithContext {
    type Error = RepositoryError;

    fn try_from(row: NotificationContextRow) -> Result<Self, Self::Error> {
        Ok(NotificationWithContext {
            notification: row.notification.try_into()?,
            related_username: row.related_username,
            related_idea_title: row.related_idea_title,
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        let row: NotificationRow = sqlx::query_as(&format!(
            "INSERT INTO notifications \
             (user_id, type, title, content, related_user_id, related_idea_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(notification.user_id)
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.content)
        .bind(notification.related_user_id)
        .bind(notification.related_idea_id)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: &Page,
    ) -> Result<(Vec<NotificationWithContext>, i64), RepositoryError> {
        let mut builder = QueryBuilder::new(
            "SELECT n.id, n.user_id, n.type AS kind, n.title, n.content, \
             n.related_user_id, n.related_idea_id, n.is_read, n.created_at, \
             ru.username AS related_username, ri.title AS related_idea_title \
             FROM notifications n \
             LEFT JOIN users ru ON n.related_user_id = ru.id \
             LEFT JOIN ideas ri ON n.related_idea_id = ri.id \
             WHERE n.user_id = ",
        );
        builder.push_bind(user_id);
        if unread_only {
            builder.push(" AND n.is_read = FALSE");
        }
        builder.push(" ORDER BY n.created_at DESC, n.id DESC LIMIT ");
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());
        let rows: Vec<NotificationContextRow> =
            builder.build_query_as().fetch_all(&self.pool).await?;

        let mut count_builder =
            QueryBuilder::new("SELECT COUNT(*) FROM notifications WHERE user_id = ");
        count_builder.push_bind(user_id);
        if unread_only {
            count_builder.push(" AND is_read = FALSE");
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in rows {
            notifications.push(row.try_into()?);
        }
        Ok((notifications, total))
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated.is_some())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
