//! This module defines the `NotificationRepository` trait for inbox rows and
//! their read-state operations.
use ideaboard_shared::types::{NewNotification, Notification, NotificationWithContext, Page};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with the notification
/// store.
#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Inserts a notification row and returns the stored record.
    async fn insert(&self, notification: NewNotification) -> Result<Notification, RepositoryError>;

    /// Returns one page of a user's notifications, newest first, joined with
    /// display context for the related user and idea, plus the total count
    /// under the same read-state filter.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: &Page,
    ) -> Result<(Vec<NotificationWithContext>, i64), RepositoryError>;

    /// Flips the read flag of one notification, only when the given user is
    /// its recipient. Returns whether a row matched.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError>;

    /// Flips every unread notification for a user and returns how many rows
    /// were affected.
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepositoryError>;

    /// Counts a user's unread notifications.
    async fn unread_count(&self, user_id: Uuid) -> Result<i64, RepositoryError>;
}
