//! This module defines the `FollowRepository` trait for the directed follow
//! graph between users.
use ideaboard_shared::types::Follow;
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with the follow store.
///
/// The unique-pair constraint is the race-resolution mechanism: inserting an
/// existing edge resolves as a no-op rather than an error.
#[async_trait::async_trait]
pub trait FollowRepository: Send + Sync {
    /// Inserts a follow edge.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Follow))` - The edge was created.
    /// * `Ok(None)` - The edge already existed; nothing changed.
    async fn insert(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Follow>, RepositoryError>;

    /// Removes a follow edge. Returns whether an edge was present.
    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepositoryError>;
}
