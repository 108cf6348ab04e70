//! This module defines the `InteractionRepository` trait, covering the
//! reaction rows and their aggregation.
use ideaboard_shared::types::{
    Interaction, InteractionStats, InteractionType, ReactOutcome,
};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with the reaction store.
///
/// The store's partial uniqueness constraint on non-comment rows is the
/// authoritative race-resolution mechanism for toggles; implementors must
/// resolve a conflict as "the state already flipped" rather than surface it.
#[async_trait::async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Atomically flips the presence of a toggling reaction.
    ///
    /// Runs as one transactional unit: a conditional delete (present to
    /// absent), otherwise a conditional insert (absent to present). A
    /// uniqueness conflict on the insert means a concurrent request already
    /// created the row; the surviving row is returned as `Created`.
    ///
    /// # Arguments
    ///
    /// * `idea_id` - The idea being reacted to.
    /// * `user_id` - The reacting user.
    /// * `kind` - A toggling kind; callers must not pass
    ///   [`InteractionType::Comment`].
    ///
    /// # Returns
    ///
    /// * `Ok(ReactOutcome::Created)` - The row now exists.
    /// * `Ok(ReactOutcome::Removed)` - The row was deleted.
    async fn toggle(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
    ) -> Result<ReactOutcome, RepositoryError>;

    /// Appends a comment row unconditionally; comments carry no uniqueness
    /// constraint.
    async fn insert_comment(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<Interaction, RepositoryError>;

    /// Lists an idea's interactions newest first, optionally restricted to
    /// one kind.
    async fn list_by_idea(
        &self,
        idea_id: Uuid,
        kind: Option<InteractionType>,
    ) -> Result<Vec<Interaction>, RepositoryError>;

    /// Looks up the most recent interaction of one kind by one user on one
    /// idea.
    async fn find_user_interaction(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
    ) -> Result<Option<Interaction>, RepositoryError>;

    /// Aggregates per-kind counts for one idea, freshly computed from the
    /// interaction rows. Kinds with no rows report zero.
    async fn stats(&self, idea_id: Uuid) -> Result<InteractionStats, RepositoryError>;
}
