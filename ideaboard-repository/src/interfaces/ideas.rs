//! This module defines the `IdeaRepository` trait, which provides an interface
//! for persisting and querying ideas together with their live engagement
//! aggregates.
use ideaboard_shared::types::{
    Idea, IdeaFilter, IdeaSort, IdeaWithEngagement, NewIdea, NewMint, Page, SortOrder,
};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with the idea store.
///
/// Every lookup returns `Option`; callers are required to handle the empty
/// case explicitly. Listings only ever see active (non-deleted) ideas.
#[async_trait::async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Inserts a new idea and returns the stored record.
    async fn insert(&self, idea: NewIdea) -> Result<Idea, RepositoryError>;

    /// Looks up an active idea without engagement enrichment.
    ///
    /// This is the existence check used by mutating operations; it carries
    /// the owner id needed for self-interaction and ownership decisions.
    async fn find_basic(&self, id: Uuid) -> Result<Option<Idea>, RepositoryError>;

    /// Looks up an active idea enriched with author identity and live
    /// engagement counts.
    async fn find_with_engagement(
        &self,
        id: Uuid,
    ) -> Result<Option<IdeaWithEngagement>, RepositoryError>;

    /// Returns one page of enriched ideas matching the filter, plus the
    /// total match count computed over the same predicate without the
    /// pagination window.
    ///
    /// # Arguments
    ///
    /// * `filter` - Structured filter predicates; an empty filter matches
    ///   every active idea.
    /// * `sort` - Sort key; equal keys are tiebroken deterministically.
    /// * `order` - Sort direction.
    /// * `page` - Pagination window, already normalized to valid bounds.
    async fn list(
        &self,
        filter: &IdeaFilter,
        sort: IdeaSort,
        order: SortOrder,
        page: &Page,
    ) -> Result<(Vec<IdeaWithEngagement>, i64), RepositoryError>;

    /// Returns one page of a single author's ideas, newest first, plus the
    /// author's total active idea count.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: &Page,
    ) -> Result<(Vec<IdeaWithEngagement>, i64), RepositoryError>;

    /// Writes the mint group onto an idea the given user owns, only if no
    /// mint has been recorded yet.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Idea))` - The updated record; the mint fields are now
    ///   immutable.
    /// * `Ok(None)` - No eligible row: the idea is missing or inactive, the
    ///   user is not the owner, or a mint is already recorded. Callers
    ///   diagnose the cause via [`IdeaRepository::find_basic`].
    async fn record_mint(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        mint: NewMint,
    ) -> Result<Option<Idea>, RepositoryError>;

    /// Soft-deletes an idea the given user owns. Returns whether a row was
    /// deactivated.
    async fn soft_delete(&self, idea_id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError>;
}
