//! Read-side listings of ideas with live engagement aggregates.
//!
//! Filter, sort, and pagination inputs are normalized by the shared types
//! (unrecognized values fall back to documented defaults); the repository
//! compiles them into one parameterized query per page plus a count over
//! the same predicate.
use std::sync::Arc;

use ideaboard_repository::{IdeaRepository, InteractionRepository};
use ideaboard_shared::types::{
    FeedPage, IdeaFilter, IdeaSort, IdeaWithEngagement, InteractionStats, InteractionType, Page,
    SortOrder,
};
use uuid::Uuid;

use crate::errors::FeedError;

/// A single idea read: engagement-enriched record, full per-kind stats, and
/// the viewer's own like state when a viewer is known.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaDetail {
    pub idea: IdeaWithEngagement,
    pub stats: InteractionStats,
    pub has_liked: Option<bool>,
}

/// Serves the filtered, sorted, paginated content listings.
pub struct FeedService {
    ideas: Arc<dyn IdeaRepository>,
    interactions: Arc<dyn InteractionRepository>,
}

impl FeedService {
    pub fn new(
        ideas: Arc<dyn IdeaRepository>,
        interactions: Arc<dyn InteractionRepository>,
    ) -> Self {
        Self {
            ideas,
            interactions,
        }
    }

    /// Returns one page of enriched ideas matching the filter, with the
    /// total match count for pagination metadata.
    pub async fn list_ideas(
        &self,
        filter: &IdeaFilter,
        sort: IdeaSort,
        order: SortOrder,
        page: &Page,
    ) -> Result<FeedPage<IdeaWithEngagement>, FeedError> {
        let (items, total) = self.ideas.list(filter, sort, order, page).await?;
        Ok(FeedPage::new(items, total, page))
    }

    /// Returns one idea with its stats, plus the viewer's like state when a
    /// viewer is given.
    pub async fn get_idea(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<IdeaDetail, FeedError> {
        let idea = self
            .ideas
            .find_with_engagement(id)
            .await?
            .ok_or(FeedError::IdeaNotFound)?;
        let stats = self.interactions.stats(id).await?;
        let has_liked = match viewer {
            Some(viewer) => Some(
                self.interactions
                    .find_user_interaction(id, viewer, InteractionType::Like)
                    .await?
                    .is_some(),
            ),
            None => None,
        };
        Ok(IdeaDetail {
            idea,
            stats,
            has_liked,
        })
    }

    /// Returns one page of a single author's ideas, newest first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        page: &Page,
    ) -> Result<FeedPage<IdeaWithEngagement>, FeedError> {
        let (items, total) = self.ideas.list_by_user(user_id, page).await?;
        Ok(FeedPage::new(items, total, page))
    }
}
