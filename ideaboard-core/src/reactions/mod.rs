//! The interaction state machine.
//!
//! Each `(idea, user, kind)` tuple is either absent or present. Likes,
//! builds, and shares toggle between the two states; comments append a new
//! row on every call. Validation happens before any mutation, toggle
//! atomicity is the store's conditional insert, and accepted interactions
//! fan out to the idea's owner without ever blocking on the notification
//! write.
use std::sync::Arc;

use ideaboard_repository::{IdeaRepository, InteractionRepository};
use ideaboard_shared::types::{
    Interaction, InteractionStats, InteractionType, ReactOutcome,
};
use uuid::Uuid;

use crate::errors::ReactionError;
use crate::notifications::NotificationService;

/// Governs creation and removal of reactions.
pub struct ReactionService {
    ideas: Arc<dyn IdeaRepository>,
    interactions: Arc<dyn InteractionRepository>,
    notifier: NotificationService,
}

impl ReactionService {
    pub fn new(
        ideas: Arc<dyn IdeaRepository>,
        interactions: Arc<dyn InteractionRepository>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            ideas,
            interactions,
            notifier,
        }
    }

    /// Records a reaction to an idea.
    ///
    /// # Arguments
    ///
    /// * `idea_id` - The idea being reacted to; must exist and be active.
    /// * `user_id` - The reacting user.
    /// * `kind` - The reaction kind.
    /// * `content` - Required non-empty for comments; ignored for toggling
    ///   kinds, which carry no content.
    ///
    /// # Returns
    ///
    /// * `Ok(ReactOutcome::Created)` - A row was created (or survived a
    ///   concurrent toggle race); first-time reactions on someone else's
    ///   idea fan out a notification.
    /// * `Ok(ReactOutcome::Removed)` - The toggle removed the existing row.
    /// * `Err(ReactionError)` - Validation or lookup failed before any
    ///   mutation, or the store failed.
    pub async fn react(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
        content: Option<String>,
    ) -> Result<ReactOutcome, ReactionError> {
        if kind == InteractionType::Comment
            && content.as_deref().map(str::trim).unwrap_or("").is_empty()
        {
            return Err(ReactionError::MissingCommentContent);
        }

        let idea = self
            .ideas
            .find_basic(idea_id)
            .await?
            .ok_or(ReactionError::IdeaNotFound)?;

        let outcome = match kind {
            InteractionType::Comment => {
                let comment = self
                    .interactions
                    .insert_comment(idea_id, user_id, content.unwrap_or_default())
                    .await?;
                ReactOutcome::Created(comment)
            }
            _ => self.interactions.toggle(idea_id, user_id, kind).await?,
        };

        if let ReactOutcome::Created(interaction) = &outcome {
            self.notifier.notify_interaction(interaction, &idea).await;
        }

        Ok(outcome)
    }

    /// Lists an idea's interactions newest first, optionally restricted to
    /// one kind.
    pub async fn list_interactions(
        &self,
        idea_id: Uuid,
        kind: Option<InteractionType>,
    ) -> Result<Vec<Interaction>, ReactionError> {
        self.interactions
            .list_by_idea(idea_id, kind)
            .await
            .map_err(Into::into)
    }

    /// Live per-kind engagement counts for an idea; kinds with no rows
    /// report zero.
    pub async fn stats(&self, idea_id: Uuid) -> Result<InteractionStats, ReactionError> {
        self.interactions.stats(idea_id).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{
        MockIdeaRepository, MockInteractionRepository, MockNotificationRepository,
        MockUserRepository, make_idea, make_user,
    };

    struct Fixture {
        ideas: Arc<MockIdeaRepository>,
        interactions: Arc<MockInteractionRepository>,
        notifications: Arc<MockNotificationRepository>,
        users: Arc<MockUserRepository>,
        service: ReactionService,
    }

    fn fixture() -> Fixture {
        let ideas = Arc::new(MockIdeaRepository::default());
        let interactions = Arc::new(MockInteractionRepository::default());
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let notifier = NotificationService::new(notifications.clone(), users.clone());
        let service = ReactionService::new(ideas.clone(), interactions.clone(), notifier);
        Fixture {
            ideas,
            interactions,
            notifications,
            users,
            service,
        }
    }

    #[tokio::test]
    async fn comment_without_content_is_rejected_before_any_mutation() {
        let fx = fixture();
        let result = fx
            .service
            .react(
                Uuid::new_v4(),
                Uuid::new_v4(),
                InteractionType::Comment,
                Some("   ".to_string()),
            )
            .await;
        assert!(matches!(result, Err(ReactionError::MissingCommentContent)));
        assert!(fx.interactions.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reacting_to_a_missing_idea_fails_with_not_found() {
        let fx = fixture();
        let result = fx
            .service
            .react(Uuid::new_v4(), Uuid::new_v4(), InteractionType::Like, None)
            .await;
        assert!(matches!(result, Err(ReactionError::IdeaNotFound)));
    }

    #[tokio::test]
    async fn like_toggles_between_created_and_removed() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let reactor = make_user(Some("bob"));
        fx.users.push(owner.clone());
        fx.users.push(reactor.clone());
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        let first = fx
            .service
            .react(idea.id, reactor.id, InteractionType::Like, None)
            .await
            .unwrap();
        assert!(matches!(first, ReactOutcome::Created(_)));

        let second = fx
            .service
            .react(idea.id, reactor.id, InteractionType::Like, None)
            .await
            .unwrap();
        assert_eq!(second, ReactOutcome::Removed);

        // Odd number of calls leaves the row present; even leaves it absent.
        assert!(fx.interactions.rows.lock().unwrap().is_empty());
        let third = fx
            .service
            .react(idea.id, reactor.id, InteractionType::Like, None)
            .await
            .unwrap();
        assert!(matches!(third, ReactOutcome::Created(_)));
        assert_eq!(fx.interactions.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn comments_accumulate_one_row_per_call() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let commenter = make_user(Some("bob"));
        fx.users.push(owner.clone());
        fx.users.push(commenter.clone());
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        for n in 1..=3 {
            let outcome = fx
                .service
                .react(
                    idea.id,
                    commenter.id,
                    InteractionType::Comment,
                    Some(format!("comment {n}")),
                )
                .await
                .unwrap();
            assert!(matches!(outcome, ReactOutcome::Created(_)));
        }
        assert_eq!(fx.interactions.rows.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn first_reaction_on_anothers_idea_fans_out_exactly_one_notification() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let reactor = make_user(Some("bob"));
        fx.users.push(owner.clone());
        fx.users.push(reactor.clone());
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        fx.service
            .react(idea.id, reactor.id, InteractionType::Build, None)
            .await
            .unwrap();

        let delivered = fx.notifications.rows.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].user_id, owner.id);
        assert_eq!(delivered[0].title, "bob wants to build your idea");
    }

    #[tokio::test]
    async fn self_reaction_is_recorded_but_never_notifies() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        fx.users.push(owner.clone());
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        let outcome = fx
            .service
            .react(idea.id, owner.id, InteractionType::Like, None)
            .await
            .unwrap();
        assert!(matches!(outcome, ReactOutcome::Created(_)));
        assert_eq!(fx.interactions.rows.lock().unwrap().len(), 1);
        assert!(fx.notifications.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn removal_does_not_notify() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let reactor = make_user(Some("bob"));
        fx.users.push(owner.clone());
        fx.users.push(reactor.clone());
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        fx.service
            .react(idea.id, reactor.id, InteractionType::Share, None)
            .await
            .unwrap();
        fx.service
            .react(idea.id, reactor.id, InteractionType::Share, None)
            .await
            .unwrap();

        // Only the creation notified; the removal stayed silent.
        assert_eq!(fx.notifications.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fan_out_failure_does_not_fail_the_reaction() {
        let fx = fixture();
        fx.notifications.fail_inserts();
        let owner = make_user(Some("alice"));
        let reactor = make_user(Some("bob"));
        fx.users.push(owner.clone());
        fx.users.push(reactor.clone());
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        let outcome = fx
            .service
            .react(idea.id, reactor.id, InteractionType::Like, None)
            .await
            .unwrap();
        assert!(matches!(outcome, ReactOutcome::Created(_)));
        assert_eq!(fx.interactions.rows.lock().unwrap().len(), 1);
    }
}
