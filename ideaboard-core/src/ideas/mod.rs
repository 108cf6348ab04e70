//! Idea lifecycle: creation, mint recording, soft deletion.
use std::sync::Arc;

use ideaboard_repository::IdeaRepository;
use ideaboard_shared::types::{Idea, NewIdea, NewMint};
use tracing::info;
use uuid::Uuid;

use crate::errors::IdeaError;
use crate::notifications::NotificationService;

/// Owns the mutating idea operations. Reads live in
/// [`crate::feed::FeedService`].
pub struct IdeaService {
    ideas: Arc<dyn IdeaRepository>,
    notifier: NotificationService,
}

impl IdeaService {
    pub fn new(ideas: Arc<dyn IdeaRepository>, notifier: NotificationService) -> Self {
        Self { ideas, notifier }
    }

    /// Stores a new idea. The optional content hash is produced by the
    /// external pinning service and arrives here as an input field.
    pub async fn create_idea(&self, idea: NewIdea) -> Result<Idea, IdeaError> {
        let idea = self.ideas.insert(idea).await?;
        info!(idea_id = %idea.id, user_id = %idea.user_id, "New idea created");
        Ok(idea)
    }

    /// Records the mint group on an idea after an external mint
    /// confirmation, then fans a mint notification out to the owner.
    ///
    /// Mint fields are immutable: a repeat call is rejected with
    /// [`IdeaError::AlreadyMinted`] and leaves the first mint untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(Idea)` - The updated record.
    /// * `Err(IdeaError::NotFound)` - No active idea with that id.
    /// * `Err(IdeaError::Unauthorized)` - The caller does not own the idea.
    /// * `Err(IdeaError::AlreadyMinted)` - A mint is already recorded.
    pub async fn record_mint(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        mint: NewMint,
    ) -> Result<Idea, IdeaError> {
        if let Some(idea) = self.ideas.record_mint(idea_id, user_id, mint).await? {
            info!(
                idea_id = %idea.id,
                user_id = %user_id,
                "Idea minted"
            );
            self.notifier.notify_mint(&idea).await;
            return Ok(idea);
        }

        // No eligible row; diagnose which part of the contract failed.
        match self.ideas.find_basic(idea_id).await? {
            None => Err(IdeaError::NotFound),
            Some(idea) if idea.user_id != user_id => Err(IdeaError::Unauthorized),
            Some(_) => Err(IdeaError::AlreadyMinted),
        }
    }

    /// Soft-deletes an idea the caller owns.
    pub async fn delete_idea(&self, idea_id: Uuid, user_id: Uuid) -> Result<(), IdeaError> {
        if self.ideas.soft_delete(idea_id, user_id).await? {
            info!(idea_id = %idea_id, user_id = %user_id, "Idea deleted");
            return Ok(());
        }
        match self.ideas.find_basic(idea_id).await? {
            None => Err(IdeaError::NotFound),
            Some(_) => Err(IdeaError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{
        MockIdeaRepository, MockNotificationRepository, MockUserRepository, make_idea, make_user,
    };
    use ideaboard_shared::types::NotificationKind;

    struct Fixture {
        ideas: Arc<MockIdeaRepository>,
        notifications: Arc<MockNotificationRepository>,
        service: IdeaService,
    }

    fn fixture() -> Fixture {
        let ideas = Arc::new(MockIdeaRepository::default());
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let notifier = NotificationService::new(notifications.clone(), users.clone());
        let service = IdeaService::new(ideas.clone(), notifier);
        Fixture {
            ideas,
            notifications,
            service,
        }
    }

    fn make_mint(token_id: i64) -> NewMint {
        NewMint {
            token_id,
            transaction_hash:
                "0x5427daee8d03277f8a30ea881692c04861e692ce5f305b7a689b76248cae63c4".to_string(),
            contract_address: "0x894a1a70311cd19a3ef33a38b18eab618394d6dd".to_string(),
        }
    }

    #[tokio::test]
    async fn record_mint_updates_the_idea_and_notifies_the_owner() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        let minted = fx
            .service
            .record_mint(idea.id, owner.id, make_mint(7))
            .await
            .unwrap();
        let mint = minted.mint.unwrap();
        assert_eq!(mint.token_id, 7);

        let delivered = fx.notifications.rows.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].user_id, owner.id);
        assert_eq!(delivered[0].kind, NotificationKind::Mint);
    }

    #[tokio::test]
    async fn second_mint_is_rejected_and_first_mint_is_kept() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        fx.service
            .record_mint(idea.id, owner.id, make_mint(7))
            .await
            .unwrap();
        let second = fx
            .service
            .record_mint(idea.id, owner.id, make_mint(8))
            .await;
        assert!(matches!(second, Err(IdeaError::AlreadyMinted)));

        let stored = fx.ideas.get(idea.id).unwrap();
        assert_eq!(stored.mint.unwrap().token_id, 7);
    }

    #[tokio::test]
    async fn minting_someone_elses_idea_is_unauthorized() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        let result = fx
            .service
            .record_mint(idea.id, Uuid::new_v4(), make_mint(7))
            .await;
        assert!(matches!(result, Err(IdeaError::Unauthorized)));
    }

    #[tokio::test]
    async fn minting_a_missing_idea_is_not_found() {
        let fx = fixture();
        let result = fx
            .service
            .record_mint(Uuid::new_v4(), Uuid::new_v4(), make_mint(7))
            .await;
        assert!(matches!(result, Err(IdeaError::NotFound)));
    }

    #[tokio::test]
    async fn delete_is_owner_only_and_soft() {
        let fx = fixture();
        let owner = make_user(Some("alice"));
        let idea = make_idea(owner.id, "Solar batteries");
        fx.ideas.push(idea.clone());

        let not_owner = fx.service.delete_idea(idea.id, Uuid::new_v4()).await;
        assert!(matches!(not_owner, Err(IdeaError::Unauthorized)));

        fx.service.delete_idea(idea.id, owner.id).await.unwrap();
        let stored = fx.ideas.get(idea.id).unwrap();
        assert!(!stored.is_active);

        // Once inactive the idea is gone for every caller.
        let again = fx.service.delete_idea(idea.id, owner.id).await;
        assert!(matches!(again, Err(IdeaError::NotFound)));
    }
}
