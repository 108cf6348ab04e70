//! Notification fan-out and inbox read-state operations.
//!
//! Fan-out derives exactly one notification from a triggering event and
//! delivers it to a single recipient: the idea's owner for interactions and
//! mints, the followed user for follows, never the actor.
use std::sync::Arc;

use ideaboard_repository::{NotificationRepository, UserRepository};
use ideaboard_shared::types::{
    FeedPage, Idea, Interaction, InteractionType, NewNotification, NotificationKind,
    NotificationWithContext, Page, User,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::NotificationError;

/// Fixed title for mint notifications, independent of any actor.
const MINT_TITLE: &str = "Your idea has been minted as an NFT!";

/// Title line for an interaction notification, derived from the actor's
/// display name and the interaction kind.
fn interaction_title(actor: &str, kind: InteractionType) -> String {
    match kind {
        InteractionType::Like => format!("{actor} liked your idea"),
        InteractionType::Comment => format!("{actor} commented on your idea"),
        InteractionType::Build => format!("{actor} wants to build your idea"),
        InteractionType::Share => format!("{actor} shared your idea"),
    }
}

/// Derives notifications from accepted events and serves the inbox.
///
/// Delivery is best-effort: a failed write is logged and swallowed so the
/// originating action is never rolled back or failed by its notification.
/// Retrying is left to whoever replays the triggering event, never done
/// here.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notifications,
            users,
        }
    }

    /// Fans an accepted interaction out to the idea's owner.
    ///
    /// Self-interactions are silent: when the actor owns the idea, no
    /// notification is created.
    pub async fn notify_interaction(&self, interaction: &Interaction, idea: &Idea) {
        if idea.user_id == interaction.user_id {
            return;
        }
        let actor = match self.users.find_by_id(interaction.user_id).await {
            Ok(actor) => actor,
            Err(error) => {
                warn!(
                    error = %error,
                    interaction_id = %interaction.id,
                    "Skipping interaction fan-out: actor lookup failed"
                );
                return;
            }
        };
        let display_name = actor.as_ref().map(|user| user.display_name()).unwrap_or("Someone");
        self.deliver(NewNotification {
            user_id: idea.user_id,
            kind: interaction.kind.into(),
            title: interaction_title(display_name, interaction.kind),
            content: Some(format!("\"{}\"", idea.title)),
            related_user_id: Some(interaction.user_id),
            related_idea_id: Some(idea.id),
        })
        .await;
    }

    /// Fans a mint confirmation out to the idea's owner.
    ///
    /// The actor here is the external confirmation, not the owner, so the
    /// owner does receive this one.
    pub async fn notify_mint(&self, idea: &Idea) {
        self.deliver(NewNotification {
            user_id: idea.user_id,
            kind: NotificationKind::Mint,
            title: MINT_TITLE.to_string(),
            content: Some(format!(
                "\"{}\" is now permanently stored on the blockchain.",
                idea.title
            )),
            related_user_id: None,
            related_idea_id: Some(idea.id),
        })
        .await;
    }

    /// Fans a new follow out to the followed user.
    pub async fn notify_follow(&self, follower: &User, followed_id: Uuid) {
        if follower.id == followed_id {
            return;
        }
        self.deliver(NewNotification {
            user_id: followed_id,
            kind: NotificationKind::Follow,
            title: format!("{} started following you", follower.display_name()),
            content: None,
            related_user_id: Some(follower.id),
            related_idea_id: None,
        })
        .await;
    }

    async fn deliver(&self, notification: NewNotification) {
        match self.notifications.insert(notification).await {
            Ok(created) => {
                info!(
                    notification_id = %created.id,
                    kind = created.kind.as_str(),
                    recipient = %created.user_id,
                    "Notification created"
                );
            }
            Err(error) => {
                warn!(error = %error, "Failed to create notification");
            }
        }
    }

    /// Returns one page of the user's inbox, newest first, optionally
    /// restricted to unread rows.
    pub async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: &Page,
    ) -> Result<FeedPage<NotificationWithContext>, NotificationError> {
        let (items, total) = self
            .notifications
            .list_by_user(user_id, unread_only, page)
            .await?;
        Ok(FeedPage::new(items, total, page))
    }

    /// Flips the read flag of one notification, only when the requesting
    /// user is its recipient. Returns whether a row was flipped.
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, NotificationError> {
        let updated = self.notifications.mark_read(id, user_id).await?;
        if updated {
            info!(notification_id = %id, user_id = %user_id, "Notification marked as read");
        }
        Ok(updated)
    }

    /// Flips every unread notification for the user and reports how many
    /// rows were affected.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, NotificationError> {
        self.notifications
            .mark_all_read(user_id)
            .await
            .map_err(Into::into)
    }

    /// Counts the user's unread notifications.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, NotificationError> {
        self.notifications
            .unread_count(user_id)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockNotificationRepository, MockUserRepository, make_idea, make_user};

    fn service(
        notifications: &Arc<MockNotificationRepository>,
        users: &Arc<MockUserRepository>,
    ) -> NotificationService {
        NotificationService::new(notifications.clone(), users.clone())
    }

    fn make_interaction(idea_id: Uuid, user_id: Uuid, kind: InteractionType) -> Interaction {
        Interaction {
            id: Uuid::new_v4(),
            idea_id,
            user_id,
            kind,
            content: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn interaction_titles_follow_the_fixed_mapping() {
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let actor = make_user(Some("alice"));
        let owner = make_user(None);
        users.push(actor.clone());
        let idea = make_idea(owner.id, "Solar batteries");

        let cases = [
            (InteractionType::Like, "alice liked your idea"),
            (InteractionType::Comment, "alice commented on your idea"),
            (InteractionType::Build, "alice wants to build your idea"),
            (InteractionType::Share, "alice shared your idea"),
        ];
        for (kind, expected_title) in cases {
            let interaction = make_interaction(idea.id, actor.id, kind);
            service(&notifications, &users)
                .notify_interaction(&interaction, &idea)
                .await;
            let delivered = notifications.rows.lock().unwrap().last().cloned().unwrap();
            assert_eq!(delivered.title, expected_title);
            assert_eq!(delivered.content.as_deref(), Some("\"Solar batteries\""));
            assert_eq!(delivered.user_id, owner.id);
            assert_eq!(delivered.related_user_id, Some(actor.id));
            assert_eq!(delivered.related_idea_id, Some(idea.id));
        }
    }

    #[tokio::test]
    async fn actor_without_username_falls_back_to_placeholder() {
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let actor = make_user(None);
        users.push(actor.clone());
        let idea = make_idea(Uuid::new_v4(), "Quiet drones");

        let interaction = make_interaction(idea.id, actor.id, InteractionType::Like);
        service(&notifications, &users)
            .notify_interaction(&interaction, &idea)
            .await;

        let delivered = notifications.rows.lock().unwrap().last().cloned().unwrap();
        assert_eq!(delivered.title, "Someone liked your idea");
    }

    #[tokio::test]
    async fn self_interaction_is_silent() {
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let owner = make_user(Some("alice"));
        users.push(owner.clone());
        let idea = make_idea(owner.id, "Solar batteries");

        let interaction = make_interaction(idea.id, owner.id, InteractionType::Like);
        service(&notifications, &users)
            .notify_interaction(&interaction, &idea)
            .await;

        assert!(notifications.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mint_uses_the_fixed_title_for_the_owner() {
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let owner = make_user(Some("alice"));
        let idea = make_idea(owner.id, "Solar batteries");

        service(&notifications, &users).notify_mint(&idea).await;

        let delivered = notifications.rows.lock().unwrap().last().cloned().unwrap();
        assert_eq!(delivered.user_id, owner.id);
        assert_eq!(delivered.title, "Your idea has been minted as an NFT!");
        assert_eq!(
            delivered.content.as_deref(),
            Some("\"Solar batteries\" is now permanently stored on the blockchain.")
        );
        assert_eq!(delivered.kind, NotificationKind::Mint);
    }

    #[tokio::test]
    async fn follow_notifies_the_followed_user_with_empty_content() {
        let notifications = Arc::new(MockNotificationRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let follower = make_user(Some("bob"));
        let followed = make_user(Some("alice"));

        service(&notifications, &users)
            .notify_follow(&follower, followed.id)
            .await;

        let delivered = notifications.rows.lock().unwrap().last().cloned().unwrap();
        assert_eq!(delivered.user_id, followed.id);
        assert_eq!(delivered.title, "bob started following you");
        assert_eq!(delivered.content, None);
        assert_eq!(delivered.kind, NotificationKind::Follow);
    }

    #[tokio::test]
    async fn failed_delivery_is_swallowed() {
        let notifications = Arc::new(MockNotificationRepository::default());
        notifications.fail_inserts();
        let users = Arc::new(MockUserRepository::default());
        let owner = make_user(Some("alice"));
        let idea = make_idea(owner.id, "Solar batteries");

        // Must not panic or propagate; the triggering action goes on.
        service(&notifications, &users).notify_mint(&idea).await;

        assert!(notifications.rows.lock().unwrap().is_empty());
    }
}
