//! Account lifecycle, profile updates, and the follow graph.
use std::sync::Arc;

use ideaboard_repository::{FollowRepository, UserRepository};
use ideaboard_shared::types::{NewUser, ProfileUpdate, User, UserStats, WalletAddress};
use tracing::info;
use uuid::Uuid;

use crate::errors::ProfileError;
use crate::notifications::NotificationService;

/// Owns accounts and the directed follow graph between them.
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    notifier: NotificationService,
}

impl ProfileService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            users,
            follows,
            notifier,
        }
    }

    /// Finds the account for a wallet, creating it on first successful
    /// authentication, and refreshes the last-login timestamp on a hit.
    ///
    /// A concurrent first login loses the insert race to the wallet's
    /// uniqueness constraint and resolves by reading the row the winner
    /// created.
    pub async fn login_or_register(&self, wallet: &str) -> Result<User, ProfileError> {
        let wallet = WalletAddress::parse(wallet)?;
        if let Some(user) = self.users.find_by_wallet(&wallet).await? {
            self.users.touch_last_login(user.id).await?;
            return Ok(user);
        }

        let new_user = NewUser {
            wallet_address: wallet.clone(),
            username: None,
            bio: None,
            avatar_url: None,
        };
        match self.users.insert(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, wallet = %user.wallet_address, "User registered");
                Ok(user)
            }
            Err(error) if error.is_unique_violation() => self
                .users
                .find_by_wallet(&wallet)
                .await?
                .ok_or(ProfileError::UserNotFound),
            Err(error) => Err(error.into()),
        }
    }

    /// Looks up a user by wallet address.
    pub async fn get_by_wallet(&self, wallet: &str) -> Result<User, ProfileError> {
        let wallet = WalletAddress::parse(wallet)?;
        self.users
            .find_by_wallet(&wallet)
            .await?
            .ok_or(ProfileError::UserNotFound)
    }

    /// Aggregate profile counts for a user.
    pub async fn user_stats(&self, user_id: Uuid) -> Result<UserStats, ProfileError> {
        self.users
            .stats(user_id)
            .await?
            .ok_or(ProfileError::UserNotFound)
    }

    /// Applies profile changes, enforcing username uniqueness across active
    /// accounts.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, ProfileError> {
        if let Some(username) = update.username.as_deref() {
            if let Some(existing) = self.users.find_by_username(username).await? {
                if existing.id != user_id {
                    return Err(ProfileError::UsernameTaken);
                }
            }
        }
        let updated = self
            .users
            .update_profile(user_id, update)
            .await?
            .ok_or(ProfileError::UserNotFound)?;
        info!(user_id = %updated.id, "User profile updated");
        Ok(updated)
    }

    /// Soft-deletes an account.
    pub async fn deactivate(&self, user_id: Uuid) -> Result<(), ProfileError> {
        if self.users.deactivate(user_id).await? {
            info!(user_id = %user_id, "User deactivated");
            Ok(())
        } else {
            Err(ProfileError::UserNotFound)
        }
    }

    /// Creates a follow edge and fans it out to the followed user.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The edge was created and the followed user notified.
    /// * `Ok(false)` - The edge already existed; nothing changed and no
    ///   second notification is sent.
    pub async fn follow(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<bool, ProfileError> {
        if follower_id == followed_id {
            return Err(ProfileError::SelfFollow);
        }
        let follower = self
            .users
            .find_by_id(follower_id)
            .await?
            .ok_or(ProfileError::UserNotFound)?;
        if self.users.find_by_id(followed_id).await?.is_none() {
            return Err(ProfileError::UserNotFound);
        }

        match self.follows.insert(follower_id, followed_id).await? {
            Some(follow) => {
                info!(follow_id = %follow.id, follower_id = %follower_id, followed_id = %followed_id, "Follow created");
                self.notifier.notify_follow(&follower, followed_id).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a follow edge. Returns whether an edge was present.
    pub async fn unfollow(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<bool, ProfileError> {
        self.follows
            .delete(follower_id, followed_id)
            .await
            .map_err(Into::into)
    }
}
