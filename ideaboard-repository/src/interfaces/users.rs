//! This module defines the `UserRepository` trait for account records and
//! profile aggregates.
use ideaboard_shared::types::{NewUser, ProfileUpdate, User, UserStats, WalletAddress};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with the user store.
///
/// Lookups only ever see active accounts; deactivation is a soft delete that
/// preserves referential history.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and returns the stored record.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Looks up an active user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Looks up an active user by their canonical wallet address.
    async fn find_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<User>, RepositoryError>;

    /// Looks up an active user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Applies the set profile fields to an active user.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The updated record.
    /// * `Ok(None)` - No active user with that id.
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError>;

    /// Refreshes the user's last-login timestamp.
    async fn touch_last_login(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Aggregates a user's profile counts (ideas, interactions given and
    /// received, follow edges) in one pass over the store.
    async fn stats(&self, id: Uuid) -> Result<Option<UserStats>, RepositoryError>;

    /// Soft-deletes a user. Returns whether a row was deactivated.
    async fn deactivate(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
