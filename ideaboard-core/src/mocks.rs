//! In-memory repository implementations backing the unit tests.
//!
//! These mirror the store contracts closely enough to exercise the service
//! logic: active-row visibility, the toggle delete-or-insert, the mint
//! immutability guard, and unique follow edges.
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use ideaboard_repository::{
    FollowRepository, IdeaRepository, InteractionRepository, NotificationRepository,
    RepositoryError, UserRepository,
};
use ideaboard_shared::types::{
    Follow, Idea, IdeaFilter, IdeaSort, IdeaWithEngagement, Interaction, InteractionStats,
    InteractionType, MintRecord, NewIdea, NewMint, NewNotification, NewUser, Notification,
    NotificationWithContext, Page, ProfileUpdate, ReactOutcome, SortOrder, User, UserStats,
    WalletAddress,
};
use uuid::Uuid;

const MOCK_WALLET: &str = "0x00000000000000000000000000000000000000aa";

pub(crate) fn make_user(username: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        wallet_address: WalletAddress::parse(MOCK_WALLET).unwrap(),
        username: username.map(str::to_string),
        bio: None,
        avatar_url: None,
        created_at: Utc::now(),
        last_login: Utc::now(),
        is_active: true,
    }
}

pub(crate) fn make_idea(owner: Uuid, title: &str) -> Idea {
    Idea {
        id: Uuid::new_v4(),
        user_id: owner,
        title: title.to_string(),
        content: "content".to_string(),
        category: Default::default(),
        tags: Vec::new(),
        ipfs_hash: None,
        mint: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        is_active: true,
    }
}

fn engagement(idea: Idea) -> IdeaWithEngagement {
    IdeaWithEngagement {
        idea,
        author_wallet: WalletAddress::parse(MOCK_WALLET).unwrap(),
        author_username: None,
        interaction_count: 0,
        likes: 0,
        comments: 0,
        builds: 0,
    }
}

fn store_error() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolClosed)
}

#[derive(Default)]
pub(crate) struct MockIdeaRepository {
    pub rows: Mutex<Vec<Idea>>,
}

impl MockIdeaRepository {
    pub fn push(&self, idea: Idea) {
        self.rows.lock().unwrap().push(idea);
    }

    pub fn get(&self, id: Uuid) -> Option<Idea> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|idea| idea.id == id)
            .cloned()
    }
}

#[async_trait]
impl IdeaRepository for MockIdeaRepository {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, RepositoryError> {
        let stored = Idea {
            id: Uuid::new_v4(),
            user_id: idea.user_id,
            title: idea.title,
            content: idea.content,
            category: idea.category,
            tags: idea.tags,
            ipfs_hash: idea.ipfs_hash,
            mint: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_active: true,
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_basic(&self, id: Uuid) -> Result<Option<Idea>, RepositoryError> {
        Ok(self.get(id).filter(|idea| idea.is_active))
    }

    async fn find_with_engagement(
        &self,
        id: Uuid,
    ) -> Result<Option<IdeaWithEngagement>, RepositoryError> {
        Ok(self
            .get(id)
            .filter(|idea| idea.is_active)
            .map(engagement))
    }

    async fn list(
        &self,
        _filter: &IdeaFilter,
        _sort: IdeaSort,
        _order: SortOrder,
        page: &Page,
    ) -> Result<(Vec<IdeaWithEngagement>, i64), RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let active: Vec<Idea> = rows.iter().filter(|idea| idea.is_active).cloned().collect();
        let total = active.len() as i64;
        let items = active
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(engagement)
            .collect();
        Ok((items, total))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: &Page,
    ) -> Result<(Vec<IdeaWithEngagement>, i64), RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let owned: Vec<Idea> = rows
            .iter()
            .filter(|idea| idea.is_active && idea.user_id == user_id)
            .cloned()
            .collect();
        let total = owned.len() as i64;
        let items = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(engagement)
            .collect();
        Ok((items, total))
    }

    async fn record_mint(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        mint: NewMint,
    ) -> Result<Option<Idea>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let eligible = rows.iter_mut().find(|idea| {
            idea.id == idea_id && idea.user_id == user_id && idea.is_active && idea.mint.is_none()
        });
        Ok(eligible.map(|idea| {
            idea.mint = Some(MintRecord {
                token_id: mint.token_id,
                transaction_hash: mint.transaction_hash,
                contract_address: mint.contract_address,
                minted_at: Utc::now(),
            });
            idea.updated_at = Utc::now();
            idea.clone()
        }))
    }

    async fn soft_delete(&self, idea_id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let eligible = rows
            .iter_mut()
            .find(|idea| idea.id == idea_id && idea.user_id == user_id && idea.is_active);
        Ok(match eligible {
            Some(idea) => {
                idea.is_active = false;
                true
            }
            None => false,
        })
    }
}

#[derive(Default)]
pub(crate) struct MockInteractionRepository {
    pub rows: Mutex<Vec<Interaction>>,
}

impl MockInteractionRepository {
    pub fn seed_like(&self, idea_id: Uuid, user_id: Uuid) {
        self.rows.lock().unwrap().push(Interaction {
            id: Uuid::new_v4(),
            idea_id,
            user_id,
            kind: InteractionType::Like,
            content: None,
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl InteractionRepository for MockInteractionRepository {
    async fn toggle(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
    ) -> Result<ReactOutcome, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(position) = rows.iter().position(|row| {
            row.idea_id == idea_id && row.user_id == user_id && row.kind == kind
        }) {
            rows.remove(position);
            return Ok(ReactOutcome::Removed);
        }
        let created = Interaction {
            id: Uuid::new_v4(),
            idea_id,
            user_id,
            kind,
            content: None,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(ReactOutcome::Created(created))
    }

    async fn insert_comment(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<Interaction, RepositoryError> {
        let created = Interaction {
            id: Uuid::new_v4(),
            idea_id,
            user_id,
            kind: InteractionType::Comment,
            content: Some(content),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_by_idea(
        &self,
        idea_id: Uuid,
        kind: Option<InteractionType>,
    ) -> Result<Vec<Interaction>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.idea_id == idea_id && kind.is_none_or(|kind| row.kind == kind))
            .cloned()
            .collect())
    }

    async fn find_user_interaction(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        kind: InteractionType,
    ) -> Result<Option<Interaction>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .find(|row| row.idea_id == idea_id && row.user_id == user_id && row.kind == kind)
            .cloned())
    }

    async fn stats(&self, idea_id: Uuid) -> Result<InteractionStats, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let mut stats = InteractionStats::default();
        for row in rows.iter().filter(|row| row.idea_id == idea_id) {
            match row.kind {
                InteractionType::Like => stats.likes += 1,
                InteractionType::Comment => stats.comments += 1,
                InteractionType::Build => stats.builds += 1,
                InteractionType::Share => stats.shares += 1,
            }
        }
        Ok(stats)
    }
}

#[derive(Default)]
pub(crate) struct MockNotificationRepository {
    pub rows: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl MockNotificationRepository {
    pub fn fail_inserts(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(store_error());
        }
        let created = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            content: notification.content,
            related_user_id: notification.related_user_id,
            related_idea_id: notification.related_idea_id,
            is_read: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: &Page,
    ) -> Result<(Vec<NotificationWithContext>, i64), RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<Notification> = rows
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id && (!unread_only || !row.is_read))
            .cloned()
            .collect();
        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|notification| NotificationWithContext {
                notification,
                related_username: None,
                related_idea_title: None,
            })
            .collect();
        Ok((items, total))
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let matching = rows
            .iter_mut()
            .find(|row| row.id == id && row.user_id == user_id);
        Ok(match matching {
            Some(row) => {
                row.is_read = true;
                true
            }
            None => false,
        })
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows
            .iter_mut()
            .filter(|row| row.user_id == user_id && !row.is_read)
        {
            row.is_read = true;
            affected += 1;
        }
        Ok(affected)
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id && !row.is_read)
            .count() as i64)
    }
}

#[derive(Default)]
pub(crate) struct MockUserRepository {
    pub rows: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub fn push(&self, user: User) {
        self.rows.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let created = User {
            id: Uuid::new_v4(),
            wallet_address: user.wallet_address,
            username: user.username,
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: Utc::now(),
            last_login: Utc::now(),
            is_active: true,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|user| user.id == id && user.is_active)
            .cloned())
    }

    async fn find_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<User>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|user| user.wallet_address == *wallet && user.is_active)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|user| user.username.as_deref() == Some(username) && user.is_active)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let matching = rows.iter_mut().find(|user| user.id == id && user.is_active);
        Ok(matching.map(|user| {
            if let Some(username) = update.username {
                user.username = Some(username);
            }
            if let Some(bio) = update.bio {
                user.bio = Some(bio);
            }
            if let Some(avatar_url) = update.avatar_url {
                user.avatar_url = Some(avatar_url);
            }
            user.clone()
        }))
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|user| user.id == id) {
            user.last_login = Utc::now();
        }
        Ok(())
    }

    async fn stats(&self, id: Uuid) -> Result<Option<UserStats>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|user| user.id == id && user.is_active)
            .map(|_| UserStats::default()))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(match rows.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.is_active = false;
                true
            }
            None => false,
        })
    }
}

#[derive(Default)]
pub(crate) struct MockFollowRepository {
    pub edges: Mutex<Vec<(Uuid, Uuid)>>,
}

#[async_trait]
impl FollowRepository for MockFollowRepository {
    async fn insert(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Follow>, RepositoryError> {
        let mut edges = self.edges.lock().unwrap();
        if edges.contains(&(follower_id, followed_id)) {
            return Ok(None);
        }
        edges.push((follower_id, followed_id));
        Ok(Some(Follow {
            id: Uuid::new_v4(),
            follower_id,
            followed_id,
            created_at: Utc::now(),
        }))
    }

    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepositoryError> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|edge| *edge != (follower_id, followed_id));
        Ok(edges.len() < before)
    }
}
