//! PostgreSQL implementation of [`UserRepository`].
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ideaboard_shared::types::{NewUser, ProfileUpdate, User, UserStats, WalletAddress};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::UserRepository;

const USER_COLUMNS: &str =
    "id, wallet_address, username, bio, avatar_url, created_at, last_login, is_active";

/// PostgreSQL implementation of the user store.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    wallet_address: String,
    username: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    last_login: DateTime<Utc>,
    is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let wallet_address = WalletAddress::parse(&row.wallet_address)
            .map_err(|_| RepositoryError::InvalidWalletAddress(row.wallet_address.clone()))?;
        Ok(User {
            id: row.id,
            wallet_address,
            username: row.username,
            bio: row.bio,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            last_login: row.last_login,
            is_active: row.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserStatsRow {
    ideas: i64,
    minted_ideas: i64,
    interactions_given: i64,
    interactions_received: i64,
    followers: i64,
    following: i64,
}

impl From<UserStatsRow> for UserStats {
    fn from(row: UserStatsRow) -> Self {
        UserStats {
            ideas: row.ideas,
            minted_ideas: row.minted_ideas,
            interactions_given: row.interactions_given,
            interactions_received: row.interactions_received,
            followers: row.followers,
            following: row.following,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (wallet_address, username, bio, avatar_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.wallet_address.as_str())
        .bind(&user.username)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE wallet_address = $1 AND is_active = TRUE"
        ))
        .bind(wallet.as_str().to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND is_active = TRUE"
        ))
        .bind(username.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE users SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(username) = &update.username {
                assignments.push("username = ");
                assignments.push_bind_unseparated(username.clone());
            }
            if let Some(bio) = &update.bio {
                assignments.push("bio = ");
                assignments.push_bind_unseparated(bio.clone());
            }
            if let Some(avatar_url) = &update.avatar_url {
                assignments.push("avatar_url = ");
                assignments.push_bind_unseparated(avatar_url.clone());
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND is_active = TRUE RETURNING ");
        builder.push(USER_COLUMNS);

        let row: Option<UserRow> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn stats(&self, id: Uuid) -> Result<Option<UserStats>, RepositoryError> {
        let row: Option<UserStatsRow> = sqlx::query_as(
            "SELECT \
               COUNT(DISTINCT i.id) AS ideas, \
               COUNT(DISTINCT CASE WHEN i.minted_at IS NOT NULL THEN i.id END) AS minted_ideas, \
               COUNT(DISTINCT ig.id) AS interactions_given, \
               COUNT(DISTINCT ir.id) AS interactions_received, \
               COUNT(DISTINCT f1.id) AS followers, \
               COUNT(DISTINCT f2.id) AS following \
             FROM users u \
             LEFT JOIN ideas i ON u.id = i.user_id AND i.is_active = TRUE \
             LEFT JOIN interactions ig ON u.id = ig.user_id \
             LEFT JOIN interactions ir ON i.id = ir.idea_id \
             LEFT JOIN follows f1 ON u.id = f1.followed_id \
             LEFT JOIN follows f2 ON u.id = f2.follower_id \
             WHERE u.id = $1 AND u.is_active = TRUE \
             GROUP BY u.id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserStats::from))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let deactivated: Option<(Uuid,)> =
            sqlx::query_as("UPDATE users SET is_active = FALSE WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(deactivated.is_some())
    }
}
