//! PostgreSQL implementation of [`IdeaRepository`].
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ideaboard_shared::types::{
    Idea, IdeaFilter, IdeaSort, IdeaWithEngagement, MintRecord, NewIdea, NewMint, Page, SortOrder,
    WalletAddress,
};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::IdeaRepository;
use crate::postgres::feed_query;

/// PostgreSQL implementation of the idea store.
///
/// Listings are assembled dynamically from the structured filter (see
/// [`feed_query`]); engagement counts come from a live aggregation over the
/// interaction rows, so every read reflects the table state at query time.
pub struct PostgresIdeaRepository {
    pool: PgPool,
}

impl PostgresIdeaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdeaRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    category: String,
    tags: Vec<String>,
    ipfs_hash: Option<String>,
    token_id: Option<i64>,
    transaction_hash: Option<String>,
    contract_address: Option<String>,
    minted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
}

impl TryFrom<IdeaRow> for Idea {
    type Error = RepositoryError;

    fn try_from(row: IdeaRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|_| RepositoryError::InvalidCategory(row.category.clone()))?;
        let mint = match (
            row.token_id,
            row.transaction_hash,
            row.contract_address,
            row.minted_at,
        ) {
            (Some(token_id), Some(transaction_hash), Some(contract_address), Some(minted_at)) => {
                Some(MintRecord {
                    token_id,
                    transaction_hash,
                    contract_address,
                    minted_at,
                })
            }
            (None, None, None, None) => None,
            _ => return Err(RepositoryError::InconsistentMint(row.id)),
        };
        Ok(Idea {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            category,
            tags: row.tags,
            ipfs_hash: row.ipfs_hash,
            mint,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_active: row.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct IdeaFeedRow {
    #[sqlx(flatten)]
    idea: IdeaRow,
    wallet_address: String,
    username: Option<String>,
    interaction_count: i64,
    likes_count: i64,
    comments_count: i64,
    builds_count: i64,
}

impl TryFrom<IdeaFeedRow> for IdeaWithEngagement {
    type Error = RepositoryError;

    fn try_from(row: IdeaFeedRow) -> Result<Self, Self::Error> {
        let author_wallet = WalletAddress::parse(&row.wallet_address)
            .map_err(|_| RepositoryError::InvalidWalletAddress(row.wallet_address.clone()))?;
        Ok(IdeaWithEngagement {
            idea: row.idea.try_into()?,
            author_wallet,
            author_username: row.username,
            interaction_count: row.interaction_count,
            likes: row.likes_count,
            comments: row.comments_count,
            builds: row.builds_count,
        })
    }
}

fn collect_feed_rows(
    rows: Vec<IdeaFeedRow>,
) -> Result<Vec<IdeaWithEngagement>, RepositoryError> {
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(row.try_into()?);
    }
    Ok(items)
}

#[async_trait]
impl IdeaRepository for PostgresIdeaRepository {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, RepositoryError> {
        let row: IdeaRow = sqlx::query_as(
            "INSERT INTO ideas (user_id, title, content, category, tags, ipfs_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(idea.user_id)
        .bind(&idea.title)
        .bind(&idea.content)
        .bind(idea.category.as_str())
        .bind(&idea.tags)
        .bind(&idea.ipfs_hash)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_basic(&self, id: Uuid) -> Result<Option<Idea>, RepositoryError> {
        let row: Option<IdeaRow> =
            sqlx::query_as("SELECT * FROM ideas WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Idea::try_from).transpose()
    }

    async fn find_with_engagement(
        &self,
        id: Uuid,
    ) -> Result<Option<IdeaWithEngagement>, RepositoryError> {
        let mut builder = QueryBuilder::new(feed_query::FEED_SELECT);
        builder.push(" AND i.id = ");
        builder.push_bind(id);
        builder.push(" GROUP BY i.id, u.wallet_address, u.username");
        let row: Option<IdeaFeedRow> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;
        row.map(IdeaWithEngagement::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &IdeaFilter,
        sort: IdeaSort,
        order: SortOrder,
        page: &Page,
    ) -> Result<(Vec<IdeaWithEngagement>, i64), RepositoryError> {
        let mut builder = QueryBuilder::new(feed_query::FEED_SELECT);
        feed_query::push_predicates(&mut builder, filter);
        feed_query::push_listing_tail(&mut builder, sort, order, page);
        let rows: Vec<IdeaFeedRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        // Total over the same predicate, independent of the window.
        let mut count_builder = QueryBuilder::new(feed_query::FEED_COUNT);
        feed_query::push_predicates(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((collect_feed_rows(rows)?, total))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: &Page,
    ) -> Result<(Vec<IdeaWithEngagement>, i64), RepositoryError> {
        let mut builder = QueryBuilder::new(feed_query::FEED_SELECT);
        builder.push(" AND i.user_id = ");
        builder.push_bind(user_id);
        feed_query::push_listing_tail(
            &mut builder,
            IdeaSort::CreatedAt,
            SortOrder::Desc,
            page,
        );
        let rows: Vec<IdeaFeedRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ideas WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((collect_feed_rows(rows)?, total))
    }

    async fn record_mint(
        &self,
        idea_id: Uuid,
        user_id: Uuid,
        mint: NewMint,
    ) -> Result<Option<Idea>, RepositoryError> {
        // The `minted_at IS NULL` guard makes the mint group immutable: a
        // second call finds no eligible row.
        let row: Option<IdeaRow> = sqlx::query_as(
            "UPDATE ideas \
             SET token_id = $1, transaction_hash = $2, contract_address = $3, \
                 minted_at = NOW(), updated_at = NOW() \
             WHERE id = $4 AND user_id = $5 AND is_active = TRUE AND minted_at IS NULL \
             RETURNING *",
        )
        .bind(mint.token_id)
        .bind(&mint.transaction_hash)
        .bind(&mint.contract_address)
        .bind(idea_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Idea::try_from).transpose()
    }

    async fn soft_delete(&self, idea_id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError> {
        let deleted: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE ideas SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_active = TRUE \
             RETURNING id",
        )
        .bind(idea_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(deleted.is_some())
    }
}
