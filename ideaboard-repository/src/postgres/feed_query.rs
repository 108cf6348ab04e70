//! Dynamic feed query assembly.
//!
//! Compiles the structured filter predicates into parameterized SQL with
//! `QueryBuilder`: user input only ever reaches the query through binds,
//! and the same predicate-pushing function serves both the page query and
//! the total-count query so the two can never disagree.
use ideaboard_shared::types::{IdeaFilter, IdeaPredicate, IdeaSort, Page, SortOrder};
use sqlx::{Postgres, QueryBuilder};

/// Shared SELECT head for enriched idea listings. Engagement counts are
/// aggregated from the interaction rows at query time.
pub(super) const FEED_SELECT: &str = "SELECT i.*, u.wallet_address, u.username, \
 COUNT(DISTINCT x.id) AS interaction_count, \
 COUNT(DISTINCT CASE WHEN x.interaction_type = 'like' THEN x.id END) AS likes_count, \
 COUNT(DISTINCT CASE WHEN x.interaction_type = 'comment' THEN x.id END) AS comments_count, \
 COUNT(DISTINCT CASE WHEN x.interaction_type = 'build' THEN x.id END) AS builds_count \
 FROM ideas i \
 JOIN users u ON i.user_id = u.id \
 LEFT JOIN interactions x ON i.id = x.idea_id \
 WHERE i.is_active = TRUE";

/// Count head over the same joins and base predicate as [`FEED_SELECT`].
pub(super) const FEED_COUNT: &str = "SELECT COUNT(DISTINCT i.id) \
 FROM ideas i \
 JOIN users u ON i.user_id = u.id \
 WHERE i.is_active = TRUE";

/// Appends one `AND ...` clause per compiled predicate.
pub(super) fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, filter: &IdeaFilter) {
    for predicate in filter.predicates() {
        builder.push(" AND ");
        match predicate {
            IdeaPredicate::Search(term) => {
                let pattern = format!("%{term}%");
                builder.push("(i.title ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" OR i.content ILIKE ");
                builder.push_bind(pattern);
                builder.push(")");
            }
            IdeaPredicate::Category(category) => {
                builder.push("i.category = ");
                builder.push_bind(category.as_str());
            }
            IdeaPredicate::TagsOverlap(tags) => {
                builder.push("i.tags && ");
                builder.push_bind(tags);
            }
            IdeaPredicate::Author(author) => {
                builder.push("u.wallet_address = ");
                builder.push_bind(author.as_str().to_string());
            }
            IdeaPredicate::Minted(true) => {
                builder.push("i.minted_at IS NOT NULL");
            }
            IdeaPredicate::Minted(false) => {
                builder.push("i.minted_at IS NULL");
            }
        }
    }
}

/// SQL sort expression for a feed sort key. `InteractionCount` orders by the
/// aggregate alias, everything else by the idea column.
pub(super) fn sort_expr(sort: IdeaSort) -> &'static str {
    match sort {
        IdeaSort::CreatedAt => "i.created_at",
        IdeaSort::UpdatedAt => "i.updated_at",
        IdeaSort::MintedAt => "i.minted_at",
        IdeaSort::InteractionCount => "interaction_count",
    }
}

pub(super) fn order_expr(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// Appends grouping, deterministic ordering, and the pagination window.
pub(super) fn push_listing_tail(
    builder: &mut QueryBuilder<'_, Postgres>,
    sort: IdeaSort,
    order: SortOrder,
    page: &Page,
) {
    builder.push(" GROUP BY i.id, u.wallet_address, u.username ORDER BY ");
    builder.push(sort_expr(sort));
    builder.push(" ");
    builder.push(order_expr(order));
    // Stable tiebreak so equal sort keys cannot drift across pages.
    builder.push(", i.id DESC LIMIT ");
    builder.push_bind(i64::from(page.limit()));
    builder.push(" OFFSET ");
    builder.push_bind(page.offset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideaboard_shared::types::{IdeaCategory, WalletAddress};

    fn filter_sql(filter: &IdeaFilter) -> String {
        let mut builder = QueryBuilder::new(FEED_COUNT);
        push_predicates(&mut builder, filter);
        builder.sql().to_string()
    }

    #[test]
    fn empty_filter_adds_no_clauses() {
        assert_eq!(filter_sql(&IdeaFilter::default()), FEED_COUNT);
    }

    #[test]
    fn search_compiles_to_bound_ilike_over_title_and_content() {
        let filter = IdeaFilter {
            search: Some("solar".to_string()),
            ..IdeaFilter::default()
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("(i.title ILIKE $1 OR i.content ILIKE $2)"));
        assert!(!sql.contains("solar"), "search term must only appear as a bind");
    }

    #[test]
    fn tags_compile_to_array_overlap() {
        let filter = IdeaFilter {
            tags: vec!["energy".to_string(), "climate".to_string()],
            ..IdeaFilter::default()
        };
        assert!(filter_sql(&filter).contains("i.tags && $1"));
    }

    #[test]
    fn minted_flag_compiles_to_null_checks() {
        let minted = IdeaFilter {
            minted: Some(true),
            ..IdeaFilter::default()
        };
        assert!(filter_sql(&minted).contains("i.minted_at IS NOT NULL"));
        let unminted = IdeaFilter {
            minted: Some(false),
            ..IdeaFilter::default()
        };
        assert!(filter_sql(&unminted).contains("i.minted_at IS NULL"));
    }

    #[test]
    fn all_predicates_chain_with_and() {
        let filter = IdeaFilter {
            search: Some("solar".to_string()),
            category: Some(IdeaCategory::Environment),
            tags: vec!["energy".to_string()],
            author: Some(
                WalletAddress::parse("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap(),
            ),
            minted: Some(true),
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("i.category = $3"));
        assert!(sql.contains("i.tags && $4"));
        assert!(sql.contains("u.wallet_address = $5"));
        assert!(sql.contains("i.minted_at IS NOT NULL"));
    }

    #[test]
    fn listing_tail_orders_with_stable_tiebreak() {
        let mut builder = QueryBuilder::new(FEED_SELECT);
        push_listing_tail(
            &mut builder,
            IdeaSort::InteractionCount,
            SortOrder::Desc,
            &Page::new(2, 20),
        );
        let sql = builder.sql().to_string();
        assert!(sql.contains("ORDER BY interaction_count DESC, i.id DESC"));
        assert!(sql.contains("LIMIT $1 OFFSET $2"));
    }
}
