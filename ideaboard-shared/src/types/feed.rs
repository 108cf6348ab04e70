use serde::Serialize;

use crate::types::{Idea, IdeaCategory, WalletAddress};

/// Default page number when the caller sends none or an out-of-range value.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when the caller sends none or an out-of-range value.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Pagination window for listings.
///
/// Out-of-range values fall back to the documented defaults instead of
/// failing the request: `page` must be at least 1 and `limit` must be in
/// `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    limit: u32,
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        let page = if page >= 1 { page } else { DEFAULT_PAGE };
        let limit = if (1..=MAX_LIMIT).contains(&limit) {
            limit
        } else {
            DEFAULT_LIMIT
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Sort keys accepted by the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdeaSort {
    #[default]
    CreatedAt,
    UpdatedAt,
    MintedAt,
    InteractionCount,
}

impl IdeaSort {
    /// Parses a sort key, falling back to the default for anything
    /// unrecognized rather than failing the request.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "created_at" => Self::CreatedAt,
            "updated_at" => Self::UpdatedAt,
            "minted_at" => Self::MintedAt,
            "interaction_count" => Self::InteractionCount,
            _ => Self::CreatedAt,
        }
    }
}

/// Sort direction, defaulting to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses a direction, falling back to descending for anything
    /// unrecognized.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Optional filters for an idea listing. Every present filter must match.
#[derive(Debug, Clone, Default)]
pub struct IdeaFilter {
    /// Case-insensitive substring match over title or content.
    pub search: Option<String>,
    pub category: Option<IdeaCategory>,
    /// Matches on non-empty intersection with the idea's tag set.
    pub tags: Vec<String>,
    /// Author wallet, already normalized to the canonical lowercase form.
    pub author: Option<WalletAddress>,
    /// `Some(true)` for minted-only, `Some(false)` for unminted-only.
    pub minted: Option<bool>,
}

/// A single compiled filter condition.
///
/// Keeping the predicate set as data lets query assembly be exercised
/// without a database.
#[derive(Debug, Clone, PartialEq)]
pub enum IdeaPredicate {
    Search(String),
    Category(IdeaCategory),
    TagsOverlap(Vec<String>),
    Author(WalletAddress),
    Minted(bool),
}

impl IdeaFilter {
    /// Compiles the set filters into tagged predicates, skipping blank
    /// search terms and empty tag sets.
    pub fn predicates(&self) -> Vec<IdeaPredicate> {
        let mut predicates = Vec::new();
        if let Some(search) = self.search.as_deref() {
            let search = search.trim();
            if !search.is_empty() {
                predicates.push(IdeaPredicate::Search(search.to_string()));
            }
        }
        if let Some(category) = self.category {
            predicates.push(IdeaPredicate::Category(category));
        }
        if !self.tags.is_empty() {
            predicates.push(IdeaPredicate::TagsOverlap(self.tags.clone()));
        }
        if let Some(author) = &self.author {
            predicates.push(IdeaPredicate::Author(author.clone()));
        }
        if let Some(minted) = self.minted {
            predicates.push(IdeaPredicate::Minted(minted));
        }
        predicates
    }
}

/// One page of results plus the totals the caller needs for paging metadata.
///
/// `total` counts every match of the filter predicate, independent of the
/// window applied to this page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> FeedPage<T> {
    pub fn new(items: Vec<T>, total: i64, page: &Page) -> Self {
        Self {
            items,
            total,
            page: page.page(),
            limit: page.limit(),
        }
    }

    /// Number of pages implied by the total and the page size.
    pub fn pages(&self) -> i64 {
        let limit = i64::from(self.limit);
        (self.total + limit - 1) / limit
    }
}

/// An idea enriched with its author identity and live engagement counts.
///
/// Counts are aggregated from interaction rows at query time, never read
/// from a stored counter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IdeaWithEngagement {
    pub idea: Idea,
    pub author_wallet: WalletAddress,
    pub author_username: Option<String>,
    pub interaction_count: i64,
    pub likes: i64,
    pub comments: i64,
    pub builds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_keeps_in_range_values() {
        let page = Page::new(3, 50);
        assert_eq!(page.page(), 3);
        assert_eq!(page.limit(), 50);
        assert_eq!(page.offset(), 100);
    }

    #[test]
    fn page_falls_back_on_out_of_range_values() {
        assert_eq!(Page::new(0, 20).page(), DEFAULT_PAGE);
        assert_eq!(Page::new(1, 0).limit(), DEFAULT_LIMIT);
        assert_eq!(Page::new(1, 101).limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn sort_parse_falls_back_to_created_at() {
        assert_eq!(IdeaSort::parse("minted_at"), IdeaSort::MintedAt);
        assert_eq!(IdeaSort::parse("popularity"), IdeaSort::CreatedAt);
        assert_eq!(IdeaSort::parse(""), IdeaSort::CreatedAt);
    }

    #[test]
    fn order_parse_falls_back_to_desc() {
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Desc);
    }

    #[test]
    fn blank_filters_compile_to_no_predicates() {
        let filter = IdeaFilter {
            search: Some("   ".to_string()),
            ..IdeaFilter::default()
        };
        assert!(filter.predicates().is_empty());
    }

    #[test]
    fn set_filters_compile_in_order() {
        let author =
            WalletAddress::parse("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        let filter = IdeaFilter {
            search: Some("solar".to_string()),
            category: Some(IdeaCategory::Environment),
            tags: vec!["energy".to_string()],
            author: Some(author.clone()),
            minted: Some(true),
        };
        assert_eq!(
            filter.predicates(),
            vec![
                IdeaPredicate::Search("solar".to_string()),
                IdeaPredicate::Category(IdeaCategory::Environment),
                IdeaPredicate::TagsOverlap(vec!["energy".to_string()]),
                IdeaPredicate::Author(author),
                IdeaPredicate::Minted(true),
            ]
        );
    }

    #[test]
    fn feed_page_reports_page_count() {
        let page = Page::new(1, 20);
        let feed: FeedPage<u32> = FeedPage::new(Vec::new(), 41, &page);
        assert_eq!(feed.pages(), 3);
        let empty: FeedPage<u32> = FeedPage::new(Vec::new(), 0, &page);
        assert_eq!(empty.pages(), 0);
    }
}
