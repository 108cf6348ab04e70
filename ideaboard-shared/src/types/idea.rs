use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a category string is not in the closed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown idea category: {0}")]
pub struct UnknownCategory(pub String);

/// Topic bucket for an idea.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IdeaCategory {
    #[default]
    General,
    Technology,
    Business,
    Science,
    Arts,
    Social,
    Environment,
    Education,
    Health,
}

impl IdeaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Technology => "technology",
            Self::Business => "business",
            Self::Science => "science",
            Self::Arts => "arts",
            Self::Social => "social",
            Self::Environment => "environment",
            Self::Education => "education",
            Self::Health => "health",
        }
    }
}

impl FromStr for IdeaCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "general" => Ok(Self::General),
            "technology" => Ok(Self::Technology),
            "business" => Ok(Self::Business),
            "science" => Ok(Self::Science),
            "arts" => Ok(Self::Arts),
            "social" => Ok(Self::Social),
            "environment" => Ok(Self::Environment),
            "education" => Ok(Self::Education),
            "health" => Ok(Self::Health),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// On-chain mint record for an idea.
///
/// All fields are written together when the external mint confirmation lands
/// and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MintRecord {
    pub token_id: i64,
    pub transaction_hash: String,
    pub contract_address: String,
    pub minted_at: DateTime<Utc>,
}

/// A user-authored content item, optionally anchored to content-addressed
/// storage and optionally associated with an on-chain mint record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: IdeaCategory,
    /// Tag membership is a set; ordering carries no meaning.
    pub tags: Vec<String>,
    pub ipfs_hash: Option<String>,
    pub mint: Option<MintRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Idea {
    pub fn is_minted(&self) -> bool {
        self.mint.is_some()
    }
}

/// Input for creating an idea. The content hash is produced by the external
/// pinning service and supplied by the caller, never computed here.
#[derive(Debug, Clone)]
pub struct NewIdea {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: IdeaCategory,
    pub tags: Vec<String>,
    pub ipfs_hash: Option<String>,
}

/// Mint fields recorded after an external mint confirmation.
#[derive(Debug, Clone)]
pub struct NewMint {
    pub token_id: i64,
    pub transaction_hash: String,
    pub contract_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in [
            IdeaCategory::General,
            IdeaCategory::Technology,
            IdeaCategory::Business,
            IdeaCategory::Science,
            IdeaCategory::Arts,
            IdeaCategory::Social,
            IdeaCategory::Environment,
            IdeaCategory::Education,
            IdeaCategory::Health,
        ] {
            assert_eq!(category.as_str().parse::<IdeaCategory>(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "finance".parse::<IdeaCategory>(),
            Err(UnknownCategory("finance".to_string()))
        );
    }
}
