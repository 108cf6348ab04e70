use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when an interaction type string is not in the closed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown interaction type: {0}")]
pub struct UnknownInteractionType(pub String);

/// The closed set of reactions a user can have to an idea.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Like,
    Comment,
    Build,
    Share,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Build => "build",
            Self::Share => "share",
        }
    }

    /// Whether repeated reactions of this kind toggle between present and
    /// absent rather than accumulate. Comments are the only append-only kind.
    pub fn toggles(&self) -> bool {
        !matches!(self, Self::Comment)
    }
}

impl FromStr for InteractionType {
    type Err = UnknownInteractionType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "like" => Ok(Self::Like),
            "comment" => Ok(Self::Comment),
            "build" => Ok(Self::Build),
            "share" => Ok(Self::Share),
            other => Err(UnknownInteractionType(other.to_string())),
        }
    }
}

/// A typed reaction from one user to one idea.
///
/// At most one row exists per `(idea_id, user_id, kind)` for toggling kinds;
/// comments accumulate without a uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub kind: InteractionType,
    /// Present and non-empty for comments, optional otherwise.
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a reaction request.
///
/// Toggling kinds either create a row or remove the one that was present;
/// the `Removed` signal is distinguishable from a created record so callers
/// can tell an unlike from a like.
#[derive(Debug, Clone, PartialEq)]
pub enum ReactOutcome {
    Created(Interaction),
    Removed,
}

/// Per-kind engagement counts for one idea. Kinds with no rows count as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionStats {
    pub likes: i64,
    pub comments: i64,
    pub builds: i64,
    pub shares: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            InteractionType::Like,
            InteractionType::Comment,
            InteractionType::Build,
            InteractionType::Share,
        ] {
            assert_eq!(kind.as_str().parse::<InteractionType>(), Ok(kind));
        }
    }

    #[test]
    fn only_comments_accumulate() {
        assert!(InteractionType::Like.toggles());
        assert!(InteractionType::Build.toggles());
        assert!(InteractionType::Share.toggles());
        assert!(!InteractionType::Comment.toggles());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("upvote".parse::<InteractionType>().is_err());
    }
}
