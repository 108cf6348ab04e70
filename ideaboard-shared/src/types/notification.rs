use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::InteractionType;

/// Error returned when a notification kind string is not in the closed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct UnknownNotificationKind(pub String);

/// What triggered a notification: one of the interaction kinds, a mint
/// confirmation, or a new follower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Build,
    Share,
    Mint,
    Follow,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Build => "build",
            Self::Share => "share",
            Self::Mint => "mint",
            Self::Follow => "follow",
        }
    }
}

impl From<InteractionType> for NotificationKind {
    fn from(kind: InteractionType) -> Self {
        match kind {
            InteractionType::Like => Self::Like,
            InteractionType::Comment => Self::Comment,
            InteractionType::Build => Self::Build,
            InteractionType::Share => Self::Share,
        }
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "like" => Ok(Self::Like),
            "comment" => Ok(Self::Comment),
            "build" => Ok(Self::Build),
            "share" => Ok(Self::Share),
            "mint" => Ok(Self::Mint),
            "follow" => Ok(Self::Follow),
            other => Err(UnknownNotificationKind(other.to_string())),
        }
    }
}

/// An inbox entry derived from another entity's state change.
///
/// Notifications are only ever created as a side effect; the recipient never
/// creates their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    /// The recipient.
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub content: Option<String>,
    /// The actor that caused the notification, when there is one.
    pub related_user_id: Option<Uuid>,
    pub related_idea_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification joined with display context for its related records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationWithContext {
    pub notification: Notification,
    pub related_username: Option<String>,
    pub related_idea_title: Option<String>,
}

/// Input for writing a notification row.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub content: Option<String>,
    pub related_user_id: Option<Uuid>,
    pub related_idea_id: Option<Uuid>,
}
