//! Error types for the ideaboard core services.
//! One enum per service module, each wrapping store failures unchanged.
mod feed;
mod ideas;
mod notifications;
mod profiles;
mod reactions;

pub use feed::FeedError;
pub use ideas::IdeaError;
pub use notifications::NotificationError;
pub use profiles::ProfileError;
pub use reactions::ReactionError;
