//! This module defines and re-exports the interfaces for the entity store.
//! It serves as a central point for accessing traits related to data interaction.
mod follows;
mod ideas;
mod interactions;
mod notifications;
mod users;

pub use follows::FollowRepository;
pub use ideas::IdeaRepository;
pub use interactions::InteractionRepository;
pub use notifications::NotificationRepository;
pub use users::UserRepository;
