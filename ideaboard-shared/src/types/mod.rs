mod feed;
mod follow;
mod idea;
mod interaction;
mod notification;
mod user;

pub use feed::{
    DEFAULT_LIMIT, DEFAULT_PAGE, FeedPage, IdeaFilter, IdeaPredicate, IdeaSort,
    IdeaWithEngagement, MAX_LIMIT, Page, SortOrder,
};
pub use follow::Follow;
pub use idea::{Idea, IdeaCategory, MintRecord, NewIdea, NewMint, UnknownCategory};
pub use interaction::{
    Interaction, InteractionStats, InteractionType, ReactOutcome, UnknownInteractionType,
};
pub use notification::{
    NewNotification, Notification, NotificationKind, NotificationWithContext,
    UnknownNotificationKind,
};
pub use user::{InvalidWalletAddress, NewUser, ProfileUpdate, User, UserStats, WalletAddress};
