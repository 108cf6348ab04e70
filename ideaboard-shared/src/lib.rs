//! # Ideaboard Shared
//! This crate defines shared data structures and types used across the ideaboard backend.
//! It includes common definitions for users, ideas, interactions, notifications, follows,
//! and the feed filter/pagination types.
pub mod types;
