use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a wallet address fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid wallet address: {0}")]
pub struct InvalidWalletAddress(pub String);

/// A case-normalized EVM wallet address (`0x` followed by 40 hex characters).
///
/// The lowercase form is the canonical identity of a user; every comparison
/// and every stored copy uses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Validates and normalizes a raw wallet address string.
    ///
    /// # Arguments
    ///
    /// * `raw` - The address as received from the caller, in any casing.
    ///
    /// # Returns
    ///
    /// * `Ok(WalletAddress)` - The lowercase canonical form.
    /// * `Err(InvalidWalletAddress)` - The input is not `0x` + 40 hex characters.
    pub fn parse(raw: &str) -> Result<Self, InvalidWalletAddress> {
        let candidate = raw.trim().to_ascii_lowercase();
        let hex = candidate
            .strip_prefix("0x")
            .ok_or_else(|| InvalidWalletAddress(raw.to_string()))?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidWalletAddress(raw.to_string()));
        }
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered user, created on first successful wallet authentication.
///
/// Users are soft-deleted: `is_active` is flipped off and the row is kept
/// for referential history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub wallet_address: WalletAddress,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub is_active: bool,
}

impl User {
    /// Display name used in notification titles: the username when set,
    /// otherwise a generic placeholder.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Someone")
    }
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub wallet_address: WalletAddress,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Profile fields a user may change after registration. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.bio.is_none() && self.avatar_url.is_none()
    }
}

/// Aggregate counts shown on a user's profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub ideas: i64,
    pub minted_ideas: i64,
    pub interactions_given: i64,
    pub interactions_received: i64,
    pub followers: i64,
    pub following: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_casing() {
        let address = WalletAddress::parse("0xD8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap();
        assert_eq!(address.as_str(), "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn parse_trims_whitespace() {
        let address = WalletAddress::parse("  0xd8da6bf26964af9d7eed9e03e53415d37aa96045 ").unwrap();
        assert_eq!(address.as_str(), "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(WalletAddress::parse("d8da6bf26964af9d7eed9e03e53415d37aa96045").is_err());
    }

    #[test]
    fn parse_rejects_bad_length_and_non_hex() {
        assert!(WalletAddress::parse("0xd8da6bf2").is_err());
        assert!(WalletAddress::parse("0xzzda6bf26964af9d7eed9e03e53415d37aa96045").is_err());
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        let wallet = WalletAddress::parse("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        let mut user = User {
            id: Uuid::new_v4(),
            wallet_address: wallet,
            username: None,
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
            last_login: Utc::now(),
            is_active: true,
        };
        assert_eq!(user.display_name(), "Someone");
        user.username = Some("alice".to_string());
        assert_eq!(user.display_name(), "alice");
    }
}
