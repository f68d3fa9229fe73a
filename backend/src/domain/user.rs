//! User accounts.
//!
//! A user either registered with a password (credential account) or signed
//! in through an OAuth provider (in which case `password_hash` is absent and
//! the credential path must reject them).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to accounts that do not specify one.
pub const DEFAULT_ROLE: &str = "user";

/// Stable user identifier.
///
/// # Examples
/// ```
/// use catalog::domain::UserId;
///
/// let id: UserId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("uuid");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Authorisation role carried by accounts and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Wrap a stored role name, falling back to [`DEFAULT_ROLE`] when blank.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::default()
        } else {
            Self(value)
        }
    }

    /// Role name as stored.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Role {
    fn default() -> Self {
        Self(DEFAULT_ROLE.to_owned())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored one-way password hash in PHC string format.
///
/// `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC-formatted hash string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// External identity linked to an account created through OAuth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthLink {
    /// Provider name, for example `google`.
    pub provider: String,
    /// Subject identifier issued by the provider.
    pub account_id: String,
}

/// A stored user account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Primary identifier.
    pub id: UserId,
    /// National identifier; unique when present. OAuth accounts lack one.
    pub nid: Option<String>,
    /// Display name.
    pub name: String,
    /// Lower-cased, trimmed email; unique.
    pub email: String,
    /// Contact number supplied at registration.
    pub contact: Option<String>,
    /// Password hash; absent for OAuth-only accounts.
    pub password_hash: Option<PasswordDigest>,
    /// Authorisation role.
    pub role: Role,
    /// OAuth provider link for accounts created by sign-in.
    pub oauth: Option<OAuthLink>,
    /// Avatar URL reported by the OAuth provider.
    pub image: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account may sign in through the credential path.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Canonical form used to store and look up email addresses.
///
/// # Examples
/// ```
/// use catalog::domain::normalise_email;
///
/// assert_eq!(normalise_email("  Ada@Example.COM "), "ada@example.com");
/// ```
pub fn normalise_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", DEFAULT_ROLE)]
    #[case("   ", DEFAULT_ROLE)]
    #[case("admin", "admin")]
    fn role_defaults_when_blank(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Role::new(raw).as_str(), expected);
    }

    #[rstest]
    fn password_digest_debug_is_redacted() {
        let digest = PasswordDigest::new("$argon2id$v=19$secret");
        assert!(!format!("{digest:?}").contains("secret"));
    }

    #[rstest]
    fn user_id_rejects_non_uuid() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }
}
