//! Session view reconstructed from a verified token.
//!
//! Sessions are never stored server-side. Inbound adapters rebuild a
//! [`SessionUser`] from the signed token on each request and hand it to
//! services explicitly.

use serde::{Deserialize, Serialize};

use super::{Role, User, UserId};

/// The authenticated principal attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account identifier.
    pub id: UserId,
    /// Authorisation role.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A signed, opaque session token.
///
/// `Debug` output is redacted; the token is a bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Encoded token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper, returning the encoded token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// A session issued after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    /// Principal embedded in the token.
    pub user: SessionUser,
    /// Signed token to hand back to the client.
    pub token: SessionToken,
}

/// Terminal state of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Identity confirmed and a session token issued.
    Authenticated(IssuedSession),
    /// No session issued. The cause is deliberately not exposed.
    Rejected,
}

impl SignInOutcome {
    /// Whether a session was issued.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
