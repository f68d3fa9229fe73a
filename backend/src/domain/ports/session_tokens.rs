//! Port for signing and verifying stateless session tokens.
use crate::domain::{SessionToken, SessionUser};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenError {
        /// Signing a new token failed.
        Encode { message: String } => "session token could not be signed: {message}",
        /// The token is malformed, tampered with or carries bad claims.
        Invalid { message: String } => "session token rejected: {message}",
        /// The token is past its expiry.
        Expired => "session token expired",
    }
}

/// Issues and verifies signed tokens carrying a [`SessionUser`].
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Sign a token for `user`.
    fn issue(&self, user: &SessionUser) -> Result<SessionToken, SessionTokenError>;

    /// Verify `token` and rebuild the session it carries.
    fn verify(&self, token: &str) -> Result<SessionUser, SessionTokenError>;

    /// Lifetime of issued tokens, in seconds.
    fn ttl_seconds(&self) -> i64;
}
