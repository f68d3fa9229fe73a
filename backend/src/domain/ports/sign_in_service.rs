//! Driving port for sign-in flows.
//!
//! Sign-in never fails with an error: every problem collapses into
//! [`SignInOutcome::Rejected`](crate::domain::SignInOutcome::Rejected) so
//! callers cannot leak which check failed.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, SignInOutcome};

use super::OAuthIdentity;

/// Authenticates users and issues session tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInService: Send + Sync {
    /// Email and password sign-in.
    async fn sign_in_with_credentials(&self, credentials: &LoginCredentials) -> SignInOutcome;

    /// Sign-in with an identity confirmed by an OAuth provider.
    async fn sign_in_with_oauth(&self, identity: &OAuthIdentity) -> SignInOutcome;
}
