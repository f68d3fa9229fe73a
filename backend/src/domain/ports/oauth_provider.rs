//! Port for third-party OAuth sign-in providers.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while talking to an OAuth provider.
    pub enum OAuthError {
        /// Provider settings are unusable, for example a malformed URL.
        Configuration { message: String } => "oauth provider misconfigured: {message}",
        /// Exchanging the authorisation code failed.
        Exchange { message: String } => "oauth code exchange failed: {message}",
        /// The profile response lacked required fields.
        Profile { message: String } => "oauth profile unusable: {message}",
    }
}

/// Identity asserted by a provider after a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthIdentity {
    /// Provider name, for example `google`.
    pub provider: String,
    /// Subject identifier issued by the provider.
    pub account_id: String,
    /// Verified email address.
    pub email: String,
    /// Display name; may be empty.
    pub name: String,
    /// Avatar URL.
    pub image: Option<String>,
}

/// An OAuth 2.0 authorisation-code provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Provider name used in URLs and stored links.
    fn name(&self) -> &'static str;

    /// URL the browser is sent to, carrying the anti-forgery `state`.
    fn authorize_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Exchange an authorisation code for the user's identity.
    async fn exchange_code(&self, code: &str) -> Result<OAuthIdentity, OAuthError>;
}
