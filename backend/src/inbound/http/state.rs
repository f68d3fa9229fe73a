//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever talk to domain
//! ports, so tests can swap in mocks or in-memory adapters without I/O.

use std::sync::Arc;

use actix_web::cookie::SameSite;

use crate::domain::ports::{
    CatalogQuery, ItemCommand, OAuthProvider, RegistrationCommand, SessionTokens, SignInService,
};

/// Attributes applied to the session token cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Whether the cookie carries the `Secure` flag.
    pub secure: bool,
    /// `SameSite` attribute.
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

/// Parameter object bundling the port implementations handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalog: Arc<dyn CatalogQuery>,
    pub items: Arc<dyn ItemCommand>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub sign_in: Arc<dyn SignInService>,
    pub tokens: Arc<dyn SessionTokens>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalog: Arc<dyn CatalogQuery>,
    pub items: Arc<dyn ItemCommand>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub sign_in: Arc<dyn SignInService>,
    pub tokens: Arc<dyn SessionTokens>,
    /// Google sign-in; `None` turns the OAuth endpoints into 503s.
    pub oauth: Option<Arc<dyn OAuthProvider>>,
    pub cookies: CookiePolicy,
    /// Where the OAuth callback sends the browser after signing in.
    pub post_login_redirect: String,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state without OAuth, with default cookie attributes and a
    /// post-login redirect of `/`.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            catalog,
            items,
            registration,
            sign_in,
            tokens,
        } = ports;
        Self {
            catalog,
            items,
            registration,
            sign_in,
            tokens,
            oauth: None,
            cookies: CookiePolicy::default(),
            post_login_redirect: "/".to_owned(),
        }
    }

    /// Enable OAuth sign-in through `provider`.
    #[must_use]
    pub fn with_oauth(mut self, provider: Arc<dyn OAuthProvider>) -> Self {
        self.oauth = Some(provider);
        self
    }

    /// Override the session cookie attributes.
    #[must_use]
    pub fn with_cookie_policy(mut self, cookies: CookiePolicy) -> Self {
        self.cookies = cookies;
        self
    }

    /// Override the post-login redirect target.
    #[must_use]
    pub fn with_post_login_redirect(mut self, target: impl Into<String>) -> Self {
        self.post_login_redirect = target.into();
        self
    }
}
