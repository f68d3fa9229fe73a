//! Request session helpers.
//!
//! [`SessionContext`] rebuilds the signed-in user from the `catalog_session`
//! cookie on every request; nothing is stored server-side. [`OAuthHandshake`]
//! wraps the encrypted Actix session that carries the OAuth `state` value
//! between the start and callback requests.

use actix_session::Session;
use actix_web::cookie::{Cookie, time::Duration as CookieDuration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::state::{CookiePolicy, HttpState};
use crate::domain::{Error, SessionToken, SessionUser};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "catalog_session";
pub(crate) const OAUTH_STATE_KEY: &str = "oauth_state";

/// The session attached to the current request, if any.
///
/// Missing, tampered and expired tokens all resolve to an anonymous context.
#[derive(Debug, Clone, Default)]
pub struct SessionContext(Option<SessionUser>);

impl SessionContext {
    /// Context for a verified user.
    pub fn authenticated(user: SessionUser) -> Self {
        Self(Some(user))
    }

    /// Context without a session.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }

    /// Require a session or fail with `401 Unauthorized`.
    pub fn require_user(&self, message: &str) -> Result<&SessionUser, Error> {
        self.user().ok_or_else(|| Error::unauthorized(message))
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, Error> {
        let state = req
            .app_data::<web::Data<HttpState>>()
            .ok_or_else(|| Error::internal("http state is not registered"))?;
        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return Ok(Self::anonymous());
        };
        match state.tokens.verify(cookie.value()) {
            Ok(user) => Ok(Self::authenticated(user)),
            Err(err) => {
                debug!(error = %err, "ignoring unusable session cookie");
                Ok(Self::anonymous())
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req).map_err(actix_web::Error::from))
    }
}

/// Cookie carrying `token`, living as long as the token does.
pub fn session_cookie(
    token: SessionToken,
    ttl_seconds: i64,
    policy: CookiePolicy,
) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.into_inner())
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .max_age(CookieDuration::seconds(ttl_seconds))
        .finish()
}

/// Expired cookie that makes the browser drop the session token.
pub fn clearing_cookie(policy: CookiePolicy) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .finish();
    cookie.make_removal();
    cookie
}

/// Encrypted cookie session holding the OAuth anti-forgery state.
#[derive(Clone)]
pub struct OAuthHandshake(Session);

impl OAuthHandshake {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `state` until the provider calls back.
    pub fn remember(&self, state: &str) -> Result<(), Error> {
        self.0
            .insert(OAUTH_STATE_KEY, state)
            .map_err(|err| Error::internal(format!("failed to persist oauth state: {err}")))
    }

    /// Take the remembered state, clearing it so it cannot be replayed.
    pub fn take(&self) -> Option<String> {
        match self.0.remove_as::<String>(OAUTH_STATE_KEY) {
            Some(Ok(state)) => Some(state),
            Some(Err(raw)) => {
                debug!(raw = %raw, "discarding malformed oauth state");
                None
            }
            None => None,
        }
    }
}

impl FromRequest for OAuthHandshake {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(OAuthHandshake::new) })
    }
}
