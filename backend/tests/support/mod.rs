//! Shared harness for HTTP integration tests.
//!
//! Builds the real services over the in-memory stores, a cheap Argon2
//! hasher, JWT tokens with a fixed secret and, optionally, a scripted Google
//! provider, then mounts `configure_api` the same way the server does.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use catalog::Trace;
use catalog::domain::ports::{OAuthError, OAuthIdentity, OAuthProvider};
use catalog::domain::{CatalogService, Item, ItemService, RegistrationService, SessionIssuer};
use catalog::inbound::http::configure_api;
use catalog::inbound::http::state::{CookiePolicy, HttpState, HttpStatePorts};
use catalog::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use catalog::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};

/// Cookie name used by the handshake middleware in tests.
pub const HANDSHAKE_COOKIE: &str = "handshake";
/// Authorisation code the scripted provider accepts.
pub const GOOD_CODE: &str = "good-code";

const TOKEN_SECRET: [u8; 32] = [7; 32];
const TOKEN_TTL_SECONDS: i64 = 3_600;

/// Google stand-in that accepts [`GOOD_CODE`] and asserts `identity`.
pub struct ScriptedGoogle {
    identity: OAuthIdentity,
}

impl ScriptedGoogle {
    pub fn new(identity: OAuthIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl OAuthProvider for ScriptedGoogle {
    fn name(&self) -> &'static str {
        "google"
    }

    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        Ok(format!("https://accounts.example.test/auth?state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthIdentity, OAuthError> {
        if code == GOOD_CODE {
            Ok(self.identity.clone())
        } else {
            Err(OAuthError::exchange("invalid_grant"))
        }
    }
}

/// Identity asserted by the scripted provider.
pub fn google_identity(email: &str) -> OAuthIdentity {
    OAuthIdentity {
        provider: "google".to_owned(),
        account_id: "google-sub-42".to_owned(),
        email: email.to_owned(),
        name: "Grace Hopper".to_owned(),
        image: Some("https://example.test/grace.png".to_owned()),
    }
}

/// HTTP state over in-memory stores pre-filled with `items`.
pub fn state(items: Vec<Item>, oauth: Option<ScriptedGoogle>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let item_store = Arc::new(InMemoryItemRepository::with_items(items));
    let users = Arc::new(InMemoryUserRepository::default());
    let hasher = Arc::new(Argon2PasswordHasher::with_cost(8, 1, 1).expect("cheap argon2 params"));
    let tokens = Arc::new(
        JwtSessionTokens::new(&TOKEN_SECRET, TOKEN_TTL_SECONDS, Arc::clone(&clock))
            .expect("token adapter"),
    );
    let ports = HttpStatePorts {
        catalog: Arc::new(CatalogService::new(Arc::clone(&item_store))),
        items: Arc::new(ItemService::new(item_store, Arc::clone(&clock))),
        registration: Arc::new(RegistrationService::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
            Arc::clone(&clock),
        )),
        sign_in: Arc::new(SessionIssuer::new(
            users,
            hasher,
            Arc::clone(&tokens),
            clock,
        )),
        tokens,
    };
    let state = HttpState::new(ports).with_cookie_policy(CookiePolicy {
        secure: false,
        ..CookiePolicy::default()
    });
    match oauth {
        Some(provider) => state.with_oauth(Arc::new(provider)),
        None => state,
    }
}

/// Initialise the API under `/api/v1` with tracing and the handshake session.
pub async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let handshake = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(HANDSHAKE_COOKIE.to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(handshake).configure(configure_api)),
    )
    .await
}

/// Cookie called `name` set by `response`, if any.
pub fn cookie_named(response: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(Cookie::into_owned)
}
