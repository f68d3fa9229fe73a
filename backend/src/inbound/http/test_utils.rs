//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use super::state::{HttpState, HttpStatePorts};
use crate::domain::ports::{MockPasswordHasher, MockSignInService, SessionTokens};
use crate::domain::{CatalogService, Item, ItemService, PasswordDigest, RegistrationService};
use crate::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use crate::test_support::fixture_clock;

/// Session middleware for the OAuth handshake cookie.
///
/// Uses a fresh key per call, names the cookie `session` and drops the
/// `Secure` flag so plain-HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Hasher double that accepts exactly `Secret1`.
pub fn permissive_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordDigest::new("$argon2id$test")));
    hasher
        .expect_verify()
        .returning(|password, _| Ok(password == "Secret1"));
    hasher
}

/// Ports bundle backed by in-memory stores seeded with `items`.
pub fn ports_with(
    items: Vec<Item>,
    sign_in: MockSignInService,
    tokens: Arc<dyn SessionTokens>,
) -> HttpStatePorts {
    let item_store = Arc::new(InMemoryItemRepository::with_items(items));
    let users = Arc::new(InMemoryUserRepository::default());
    HttpStatePorts {
        catalog: Arc::new(CatalogService::new(Arc::clone(&item_store))),
        items: Arc::new(ItemService::new(item_store, fixture_clock())),
        registration: Arc::new(RegistrationService::new(
            users,
            Arc::new(permissive_hasher()),
            fixture_clock(),
        )),
        sign_in: Arc::new(sign_in),
        tokens,
    }
}

/// State with empty stores, an inert sign-in double and the given tokens.
pub fn state_with_tokens(tokens: Arc<dyn SessionTokens>) -> HttpState {
    HttpState::new(ports_with(Vec::new(), MockSignInService::new(), tokens))
}
