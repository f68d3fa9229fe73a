//! Shared fixtures for unit tests inside the crate.
//!
//! Integration tests under `tests/` build their own state from the public
//! in-memory adapters instead.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    DEFAULT_CURRENCY, DEFAULT_STATUS, Item, ItemId, OAuthLink, PasswordDigest, Role, SessionUser,
    User, UserId, normalise_email,
};

/// Fixed instant returned by [`fixture_clock`].
pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .unwrap_or_default()
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

/// A credential account for `email` whose stored digest is opaque.
pub(crate) fn fixture_user(email: &str) -> User {
    let now = fixture_now();
    User {
        id: UserId::random(),
        nid: Some("NID-0001".to_owned()),
        name: "Ada Lovelace".to_owned(),
        email: normalise_email(email),
        contact: Some("+44 20 7946 0000".to_owned()),
        password_hash: Some(PasswordDigest::new("$argon2id$v=19$fixture")),
        role: Role::default(),
        oauth: None,
        image: None,
        created_at: now,
        updated_at: now,
    }
}

/// An account created through Google sign-in, with no password.
pub(crate) fn fixture_oauth_user(email: &str) -> User {
    User {
        nid: None,
        contact: None,
        password_hash: None,
        oauth: Some(OAuthLink {
            provider: "google".to_owned(),
            account_id: "1098".to_owned(),
        }),
        image: Some("https://example.com/avatar.png".to_owned()),
        ..fixture_user(email)
    }
}

pub(crate) fn fixture_session() -> SessionUser {
    SessionUser::from(&fixture_user("ada@example.com"))
}

pub(crate) fn fixture_item(name: &str, price: f64, category: &str) -> Item {
    Item {
        id: ItemId::random(),
        custom_id: None,
        name: name.to_owned(),
        description: format!("{name} for the fixture catalog"),
        price,
        currency: DEFAULT_CURRENCY.to_owned(),
        stock: 1,
        category: category.to_owned(),
        tags: Vec::new(),
        status: DEFAULT_STATUS.to_owned(),
        rating: None,
        created_at: Some(fixture_now()),
        updated_at: None,
        created_by: None,
    }
}
