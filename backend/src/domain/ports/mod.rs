//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`ItemRepository`, `UserRepository`, `PasswordHasher`,
//! `SessionTokens`, `OAuthProvider`) describe what the domain needs from
//! infrastructure. Driving ports (`CatalogQuery`, `ItemCommand`,
//! `RegistrationCommand`, `SignInService`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_query;
mod item_command;
mod item_repository;
mod oauth_provider;
mod password_hasher;
mod registration_command;
mod session_tokens;
mod sign_in_service;
mod user_repository;

pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use item_command::ItemCommand;
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemPersistenceError, ItemRepository};
#[cfg(test)]
pub use oauth_provider::MockOAuthProvider;
pub use oauth_provider::{OAuthError, OAuthIdentity, OAuthProvider};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::RegistrationCommand;
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
#[cfg(test)]
pub use sign_in_service::MockSignInService;
pub use sign_in_service::SignInService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
