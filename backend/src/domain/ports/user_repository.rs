//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email or national identifier is already taken.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Port for user account storage.
///
/// Emails are passed in normalised form (see
/// [`normalise_email`](crate::domain::normalise_email)).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user whose email or national identifier matches.
    async fn find_by_email_or_nid(
        &self,
        email: &str,
        nid: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user.
    ///
    /// Adapters report unique-index violations as
    /// [`UserPersistenceError::Conflict`].
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;
}
