//! Driving port for account registration.
use async_trait::async_trait;

use crate::domain::{Error, RegistrationRequest, User};

/// Creates credential accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate `request` and store a new account.
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error>;
}
