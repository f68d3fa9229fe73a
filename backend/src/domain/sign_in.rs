//! Sign-in flows and session issuance.
//!
//! Each attempt moves `Unauthenticated → Authorizing → {Authenticated |
//! Rejected}`. Errors never escape: they are logged here and collapse into
//! [`SignInOutcome::Rejected`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::credentials::verify_credentials;
use crate::domain::ports::{
    OAuthIdentity, PasswordHasher, SessionTokens, SignInService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    IssuedSession, LoginCredentials, OAuthLink, Role, SessionUser, SignInOutcome, User, UserId,
    normalise_email,
};

/// Sign-in service implementing [`SignInService`].
#[derive(Clone)]
pub struct SessionIssuer<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> SessionIssuer<U, H, T> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> SessionIssuer<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokens,
{
    fn issue(&self, user: SessionUser) -> SignInOutcome {
        match self.tokens.issue(&user) {
            Ok(token) => SignInOutcome::Authenticated(IssuedSession { user, token }),
            Err(err) => {
                error!(error = %err, user_id = %user.id, "failed to sign session token");
                SignInOutcome::Rejected
            }
        }
    }

    fn new_oauth_user(&self, identity: &OAuthIdentity, email: String) -> User {
        let now = self.clock.utc();
        let name = match identity.name.trim() {
            "" => email.clone(),
            name => name.to_owned(),
        };
        User {
            id: UserId::random(),
            nid: None,
            name,
            email,
            contact: None,
            password_hash: None,
            role: Role::default(),
            oauth: Some(OAuthLink {
                provider: identity.provider.clone(),
                account_id: identity.account_id.clone(),
            }),
            image: identity.image.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find the account for `email`, creating it on first sign-in.
    async fn find_or_create(
        &self,
        identity: &OAuthIdentity,
        email: String,
    ) -> Result<User, UserPersistenceError> {
        if let Some(existing) = self.users.find_by_email(&email).await? {
            return Ok(existing);
        }

        let candidate = self.new_oauth_user(identity, email);
        match self.users.insert(&candidate).await {
            Ok(()) => {
                info!(user_id = %candidate.id, provider = %identity.provider, "created oauth account");
                Ok(candidate)
            }
            // A concurrent sign-in created the row between our lookup and insert.
            Err(UserPersistenceError::Conflict { .. }) => self
                .users
                .find_by_email(&candidate.email)
                .await?
                .ok_or_else(|| {
                    UserPersistenceError::query("account vanished after unique conflict")
                }),
            Err(other) => Err(other),
        }
    }
}

#[async_trait]
impl<U, H, T> SignInService for SessionIssuer<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokens,
{
    async fn sign_in_with_credentials(&self, credentials: &LoginCredentials) -> SignInOutcome {
        match verify_credentials(self.users.as_ref(), self.hasher.as_ref(), credentials).await {
            Ok(user) => self.issue(user),
            Err(err) => {
                warn!(error = %err, "credential sign-in rejected");
                SignInOutcome::Rejected
            }
        }
    }

    async fn sign_in_with_oauth(&self, identity: &OAuthIdentity) -> SignInOutcome {
        let email = normalise_email(&identity.email);
        if email.is_empty() {
            warn!(provider = %identity.provider, "oauth identity without email rejected");
            return SignInOutcome::Rejected;
        }

        let stored = match self.find_or_create(identity, email).await {
            Ok(user) => user,
            Err(err) => {
                error!(error = %err, provider = %identity.provider, "oauth sign-in failed");
                return SignInOutcome::Rejected;
            }
        };

        // Identity and role come from the stored account; the display name
        // follows the provider profile when it has one.
        let mut session = SessionUser::from(&stored);
        if !identity.name.trim().is_empty() {
            session.name = identity.name.trim().to_owned();
        }
        self.issue(session)
    }
}

#[cfg(test)]
#[path = "sign_in_tests.rs"]
mod tests;
