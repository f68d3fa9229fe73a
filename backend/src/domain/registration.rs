//! Credential account registration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, RegistrationCommand, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, Role, User, UserId, is_plausible_email, normalise_email, validate_password,
};

/// Message returned when any registration field is blank.
pub const ALL_FIELDS_REQUIRED_MESSAGE: &str = "All fields are required.";
/// Message returned when the email is not shaped like an address.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";
/// Message returned when the email or national id is taken.
pub const ACCOUNT_EXISTS_MESSAGE: &str = "An account with this email or NID already exists.";

/// Raw registration fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// National identifier.
    pub nid: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Contact number.
    pub contact: String,
    /// Plain-text password; wiped on drop.
    pub password: Zeroizing<String>,
}

/// Registration fields after trimming and presence checks.
struct RegistrationFields {
    nid: String,
    name: String,
    email: String,
    contact: String,
}

impl RegistrationRequest {
    fn required_fields(&self) -> Result<RegistrationFields, Error> {
        let nid = self.nid.trim();
        let name = self.name.trim();
        let email = normalise_email(&self.email);
        let contact = self.contact.trim();
        if [nid, name, email.as_str(), contact].iter().any(|v| v.is_empty())
            || self.password.is_empty()
        {
            return Err(Error::invalid_request(ALL_FIELDS_REQUIRED_MESSAGE)
                .with_details(json!({ "code": "missing_field" })));
        }
        Ok(RegistrationFields {
            nid: nid.to_owned(),
            name: name.to_owned(),
            email,
            contact: contact.to_owned(),
        })
    }
}

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> RegistrationService<U, H> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Conflict { .. } => Error::conflict(ACCOUNT_EXISTS_MESSAGE),
        other => {
            error!(error = %other, "user repository failure during registration");
            Error::internal(format!("user repository error: {other}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    error!(error = %error, "password hashing failed during registration");
    Error::internal(format!("password hashing failed: {error}"))
}

impl<U, H> RegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Make sure a credential account exists for `email`.
    ///
    /// Used to provision the demo login. The password policy is not applied
    /// because the credentials come from operator configuration. Returns
    /// `true` when an account was created.
    pub async fn ensure_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<bool, Error> {
        let email = normalise_email(email);
        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Ok(false);
        }
        let digest = self.hasher.hash(password).await.map_err(map_hash_error)?;
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            nid: None,
            name: name.to_owned(),
            email,
            contact: None,
            password_hash: Some(digest),
            role: Role::default(),
            oauth: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        match self.users.insert(&user).await {
            Ok(()) => Ok(true),
            // Another instance provisioned it first.
            Err(UserPersistenceError::Conflict { .. }) => Ok(false),
            Err(other) => Err(map_user_error(other)),
        }
    }
}

#[async_trait]
impl<U, H> RegistrationCommand for RegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error> {
        let fields = request.required_fields()?;

        if !is_plausible_email(&fields.email) {
            return Err(Error::invalid_request(INVALID_EMAIL_MESSAGE)
                .with_details(json!({ "field": "email", "code": "invalid_email" })));
        }

        validate_password(&request.password).map_err(|violation| {
            Error::invalid_request(violation.to_string())
                .with_details(json!({ "field": "password", "code": "weak_password" }))
        })?;

        let existing = self
            .users
            .find_by_email_or_nid(&fields.email, &fields.nid)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(ACCOUNT_EXISTS_MESSAGE));
        }

        let digest = self
            .hasher
            .hash(&request.password)
            .await
            .map_err(map_hash_error)?;
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            nid: Some(fields.nid),
            name: fields.name,
            email: fields.email,
            contact: Some(fields.contact),
            password_hash: Some(digest),
            role: Role::default(),
            oauth: None,
            image: None,
            created_at: now,
            updated_at: now,
        };

        // The unique indexes close the gap between the lookup and the insert.
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, "registered credential account");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
