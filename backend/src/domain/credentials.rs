//! Email and password verification.

use thiserror::Error;

use crate::domain::ports::{PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::{LoginCredentials, SessionUser};

/// Why a credential check failed.
///
/// Callers outside the sign-in service only ever see a generic rejection;
/// the variants exist for server-side logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Unknown email, OAuth-only account or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The user store could not be queried.
    #[error(transparent)]
    Lookup(#[from] UserPersistenceError),
    /// The stored hash could not be checked.
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
}

/// Look up `credentials.email()` and check the password against its hash.
///
/// Missing accounts, accounts without a password and wrong passwords all
/// fail with the same [`CredentialError::InvalidCredentials`].
pub async fn verify_credentials<U, H>(
    users: &U,
    hasher: &H,
    credentials: &LoginCredentials,
) -> Result<SessionUser, CredentialError>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let user = users
        .find_by_email(credentials.email())
        .await?
        .ok_or(CredentialError::InvalidCredentials)?;
    let digest = user
        .password_hash
        .as_ref()
        .ok_or(CredentialError::InvalidCredentials)?;

    if hasher.verify(credentials.password(), digest).await? {
        Ok(SessionUser::from(&user))
    } else {
        Err(CredentialError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::test_support::{fixture_oauth_user, fixture_user};
    use rstest::{fixture, rstest};

    #[fixture]
    fn credentials() -> LoginCredentials {
        LoginCredentials::try_from_parts("ada@example.com", "Engine1").expect("valid credentials")
    }

    fn users_returning(user: Option<crate::domain::User>) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().return_once(move |_| Ok(user));
        users
    }

    fn hasher_answering(matches: bool) -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(move |_, _| Ok(matches));
        hasher
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_yields_session_user(credentials: LoginCredentials) {
        let stored = fixture_user("ada@example.com");
        let users = users_returning(Some(stored.clone()));
        let session = verify_credentials(&users, &hasher_answering(true), &credentials)
            .await
            .expect("credentials accepted");
        assert_eq!(session.id, stored.id);
        assert_eq!(session.email, "ada@example.com");
        assert_eq!(session.role.as_str(), "user");
    }

    #[rstest]
    #[case::unknown_email(None, true)]
    #[case::wrong_password(Some(fixture_user("ada@example.com")), false)]
    #[case::oauth_only(Some(fixture_oauth_user("ada@example.com")), true)]
    #[tokio::test]
    async fn failures_are_indistinguishable(
        credentials: LoginCredentials,
        #[case] stored: Option<crate::domain::User>,
        #[case] hash_matches: bool,
    ) {
        let users = users_returning(stored);
        let err = verify_credentials(&users, &hasher_answering(hash_matches), &credentials)
            .await
            .expect_err("credentials rejected");
        assert_eq!(err, CredentialError::InvalidCredentials);
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn oauth_only_accounts_never_reach_the_hasher(credentials: LoginCredentials) {
        let users = users_returning(Some(fixture_oauth_user("ada@example.com")));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().times(0);
        let result = verify_credentials(&users, &hasher, &credentials).await;
        assert!(result.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_failures_are_kept_for_logging(credentials: LoginCredentials) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .return_once(|_| Err(UserPersistenceError::query("timeout")));
        let err = verify_credentials(&users, &MockPasswordHasher::new(), &credentials)
            .await
            .expect_err("lookup failed");
        assert!(matches!(err, CredentialError::Lookup(_)));
    }
}
