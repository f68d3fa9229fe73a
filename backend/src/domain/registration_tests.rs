//! Tests for the registration service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::PasswordDigest;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::test_support::{fixture_clock, fixture_user};
use rstest::{fixture, rstest};

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> RegistrationService<MockUserRepository, MockPasswordHasher> {
    RegistrationService::new(Arc::new(users), Arc::new(hasher), fixture_clock())
}

fn hashing_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordDigest::new("$argon2id$fixture")));
    hasher
}

#[fixture]
fn request() -> RegistrationRequest {
    RegistrationRequest {
        nid: " 1990123456 ".to_owned(),
        name: " Ada Lovelace ".to_owned(),
        email: " Ada@Example.com ".to_owned(),
        contact: "+8801700000000".to_owned(),
        password: Zeroizing::new("Engine1".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_a_normalised_user(request: RegistrationRequest) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email_or_nid()
        .withf(|email, nid| email == "ada@example.com" && nid == "1990123456")
        .times(1)
        .return_once(|_, _| Ok(None));
    users
        .expect_insert()
        .withf(|user| user.has_password() && user.role.as_str() == "user")
        .times(1)
        .return_once(|_| Ok(()));

    let user = make_service(users, hashing_hasher())
        .register(request)
        .await
        .expect("registration succeeds");

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.nid.as_deref(), Some("1990123456"));
    assert_eq!(user.created_at, user.updated_at);
}

#[rstest]
#[case::nid(|r: &mut RegistrationRequest| r.nid = "  ".to_owned())]
#[case::name(|r: &mut RegistrationRequest| r.name = String::new())]
#[case::email(|r: &mut RegistrationRequest| r.email = String::new())]
#[case::contact(|r: &mut RegistrationRequest| r.contact = " ".to_owned())]
#[case::password(|r: &mut RegistrationRequest| r.password = Zeroizing::new(String::new()))]
#[tokio::test]
async fn blank_fields_are_rejected_before_lookup(
    mut request: RegistrationRequest,
    #[case] blank: fn(&mut RegistrationRequest),
) {
    blank(&mut request);
    let mut users = MockUserRepository::new();
    users.expect_find_by_email_or_nid().times(0);

    let err = make_service(users, MockPasswordHasher::new())
        .register(request)
        .await
        .expect_err("blank field");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), ALL_FIELDS_REQUIRED_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn malformed_email_is_rejected(mut request: RegistrationRequest) {
    request.email = "ada@example".to_owned();
    let err = make_service(MockUserRepository::new(), MockPasswordHasher::new())
        .register(request)
        .await
        .expect_err("bad email");
    assert_eq!(err.message(), INVALID_EMAIL_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn weak_password_lists_every_reason(mut request: RegistrationRequest) {
    request.password = Zeroizing::new("abc".to_owned());
    let err = make_service(MockUserRepository::new(), MockPasswordHasher::new())
        .register(request)
        .await
        .expect_err("weak password");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.message(),
        "Password must be at least 6 characters long. \
         Password must contain at least one uppercase letter."
    );
}

#[rstest]
#[tokio::test]
async fn existing_account_conflicts_without_insert(request: RegistrationRequest) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email_or_nid()
        .return_once(|_, _| Ok(Some(fixture_user("ada@example.com"))));
    users.expect_insert().times(0);

    let err = make_service(users, MockPasswordHasher::new())
        .register(request)
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), ACCOUNT_EXISTS_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn racing_insert_maps_unique_violation_to_conflict(request: RegistrationRequest) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email_or_nid()
        .return_once(|_, _| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::conflict("users_email_key")));

    let err = make_service(users, hashing_hasher())
        .register(request)
        .await
        .expect_err("conflict");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn store_failure_is_internal(request: RegistrationRequest) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email_or_nid()
        .return_once(|_, _| Err(UserPersistenceError::connection("refused")));

    let err = make_service(users, MockPasswordHasher::new())
        .register(request)
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn ensure_account_skips_existing_users() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(fixture_user("demo@example.com"))));
    users.expect_insert().times(0);

    let created = make_service(users, MockPasswordHasher::new())
        .ensure_account("demo@example.com", "Demo123", "Demo User")
        .await
        .expect("lookup succeeds");
    assert!(!created);
}

#[rstest]
#[tokio::test]
async fn ensure_account_creates_missing_users() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|user| user.email == "demo@example.com" && user.nid.is_none())
        .times(1)
        .return_once(|_| Ok(()));

    let created = make_service(users, hashing_hasher())
        .ensure_account(" Demo@Example.com", "demo", "Demo User")
        .await
        .expect("account created");
    assert!(created);
}
