//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

use super::error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const USER_ERRORS: ErrorConstructors<UserPersistenceError> = ErrorConstructors {
    connection: |message| UserPersistenceError::connection(message),
    query: |message| UserPersistenceError::query(message),
    conflict: |message| UserPersistenceError::conflict(message),
};

/// Diesel-backed implementation of [`UserRepository`].
///
/// Uniqueness of `email` and `nid` is enforced by database constraints;
/// violations surface as [`UserPersistenceError::Conflict`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &USER_ERRORS))?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email", &USER_ERRORS))?;
        Ok(row.map(User::from))
    }

    async fn find_by_email_or_nid(
        &self,
        email: &str,
        nid: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &USER_ERRORS))?;
        let row = users::table
            .filter(users::email.eq(email).or(users::nid.eq(nid)))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email or nid", &USER_ERRORS))?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &USER_ERRORS))?;
        diesel::insert_into(users::table)
            .values(&NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert user", &USER_ERRORS))?;
        Ok(())
    }
}
