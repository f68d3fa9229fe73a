//! Shared Diesel error mapping for the catalog repositories.
//!
//! Repositories pass their port error constructors in, so one classifier
//! serves both the item and user adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors for a repository's port error type.
pub(crate) struct ErrorConstructors<E> {
    pub connection: fn(String) -> E,
    pub query: fn(String) -> E,
    pub conflict: fn(String) -> E,
}

/// Map pool errors into the repository's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, ctors: &ErrorConstructors<E>) -> E {
    (ctors.connection)(error.into_message())
}

/// Map Diesel errors into connection, conflict or query errors.
///
/// Unique violations carry the constraint name so callers can log which
/// index collided.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    operation: &str,
    ctors: &ErrorConstructors<E>,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("unique index").to_owned();
            (ctors.conflict)(constraint)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (ctors.connection)("database connection error".to_owned())
        }
        DieselError::NotFound => (ctors.query)("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => (ctors.query)("database query error".to_owned()),
        _ => (ctors.query)(format!("{operation} failed")),
    }
}

#[cfg(test)]
mod tests {
    //! Classification coverage for Diesel failures.
    use super::*;
    use crate::domain::ports::ItemPersistenceError;
    use rstest::rstest;

    const ITEM_ERRORS: ErrorConstructors<ItemPersistenceError> = ErrorConstructors {
        connection: |message| ItemPersistenceError::connection(message),
        query: |message| ItemPersistenceError::query(message),
        conflict: |message| ItemPersistenceError::conflict(message),
    };

    struct Info(&'static str, Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.1
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom", constraint)))
    }

    #[rstest]
    fn unique_violation_becomes_conflict() {
        let err = map_diesel_error(
            db_error(
                DatabaseErrorKind::UniqueViolation,
                Some("items_custom_id_key"),
            ),
            "insert item",
            &ITEM_ERRORS,
        );
        assert_eq!(err, ItemPersistenceError::conflict("items_custom_id_key"));
    }

    #[rstest]
    fn closed_connection_becomes_connection_error() {
        let err = map_diesel_error(
            db_error(DatabaseErrorKind::ClosedConnection, None),
            "list items",
            &ITEM_ERRORS,
        );
        assert!(matches!(err, ItemPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn other_failures_become_query_errors() {
        let err = map_diesel_error(DieselError::NotFound, "find item", &ITEM_ERRORS);
        assert_eq!(err, ItemPersistenceError::query("record not found"));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"), &ITEM_ERRORS);
        assert_eq!(err, ItemPersistenceError::connection("timed out"));
    }
}
