//! PostgreSQL-backed item repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemLookup};

use super::error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{ItemRow, NewItemRow};
use super::pool::DbPool;
use super::schema::items;

const ITEM_ERRORS: ErrorConstructors<ItemPersistenceError> = ErrorConstructors {
    connection: |message| ItemPersistenceError::connection(message),
    query: |message| ItemPersistenceError::query(message),
    conflict: |message| ItemPersistenceError::conflict(message),
};

/// Diesel-backed implementation of [`ItemRepository`].
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert rows, skipping any that cannot be represented in the domain.
fn rows_to_items(rows: Vec<ItemRow>) -> Vec<Item> {
    rows.into_iter()
        .filter_map(|row| match Item::try_from(row) {
            Ok(item) => Some(item),
            Err(reason) => {
                warn!(%reason, "skipping unreadable item row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &ITEM_ERRORS))?;
        let rows: Vec<ItemRow> = items::table
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list items", &ITEM_ERRORS))?;
        Ok(rows_to_items(rows))
    }

    async fn find(&self, lookup: &ItemLookup) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &ITEM_ERRORS))?;
        let query = items::table.select(ItemRow::as_select()).into_boxed();
        let query = match lookup {
            ItemLookup::Id(id) => query.filter(items::id.eq(*id.as_uuid())),
            ItemLookup::Custom(custom) => query.filter(items::custom_id.eq(custom.as_str())),
        };
        let row = query
            .first::<ItemRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find item", &ITEM_ERRORS))?;
        row.map(Item::try_from)
            .transpose()
            .map_err(ItemPersistenceError::query)
    }

    async fn insert(&self, item: &Item) -> Result<(), ItemPersistenceError> {
        let row = NewItemRow::try_from(item).map_err(ItemPersistenceError::query)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &ITEM_ERRORS))?;
        diesel::insert_into(items::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert item", &ITEM_ERRORS))?;
        Ok(())
    }

    async fn count(&self) -> Result<usize, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &ITEM_ERRORS))?;
        let total: i64 = items::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count items", &ITEM_ERRORS))?;
        usize::try_from(total).map_err(|err| ItemPersistenceError::query(err.to_string()))
    }
}
