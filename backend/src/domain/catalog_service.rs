//! Read-side catalog service.
//!
//! Loads the full item snapshot from the repository and runs the pure
//! listing functions over it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{CatalogQuery, ItemPersistenceError, ItemRepository};
use crate::domain::{
    CategoryCount, Error, Item, ItemListing, ItemLookup, ItemQuery, featured_items,
    run_item_query, summarise_categories,
};

/// Catalog service implementing [`CatalogQuery`].
#[derive(Clone)]
pub struct CatalogService<R> {
    items: Arc<R>,
}

impl<R> CatalogService<R> {
    /// Create a new service over `items`.
    pub fn new(items: Arc<R>) -> Self {
        Self { items }
    }
}

fn map_item_error(error: ItemPersistenceError) -> Error {
    error!(error = %error, "item repository read failed");
    Error::internal(format!("item repository error: {error}"))
}

impl<R: ItemRepository> CatalogService<R> {
    async fn snapshot(&self) -> Result<Vec<Item>, Error> {
        self.items.list_all().await.map_err(map_item_error)
    }
}

#[async_trait]
impl<R: ItemRepository> CatalogQuery for CatalogService<R> {
    async fn list_items(&self, query: &ItemQuery) -> Result<ItemListing, Error> {
        Ok(run_item_query(self.snapshot().await?, query))
    }

    async fn item_detail(&self, lookup: &ItemLookup) -> Result<Option<Item>, Error> {
        self.items.find(lookup).await.map_err(map_item_error)
    }

    async fn featured_items(&self) -> Result<Vec<Item>, Error> {
        Ok(featured_items(self.snapshot().await?))
    }

    async fn category_summary(&self) -> Result<Vec<CategoryCount>, Error> {
        Ok(summarise_categories(&self.snapshot().await?))
    }
}
