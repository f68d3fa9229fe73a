//! Driving port for read-side catalog use-cases.
//!
//! Inbound adapters call this port to list and look up items without knowing
//! the backing store, so HTTP handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{CategoryCount, Error, Item, ItemListing, ItemLookup, ItemQuery};

/// Read-side catalog operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Filter, sort and paginate the catalog.
    async fn list_items(&self, query: &ItemQuery) -> Result<ItemListing, Error>;

    /// Fetch one item; `None` when nothing matches.
    async fn item_detail(&self, lookup: &ItemLookup) -> Result<Option<Item>, Error>;

    /// Newest items for the featured strip.
    async fn featured_items(&self) -> Result<Vec<Item>, Error>;

    /// Largest categories by item count.
    async fn category_summary(&self) -> Result<Vec<CategoryCount>, Error>;
}
