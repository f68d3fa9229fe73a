//! Port abstraction for item persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Item, ItemLookup};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item repository adapters.
    pub enum ItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => "item repository query failed: {message}",
        /// A unique identifier collided with an existing item.
        Conflict { message: String } => "item repository conflict: {message}",
    }
}

/// Port for reading and writing catalog items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every stored item, in storage order.
    async fn list_all(&self) -> Result<Vec<Item>, ItemPersistenceError>;

    /// Fetch one item by database or custom identifier.
    async fn find(&self, lookup: &ItemLookup) -> Result<Option<Item>, ItemPersistenceError>;

    /// Insert a new item.
    async fn insert(&self, item: &Item) -> Result<(), ItemPersistenceError>;

    /// Number of stored items.
    async fn count(&self) -> Result<usize, ItemPersistenceError>;
}
