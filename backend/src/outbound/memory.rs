//! In-process repositories for tests and database-less runs.
//!
//! Both adapters enforce the same uniqueness rules as the PostgreSQL schema,
//! so services observe identical conflict behaviour.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    ItemPersistenceError, ItemRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Item, ItemLookup, User};

/// Item store held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemRepository {
    /// Create a store pre-populated with `items`.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>, ItemPersistenceError> {
        Ok(self.items.read().await.clone())
    }

    async fn find(&self, lookup: &ItemLookup) -> Result<Option<Item>, ItemPersistenceError> {
        let items = self.items.read().await;
        let found = items.iter().find(|item| match lookup {
            ItemLookup::Id(id) => item.id == *id,
            ItemLookup::Custom(custom) => item.custom_id.as_deref() == Some(custom.as_str()),
        });
        Ok(found.cloned())
    }

    async fn insert(&self, item: &Item) -> Result<(), ItemPersistenceError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(ItemPersistenceError::conflict("items_pkey"));
        }
        if item.custom_id.is_some()
            && items
                .iter()
                .any(|existing| existing.custom_id == item.custom_id)
        {
            return Err(ItemPersistenceError::conflict("items_custom_id_key"));
        }
        items.push(item.clone());
        Ok(())
    }

    async fn count(&self) -> Result<usize, ItemPersistenceError> {
        Ok(self.items.read().await.len())
    }
}

/// User store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_email_or_nid(
        &self,
        email: &str,
        nid: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.email == email || user.nid.as_deref() == Some(nid))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::conflict("users_email_key"));
        }
        if user.nid.is_some() && users.iter().any(|existing| existing.nid == user.nid) {
            return Err(UserPersistenceError::conflict("users_nid_key"));
        }
        users.push(user.clone());
        Ok(())
    }
}
