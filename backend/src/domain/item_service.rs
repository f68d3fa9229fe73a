//! Write-side catalog service: session-gated item creation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{ItemCommand, ItemRepository};
use crate::domain::{CreatedBy, Error, ItemId, ItemSubmission, SessionUser};

/// Message returned when an item is submitted without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be signed in to add items.";
/// Message returned when storing an item fails.
pub const ITEM_SAVE_FAILED_MESSAGE: &str = "Failed to save item.";

/// Item mutation service implementing [`ItemCommand`].
#[derive(Clone)]
pub struct ItemService<R> {
    items: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ItemService<R> {
    /// Create a new service over `items`.
    pub fn new(items: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { items, clock }
    }
}

#[async_trait]
impl<R: ItemRepository> ItemCommand for ItemService<R> {
    async fn create_item(
        &self,
        session: Option<&SessionUser>,
        submission: ItemSubmission,
    ) -> Result<ItemId, Error> {
        let Some(user) = session else {
            return Err(Error::unauthorized(LOGIN_REQUIRED_MESSAGE));
        };

        let draft = submission.validate()?;
        let created_by = CreatedBy {
            user_id: user.id,
            email: user.email.clone(),
        };
        let item = draft.into_item(ItemId::random(), created_by, self.clock.utc());

        if let Err(err) = self.items.insert(&item).await {
            error!(error = %err, user_id = %user.id, "failed to persist item");
            return Err(Error::internal(ITEM_SAVE_FAILED_MESSAGE));
        }
        info!(item_id = %item.id, user_id = %user.id, "item created");
        Ok(item.id)
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
