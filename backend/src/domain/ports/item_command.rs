//! Driving port for item mutations.
use async_trait::async_trait;

use crate::domain::{Error, ItemId, ItemSubmission, SessionUser};

/// Write-side catalog operations.
#[async_trait]
pub trait ItemCommand: Send + Sync {
    /// Validate and store a new item on behalf of `session`.
    ///
    /// A missing session fails with `unauthorized` before any field is
    /// inspected.
    async fn create_item(
        &self,
        session: Option<&SessionUser>,
        submission: ItemSubmission,
    ) -> Result<ItemId, Error>;
}
