//! Startup provisioning of catalog items and the demo account.
//!
//! Both steps run once from `main` before the server binds; neither runs
//! per request.

mod documents;
mod startup;

pub use documents::{CreatorDocument, ItemDocument, TagsDocument};
pub use startup::{DEMO_USER_NAME, StartupSeedingError, ensure_demo_user, seed_items_on_startup};
