//! Catalog items.
//!
//! Field rules (name and description length, non-negative price and stock)
//! are enforced when an item is submitted, not when one is read back. Stored
//! records are converted into [`Item`] at the adapter boundary with the
//! defaults below applied once.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Category shown for items stored without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
/// Currency assumed when none is supplied.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Status assigned to newly created items.
pub const DEFAULT_STATUS: &str = "active";
/// Maximum number of tags kept on an item.
pub const MAX_TAGS: usize = 10;
/// Largest stock count an item can hold; matches the `INTEGER` column.
pub const MAX_STOCK: u32 = i32::MAX.unsigned_abs();

/// Database-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How a client addressed an item.
///
/// Identifiers that parse as UUIDs address the database id; anything else
/// is treated as a custom identifier such as `itm-001`.
///
/// # Examples
/// ```
/// use catalog::domain::ItemLookup;
///
/// assert!(matches!(ItemLookup::parse("itm-001"), Some(ItemLookup::Custom(_))));
/// assert!(matches!(
///     ItemLookup::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6"),
///     Some(ItemLookup::Id(_))
/// ));
/// assert!(ItemLookup::parse("  ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLookup {
    /// Database identifier.
    Id(ItemId),
    /// Custom string identifier.
    Custom(String),
}

impl ItemLookup {
    /// Interpret a raw path segment; blank input addresses nothing.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<ItemId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Custom(trimmed.to_owned()),
        })
    }
}

/// Snapshot of the account that created an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBy {
    /// Creator's account identifier.
    pub user_id: UserId,
    /// Creator's email at creation time.
    pub email: String,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Database identifier.
    pub id: ItemId,
    /// Optional custom identifier carried over from imported data.
    pub custom_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price; zero when the stored record had none.
    pub price: f64,
    /// ISO currency code.
    pub currency: String,
    /// Units in stock.
    pub stock: u32,
    /// Free-text category.
    pub category: String,
    /// Labels, at most [`MAX_TAGS`].
    pub tags: Vec<String>,
    /// Lifecycle status.
    pub status: String,
    /// Optional average rating.
    pub rating: Option<f64>,
    /// Creation time; imported records may lack one.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Creator snapshot; imported records may lack one.
    pub created_by: Option<CreatedBy>,
}

/// Fall back to `default` when `value` is missing or blank.
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}
