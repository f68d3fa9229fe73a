//! JSON shapes for the items endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CategoryCount, CreatedBy, Item, ItemId, ItemListing, ItemSubmission, NumericInput,
};

/// Query string accepted by `GET /api/v1/items`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemListParams {
    /// Case-insensitive text matched against name and description.
    pub q: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
    /// `newest`, `name-asc`, `price-asc` or `price-desc`.
    pub sort: Option<String>,
    /// 1-based page; clamped to the last page.
    pub page: Option<String>,
}

/// Body of `POST /api/v1/items`.
///
/// `price` and `stock` stay raw until conversion, so booleans, arrays,
/// objects and literals beyond `f64` reach field validation instead of
/// failing the whole body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSubmissionRequest {
    /// Item name.
    #[serde(default)]
    pub name: String,
    /// Item description.
    #[serde(default)]
    pub description: String,
    /// Unit price as submitted.
    #[serde(default)]
    pub price: Option<Box<RawValue>>,
    /// Units in stock as submitted.
    #[serde(default)]
    pub stock: Option<Box<RawValue>>,
    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// Free-text category.
    #[serde(default)]
    pub category: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub tags: Option<String>,
}

fn numeric(raw: Option<Box<RawValue>>) -> Option<NumericInput> {
    raw.map(|raw| serde_json::from_str(raw.get()).unwrap_or(NumericInput::Unreadable))
}

impl From<ItemSubmissionRequest> for ItemSubmission {
    fn from(request: ItemSubmissionRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: numeric(request.price),
            stock: numeric(request.stock),
            currency: request.currency,
            category: request.category,
            tags: request.tags,
        }
    }
}

/// Creator snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedByDto {
    /// Creator's account id.
    #[schema(value_type = String, format = Uuid)]
    pub user_id: String,
    /// Creator's email at creation time.
    pub email: String,
}

impl From<CreatedBy> for CreatedByDto {
    fn from(value: CreatedBy) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            email: value.email,
        }
    }
}

/// A catalog item as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Lookup key: the custom id when present, otherwise the UUID.
    #[schema(example = "itm-001")]
    pub id: String,
    /// Database UUID.
    #[schema(value_type = String, format = Uuid)]
    pub uuid: String,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// ISO currency code.
    #[schema(example = "USD")]
    pub currency: String,
    /// Units in stock.
    pub stock: u32,
    /// Category, `Uncategorized` when none was given.
    pub category: String,
    /// Labels, at most ten.
    pub tags: Vec<String>,
    /// Lifecycle status.
    #[schema(example = "active")]
    pub status: String,
    /// Average rating, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Creation time; absent for imported records without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Account that created the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedByDto>,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item
                .custom_id
                .clone()
                .unwrap_or_else(|| item.id.to_string()),
            uuid: item.id.to_string(),
            name: item.name,
            description: item.description,
            price: item.price,
            currency: item.currency,
            stock: item.stock,
            category: item.category,
            tags: item.tags,
            status: item.status,
            rating: item.rating,
            created_at: item.created_at,
            updated_at: item.updated_at,
            created_by: item.created_by.map(CreatedByDto::from),
        }
    }
}

/// One page of the item listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemListingDto {
    /// Items on the effective page, at most nine.
    pub items: Vec<ItemDto>,
    /// Number of items matching the filters.
    pub total: usize,
    /// Effective page after clamping.
    pub page: usize,
    /// Number of pages; at least one.
    pub total_pages: usize,
    /// Page size.
    pub page_size: usize,
    /// Distinct non-empty categories across the whole catalog.
    pub categories: Vec<String>,
}

impl From<ItemListing> for ItemListingDto {
    fn from(listing: ItemListing) -> Self {
        let page = listing.page.map(ItemDto::from);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
            page_size: page.page_size,
            categories: listing.categories,
        }
    }
}

/// Item count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryCountDto {
    /// Category name.
    pub name: String,
    /// Items in the category.
    pub count: usize,
}

impl From<CategoryCount> for CategoryCountDto {
    fn from(value: CategoryCount) -> Self {
        Self {
            name: value.name,
            count: value.count,
        }
    }
}

/// Identifier of a newly created item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedItemDto {
    /// UUID of the new item.
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
}

impl From<ItemId> for CreatedItemDto {
    fn from(id: ItemId) -> Self {
        Self { id: id.to_string() }
    }
}
