//! Loosely typed item documents accepted by the seed import.
//!
//! Every field is optional. Missing or unusable values take the same
//! defaults the catalog applies when reading stored records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    CreatedBy, DEFAULT_CATEGORY, DEFAULT_CURRENCY, DEFAULT_STATUS, Item, ItemId, ItemLookup,
    MAX_STOCK, MAX_TAGS, NumericInput, UserId, parse_tags,
};

/// Tags given either as a list or as a comma-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagsDocument {
    /// A JSON array of tags.
    List(Vec<String>),
    /// A comma-separated string.
    Text(String),
}

/// Creator snapshot as it appears in a seed document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorDocument {
    /// Creator's account id; must be a UUID to be kept.
    pub user_id: Option<String>,
    /// Creator's email.
    pub email: Option<String>,
}

/// One item as found in a seed file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    /// Identifier; a UUID becomes the item id, anything else the custom id.
    #[serde(alias = "_id")]
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Price as a number or numeric text.
    pub price: Option<NumericInput>,
    /// Currency code.
    pub currency: Option<String>,
    /// Stock as a number or numeric text.
    pub stock: Option<NumericInput>,
    /// Category.
    pub category: Option<String>,
    /// Tags.
    pub tags: Option<TagsDocument>,
    /// Lifecycle status.
    pub status: Option<String>,
    /// Average rating.
    pub rating: Option<NumericInput>,
    /// RFC 3339 creation time.
    pub created_at: Option<String>,
    /// RFC 3339 modification time.
    pub updated_at: Option<String>,
    /// Creator snapshot.
    pub created_by: Option<CreatorDocument>,
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_stock(input: Option<&NumericInput>) -> u32 {
    match input.and_then(NumericInput::to_finite) {
        Some(value) if value >= 0.0 && value <= f64::from(MAX_STOCK) => value.trunc() as u32,
        _ => 0,
    }
}

fn parse_tag_list(tags: Option<TagsDocument>) -> Vec<String> {
    match tags {
        Some(TagsDocument::List(list)) => list
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .take(MAX_TAGS)
            .collect(),
        Some(TagsDocument::Text(text)) => parse_tags(&text),
        None => Vec::new(),
    }
}

fn parse_creator(creator: Option<CreatorDocument>) -> Option<CreatedBy> {
    let creator = creator?;
    let user_id: UserId = creator.user_id?.trim().parse().ok()?;
    Some(CreatedBy {
        user_id,
        email: creator.email.unwrap_or_default().trim().to_owned(),
    })
}

impl ItemDocument {
    /// Convert into a typed item, applying read defaults.
    pub fn into_item(self) -> Item {
        let (id, custom_id) = match self.id.as_deref().and_then(ItemLookup::parse) {
            Some(ItemLookup::Id(id)) => (id, None),
            Some(ItemLookup::Custom(custom)) => (ItemId::random(), Some(custom)),
            None => (ItemId::random(), None),
        };
        Item {
            id,
            custom_id,
            name: self.name.unwrap_or_default().trim().to_owned(),
            description: self.description.unwrap_or_default().trim().to_owned(),
            price: self
                .price
                .as_ref()
                .and_then(NumericInput::to_finite)
                .unwrap_or(0.0),
            currency: text_or(self.currency, DEFAULT_CURRENCY),
            stock: parse_stock(self.stock.as_ref()),
            category: text_or(self.category, DEFAULT_CATEGORY),
            tags: parse_tag_list(self.tags),
            status: text_or(self.status, DEFAULT_STATUS),
            rating: self.rating.as_ref().and_then(NumericInput::to_finite),
            created_at: parse_timestamp(self.created_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
            created_by: parse_creator(self.created_by),
        }
    }
}
