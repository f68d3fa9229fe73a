//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversions to and from domain types live here so repositories
//! stay thin.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    CreatedBy, Item, ItemId, OAuthLink, PasswordDigest, Role, User, UserId,
};

use super::schema::{items, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub nid: Option<String>,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub password_hash: Option<String>,
    pub role: String,
    pub oauth_provider: Option<String>,
    pub oauth_account_id: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let oauth = match (row.oauth_provider, row.oauth_account_id) {
            (Some(provider), Some(account_id)) => Some(OAuthLink {
                provider,
                account_id,
            }),
            _ => None,
        };
        Self {
            id: UserId::from_uuid(row.id),
            nid: row.nid,
            name: row.name,
            email: row.email,
            contact: row.contact,
            password_hash: row.password_hash.map(PasswordDigest::new),
            role: Role::new(row.role),
            oauth,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub nid: Option<&'a str>,
    pub name: &'a str,
    pub email: &'a str,
    pub contact: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub role: &'a str,
    pub oauth_provider: Option<&'a str>,
    pub oauth_account_id: Option<&'a str>,
    pub image: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            nid: user.nid.as_deref(),
            name: &user.name,
            email: &user.email,
            contact: user.contact.as_deref(),
            password_hash: user.password_hash.as_ref().map(PasswordDigest::as_str),
            role: user.role.as_str(),
            oauth_provider: user.oauth.as_ref().map(|link| link.provider.as_str()),
            oauth_account_id: user.oauth.as_ref().map(|link| link.account_id.as_str()),
            image: user.image.as_deref(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Row struct for reading from the items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub custom_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub stock: i32,
    pub category: String,
    pub tags: Vec<String>,
    pub status: String,
    pub rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by_id: Option<Uuid>,
    pub created_by_email: Option<String>,
}

impl TryFrom<ItemRow> for Item {
    type Error = String;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let stock = u32::try_from(row.stock)
            .map_err(|_| format!("item {}: negative stock {}", row.id, row.stock))?;
        let created_by = match (row.created_by_id, row.created_by_email) {
            (Some(user_id), Some(email)) => Some(CreatedBy {
                user_id: UserId::from_uuid(user_id),
                email,
            }),
            _ => None,
        };
        Ok(Self {
            id: ItemId::from_uuid(row.id),
            custom_id: row.custom_id,
            name: row.name,
            description: row.description,
            price: row.price,
            currency: row.currency,
            stock,
            category: row.category,
            tags: row.tags,
            status: row.status,
            rating: row.rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by,
        })
    }
}

/// Insertable struct for creating item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub id: Uuid,
    pub custom_id: Option<&'a str>,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub currency: &'a str,
    pub stock: i32,
    pub category: &'a str,
    pub tags: &'a [String],
    pub status: &'a str,
    pub rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by_id: Option<Uuid>,
    pub created_by_email: Option<&'a str>,
}

impl<'a> TryFrom<&'a Item> for NewItemRow<'a> {
    type Error = String;

    fn try_from(item: &'a Item) -> Result<Self, Self::Error> {
        let stock = i32::try_from(item.stock)
            .map_err(|_| format!("item {}: stock {} out of range", item.id, item.stock))?;
        Ok(Self {
            id: *item.id.as_uuid(),
            custom_id: item.custom_id.as_deref(),
            name: &item.name,
            description: &item.description,
            price: item.price,
            currency: &item.currency,
            stock,
            category: &item.category,
            tags: &item.tags,
            status: &item.status,
            rating: item.rating,
            created_at: item.created_at,
            updated_at: item.updated_at,
            created_by_id: item.created_by.as_ref().map(|c| *c.user_id.as_uuid()),
            created_by_email: item.created_by.as_ref().map(|c| c.email.as_str()),
        })
    }
}
