//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered and OAuth-created accounts.
    users (id) {
        id -> Uuid,
        /// National identifier; unique when present.
        nid -> Nullable<Text>,
        name -> Text,
        /// Lower-cased email; unique.
        email -> Text,
        contact -> Nullable<Text>,
        /// PHC-format password hash; null for OAuth-only accounts.
        password_hash -> Nullable<Text>,
        role -> Text,
        oauth_provider -> Nullable<Text>,
        oauth_account_id -> Nullable<Text>,
        image -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalog items.
    ///
    /// Imported rows may lack timestamps and a creator snapshot.
    items (id) {
        id -> Uuid,
        custom_id -> Nullable<Text>,
        name -> Text,
        description -> Text,
        price -> Float8,
        currency -> Text,
        stock -> Int4,
        category -> Text,
        tags -> Array<Text>,
        status -> Text,
        rating -> Nullable<Float8>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
        created_by_id -> Nullable<Uuid>,
        created_by_email -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(items, users);
