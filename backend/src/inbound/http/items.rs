//! Items API handlers.
//!
//! ```text
//! GET  /api/v1/items?q=&category=&sort=&page=
//! GET  /api/v1/items/featured
//! GET  /api/v1/items/categories
//! GET  /api/v1/items/{id}
//! POST /api/v1/items
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde_json::{error::Category, json};

use crate::domain::{
    Error, ItemLookup, ItemQuery, ItemSubmission, LOGIN_REQUIRED_MESSAGE, SortMode,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::items_dto::{
    CategoryCountDto, CreatedItemDto, ItemDto, ItemListParams, ItemListingDto,
    ItemSubmissionRequest,
};
use crate::inbound::http::schemas::{ErrorSchema, ItemSubmissionSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page, trimmed};

/// Message returned when no item matches the requested identifier.
pub const ITEM_NOT_FOUND_MESSAGE: &str = "Item not found.";

fn malformed_body(err: &serde_json::Error) -> Error {
    let message = match err.classify() {
        Category::Data => "Request body does not match the item shape.",
        Category::Io | Category::Syntax | Category::Eof => "Request body must be valid JSON.",
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
}

fn query_from_params(params: &ItemListParams) -> ItemQuery {
    ItemQuery::new(
        trimmed(params.q.as_deref()),
        trimmed(params.category.as_deref()),
        SortMode::parse(trimmed(params.sort.as_deref())),
        parse_page(params.page.as_deref()),
    )
}

/// Filter, sort and paginate the catalog.
#[utoipa::path(
    get,
    path = "/api/v1/items",
    params(ItemListParams),
    responses(
        (status = 200, description = "One page of items", body = ItemListingDto),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems",
    security([])
)]
#[get("/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    params: web::Query<ItemListParams>,
) -> ApiResult<web::Json<ItemListingDto>> {
    let listing = state.catalog.list_items(&query_from_params(&params)).await?;
    Ok(web::Json(ItemListingDto::from(listing)))
}

/// The three newest items.
#[utoipa::path(
    get,
    path = "/api/v1/items/featured",
    responses(
        (status = 200, description = "Featured items", body = [ItemDto]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "featuredItems",
    security([])
)]
#[get("/items/featured")]
pub async fn featured_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ItemDto>>> {
    let items = state.catalog.featured_items().await?;
    Ok(web::Json(items.into_iter().map(ItemDto::from).collect()))
}

/// Largest categories by item count.
#[utoipa::path(
    get,
    path = "/api/v1/items/categories",
    responses(
        (status = 200, description = "Category summary", body = [CategoryCountDto]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "itemCategories",
    security([])
)]
#[get("/items/categories")]
pub async fn item_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryCountDto>>> {
    let summary = state.catalog.category_summary().await?;
    Ok(web::Json(
        summary.into_iter().map(CategoryCountDto::from).collect(),
    ))
}

/// Fetch one item by UUID or custom identifier.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = String, Path, description = "Item UUID or custom identifier")),
    responses(
        (status = 200, description = "Item", body = ItemDto),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem",
    security([])
)]
#[get("/items/{id}")]
pub async fn item_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ItemDto>> {
    let raw = path.into_inner();
    let not_found = || {
        Error::not_found(ITEM_NOT_FOUND_MESSAGE).with_details(json!({ "id": raw.trim() }))
    };
    let lookup = ItemLookup::parse(&raw).ok_or_else(not_found)?;
    let item = state
        .catalog
        .item_detail(&lookup)
        .await?
        .ok_or_else(not_found)?;
    Ok(web::Json(ItemDto::from(item)))
}

/// Create an item on behalf of the signed-in user.
///
/// The session is checked before the body is parsed, so anonymous callers
/// always see `401` whatever they send.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = ItemSubmissionSchema,
    responses(
        (status = 201, description = "Item created", body = CreatedItemDto),
        (status = 400, description = "Invalid item", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "createItem",
    security(("SessionCookie" = []))
)]
#[post("/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user = session.require_user(LOGIN_REQUIRED_MESSAGE)?;
    let request: ItemSubmissionRequest =
        serde_json::from_slice(&body).map_err(|err| malformed_body(&err))?;
    let id = state
        .items
        .create_item(Some(user), ItemSubmission::from(request))
        .await?;
    Ok(HttpResponse::Created().json(CreatedItemDto::from(id)))
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
