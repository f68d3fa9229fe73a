//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod items;
pub mod items_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

pub use error::ApiResult;

/// Map JSON extractor failures onto the `invalid_request` envelope.
fn json_error(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("Request body must be valid JSON.")
        .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
        .into()
}

/// Register every `/api/v1` endpoint on `cfg`.
///
/// Callers mount this inside `web::scope("/api/v1")` and provide
/// `web::Data<HttpState>`. The OAuth endpoints additionally need an
/// `actix-session` middleware around the scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use catalog::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        // Fixed segments must precede `/items/{id}`.
        .service(items::featured_items)
        .service(items::item_categories)
        .service(items::item_detail)
        .service(items::list_items)
        .service(items::create_item)
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(auth::oauth_start)
        .service(auth::oauth_callback);
}
