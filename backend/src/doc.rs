//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler from the inbound layer, the DTOs they
//! return, the schema wrappers for domain types and the session cookie
//! security scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::auth::{LoginRequest, RegisterRequest, RegisteredUserDto, SessionDto};
use crate::inbound::http::items_dto::{
    CategoryCountDto, CreatedByDto, CreatedItemDto, ItemDto, ItemListingDto,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ItemSubmissionSchema};
use crate::inbound::http::session::SESSION_COOKIE;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Signed session token issued by POST /api/v1/auth/login or the Google callback.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Catalog API",
        description = "Item catalog with credential and Google sign-in."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::featured_items,
        crate::inbound::http::items::item_categories,
        crate::inbound::http::items::item_detail,
        crate::inbound::http::items::create_item,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::oauth_start,
        crate::inbound::http::auth::oauth_callback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ItemSubmissionSchema,
        ItemDto,
        ItemListingDto,
        CategoryCountDto,
        CreatedByDto,
        CreatedItemDto,
        RegisterRequest,
        RegisteredUserDto,
        LoginRequest,
        SessionDto
    )),
    tags(
        (name = "items", description = "Browse and create catalog items"),
        (name = "auth", description = "Registration, sign-in and sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const SUBMISSION_SCHEMA_NAME: &str = "crate.domain.ItemSubmission";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn submission_schema_lists_the_form_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let submission = schemas
            .get(SUBMISSION_SCHEMA_NAME)
            .expect("ItemSubmission schema");

        for field in ["name", "description", "price", "stock", "currency", "category", "tags"] {
            assert_object_schema_has_field(submission, field);
        }
    }

    #[rstest]
    #[case("/api/v1/items")]
    #[case("/api/v1/items/{id}")]
    #[case("/api/v1/items/featured")]
    #[case("/api/v1/auth/login")]
    #[case("/api/v1/auth/oauth/google/callback")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_names_the_cookie() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).expect("document serialises");
        assert!(json.contains("SessionCookie"));
        assert!(json.contains(SESSION_COOKIE));
    }
}
