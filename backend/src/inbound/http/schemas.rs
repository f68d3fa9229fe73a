//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa derives. The wrappers here mirror their
//! serialised shape and register under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// An optional integration is not configured.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Price must be a non-negative number.")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "price", "code": "invalid_price"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ItemSubmission`].
///
/// `price` and `stock` accept JSON numbers or numeric strings.
#[derive(ToSchema)]
#[schema(as = crate::domain::ItemSubmission, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ItemSubmissionSchema {
    /// At least two characters once trimmed.
    #[schema(example = "Oak serving board")]
    name: String,
    /// At least ten characters once trimmed.
    #[schema(example = "Hand-finished oak board with brass handles.")]
    description: String,
    /// Non-negative unit price.
    #[schema(value_type = Option<f64>, example = 39.5)]
    price: Option<String>,
    /// Non-negative whole number; blank means zero.
    #[schema(value_type = Option<u32>, example = 12)]
    stock: Option<String>,
    /// ISO currency code; defaults to USD.
    #[schema(example = "EUR")]
    currency: Option<String>,
    /// Category; defaults to Uncategorized.
    #[schema(example = "Kitchen")]
    category: Option<String>,
    /// Comma-separated tags, at most ten kept.
    #[schema(example = "wood, serving")]
    tags: Option<String>,
}
