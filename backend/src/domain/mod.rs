//! Domain primitives, listing rules and services.
//!
//! Purpose: define the catalog and account types used by the HTTP and
//! persistence adapters, the pure listing pipeline, and the services that
//! implement the driving ports. Framework types stay out of this module.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Item, ItemSubmission, ItemQuery: catalog entities and inputs.
//! - User, SessionUser, LoginCredentials: account identity and sign-in.
//! - CatalogService, ItemService, RegistrationService, SessionIssuer:
//!   implementations of the driving ports in [`ports`].

pub mod auth;
pub mod catalog_service;
pub mod credentials;
pub mod error;
pub mod item;
pub mod item_query;
pub mod item_service;
pub mod item_submission;
pub mod ports;
pub mod registration;
pub mod session;
pub mod sign_in;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    INVALID_CREDENTIALS_MESSAGE, LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN,
    PasswordIssue, PasswordPolicyViolation, is_plausible_email, validate_password,
};
pub use self::catalog_service::CatalogService;
pub use self::credentials::{CredentialError, verify_credentials};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::item::{
    CreatedBy, DEFAULT_CATEGORY, DEFAULT_CURRENCY, DEFAULT_STATUS, Item, ItemId, ItemLookup,
    MAX_STOCK, MAX_TAGS,
};
pub use self::item_query::{
    CATEGORY_SUMMARY_LIMIT, CategoryCount, FEATURED_COUNT, ItemListing, ItemQuery, PAGE_SIZE,
    SortMode, featured_items, run_item_query, summarise_categories,
};
pub use self::item_service::{ITEM_SAVE_FAILED_MESSAGE, ItemService, LOGIN_REQUIRED_MESSAGE};
pub use self::item_submission::{
    ItemDraft, ItemSubmission, NumericInput, SubmissionIssue, parse_tags,
};
pub use self::registration::{
    ACCOUNT_EXISTS_MESSAGE, ALL_FIELDS_REQUIRED_MESSAGE, INVALID_EMAIL_MESSAGE,
    RegistrationRequest, RegistrationService,
};
pub use self::session::{IssuedSession, SessionToken, SessionUser, SignInOutcome};
pub use self::sign_in::SessionIssuer;
pub use self::trace_id::TraceId;
pub use self::user::{
    DEFAULT_ROLE, OAuthLink, PasswordDigest, Role, User, UserId, normalise_email,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use catalog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<u32> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
