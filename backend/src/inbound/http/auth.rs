//! Account and session API handlers.
//!
//! ```text
//! POST /api/v1/auth/register
//! POST /api/v1/auth/login {"email":"ada@example.com","password":"Secret1"}
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/session
//! GET  /api/v1/auth/oauth/google
//! GET  /api/v1/auth/oauth/google/callback?code=&state=
//! ```

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::OAuthProvider;
use crate::domain::{
    Error, INVALID_CREDENTIALS_MESSAGE, IssuedSession, LoginCredentials, RegistrationRequest,
    SessionUser, SignInOutcome, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{
    OAuthHandshake, SessionContext, clearing_cookie, session_cookie,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Message returned by `GET /auth/session` without a session.
pub const NOT_SIGNED_IN_MESSAGE: &str = "Not signed in.";
/// Message returned when OAuth endpoints are hit without a provider.
pub const OAUTH_UNAVAILABLE_MESSAGE: &str = "Google sign-in is not configured.";

/// Registration body for `POST /api/v1/auth/register`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// National identifier; must be unused.
    #[serde(default)]
    pub nid: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login email; must be unused.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub contact: String,
    /// Plain-text password, hashed before storage.
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(value: RegisterRequest) -> Self {
        Self {
            nid: value.nid,
            name: value.name,
            email: value.email,
            contact: value.contact,
            password: Zeroizing::new(value.password),
        }
    }
}

/// Account created by registration; never includes the password hash.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserDto {
    /// Account identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    /// National identifier, absent for OAuth-only accounts.
    pub nid: Option<String>,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Phone number, absent for OAuth-only accounts.
    pub contact: Option<String>,
    /// `user` or `admin`.
    #[schema(example = "user")]
    pub role: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for RegisteredUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            nid: user.nid,
            name: user.name,
            email: user.email,
            contact: user.contact,
            role: user.role.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Login body for `POST /api/v1/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

/// Session view rebuilt from the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    /// Signed-in account identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    /// `user` or `admin`.
    #[schema(example = "user")]
    pub role: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
}

impl From<&SessionUser> for SessionDto {
    fn from(user: &SessionUser) -> Self {
        Self {
            id: user.id.to_string(),
            role: user.role.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Query parameters Google appends to the callback.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OAuthCallbackParams {
    /// Authorisation code.
    pub code: Option<String>,
    /// Anti-forgery state echoed back by the provider.
    pub state: Option<String>,
    /// Set when the user declined or the provider failed.
    pub error: Option<String>,
}

fn rejected() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

fn oauth_provider(state: &HttpState) -> ApiResult<Arc<dyn OAuthProvider>> {
    state
        .oauth
        .clone()
        .ok_or_else(|| Error::service_unavailable(OAUTH_UNAVAILABLE_MESSAGE))
}

fn signed_in_response(state: &HttpState, issued: IssuedSession) -> HttpResponse {
    let cookie = session_cookie(issued.token, state.tokens.ttl_seconds(), state.cookies);
    HttpResponse::Ok()
        .cookie(cookie)
        .json(SessionDto::from(&issued.user))
}

/// Create a credential account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisteredUserDto),
        (status = 400, description = "Invalid registration", body = ErrorSchema),
        (status = 409, description = "Email or NID already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .registration
        .register(RegistrationRequest::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(RegisteredUserDto::from(user)))
}

/// Sign in with email and password and set the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionDto, headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Missing email or password", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let password = Zeroizing::new(password);
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)?;
    match state.sign_in.sign_in_with_credentials(&credentials).await {
        SignInOutcome::Authenticated(issued) => Ok(signed_in_response(&state, issued)),
        SignInOutcome::Rejected => Err(rejected()),
    }
}

/// Clear the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::NoContent()
        .cookie(clearing_cookie(state.cookies))
        .finish()
}

/// Current session view.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Signed-in user", body = SessionDto),
        (status = 401, description = "No session", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security(("SessionCookie" = []))
)]
#[get("/auth/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionDto>> {
    let user = session.require_user(NOT_SIGNED_IN_MESSAGE)?;
    Ok(web::Json(SessionDto::from(user)))
}

/// Redirect the browser to Google's consent screen.
#[utoipa::path(
    get,
    path = "/api/v1/auth/oauth/google",
    responses(
        (status = 302, description = "Redirect to Google"),
        (status = 503, description = "OAuth not configured", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "oauthStart",
    security([])
)]
#[get("/auth/oauth/google")]
pub async fn oauth_start(
    state: web::Data<HttpState>,
    handshake: OAuthHandshake,
) -> ApiResult<HttpResponse> {
    let provider = oauth_provider(&state)?;
    let nonce = Uuid::new_v4().to_string();
    let location = provider.authorize_url(&nonce).map_err(|err| {
        warn!(error = %err, provider = provider.name(), "could not build consent URL");
        Error::internal(err.to_string())
    })?;
    handshake.remember(&nonce)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// Complete Google sign-in, set the session cookie and redirect.
#[utoipa::path(
    get,
    path = "/api/v1/auth/oauth/google/callback",
    params(OAuthCallbackParams),
    responses(
        (status = 302, description = "Signed in; redirect to the post-login page"),
        (status = 401, description = "Sign-in rejected", body = ErrorSchema),
        (status = 503, description = "OAuth not configured", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "oauthCallback",
    security([])
)]
#[get("/auth/oauth/google/callback")]
pub async fn oauth_callback(
    state: web::Data<HttpState>,
    handshake: OAuthHandshake,
    params: web::Query<OAuthCallbackParams>,
) -> ApiResult<HttpResponse> {
    let provider = oauth_provider(&state)?;
    let OAuthCallbackParams {
        code,
        state: returned_state,
        error,
    } = params.into_inner();
    let expected_state = handshake.take();

    if let Some(reason) = error {
        warn!(reason = %reason, "oauth provider reported an error");
        return Err(rejected());
    }
    let (Some(code), Some(returned), Some(expected)) = (code, returned_state, expected_state)
    else {
        warn!("oauth callback missing code or state");
        return Err(rejected());
    };
    if returned != expected {
        warn!("oauth state mismatch");
        return Err(rejected());
    }

    let identity = provider.exchange_code(&code).await.map_err(|err| {
        warn!(error = %err, provider = provider.name(), "oauth code exchange failed");
        rejected()
    })?;
    match state.sign_in.sign_in_with_oauth(&identity).await {
        SignInOutcome::Authenticated(issued) => {
            let cookie = session_cookie(issued.token, state.tokens.ttl_seconds(), state.cookies);
            Ok(HttpResponse::Found()
                .cookie(cookie)
                .insert_header((header::LOCATION, state.post_login_redirect.clone()))
                .finish())
        }
        SignInOutcome::Rejected => Err(rejected()),
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
