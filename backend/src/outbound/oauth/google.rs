//! Reqwest-backed Google OAuth 2.0 adapter.
//!
//! Owns transport details only: building the consent URL, the code-for-token
//! exchange and decoding the userinfo profile.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;
use zeroize::Zeroizing;

use super::dto::{TokenResponseDto, UserInfoDto};
use crate::domain::ports::{OAuthError, OAuthIdentity, OAuthProvider};

const PROVIDER_NAME: &str = "google";
const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client registration for Google sign-in.
pub struct GoogleOAuthConfig {
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: Zeroizing<String>,
    /// Callback URL registered with Google.
    pub redirect_url: String,
}

/// Google endpoints; overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    /// Consent screen URL.
    pub authorize: Url,
    /// Token exchange URL.
    pub token: Url,
    /// OpenID userinfo URL.
    pub userinfo: Url,
}

impl GoogleEndpoints {
    /// Google's production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Configuration`] if a built-in URL fails to
    /// parse.
    pub fn production() -> Result<Self, OAuthError> {
        Ok(Self {
            authorize: parse_url(AUTHORIZE_ENDPOINT)?,
            token: parse_url(TOKEN_ENDPOINT)?,
            userinfo: parse_url(USERINFO_ENDPOINT)?,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, OAuthError> {
    Url::parse(raw).map_err(|err| OAuthError::configuration(format!("{raw}: {err}")))
}

/// [`OAuthProvider`] for Google accounts.
pub struct GoogleOAuthProvider {
    client: Client,
    client_id: String,
    client_secret: Zeroizing<String>,
    redirect_url: Url,
    endpoints: GoogleEndpoints,
}

impl GoogleOAuthProvider {
    /// Build a provider against Google's production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Configuration`] when the redirect URL is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: GoogleOAuthConfig) -> Result<Self, OAuthError> {
        Self::with_endpoints(config, GoogleEndpoints::production()?)
    }

    /// Build a provider against explicit endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Configuration`] when the redirect URL is invalid
    /// or the HTTP client cannot be built.
    pub fn with_endpoints(
        config: GoogleOAuthConfig,
        endpoints: GoogleEndpoints,
    ) -> Result<Self, OAuthError> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(OAuthError::configuration("client id and secret are required"));
        }
        let redirect_url = parse_url(&config.redirect_url)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| OAuthError::configuration(err.to_string()))?;
        Ok(Self {
            client,
            client_id: config.client_id,
            client_secret: config.client_secret,
            redirect_url,
            endpoints,
        })
    }

    async fn fetch_access_token(&self, code: &str) -> Result<Zeroizing<String>, OAuthError> {
        let form = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .client
            .post(self.endpoints.token.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|err| OAuthError::exchange(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| OAuthError::exchange(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, "token endpoint"));
        }
        let token: TokenResponseDto = serde_json::from_slice(&body)
            .map_err(|err| OAuthError::exchange(format!("invalid token payload: {err}")))?;
        Ok(Zeroizing::new(token.access_token))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserInfoDto, OAuthError> {
        let response = self
            .client
            .get(self.endpoints.userinfo.clone())
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| OAuthError::profile(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| OAuthError::profile(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, "userinfo endpoint"));
        }
        serde_json::from_slice(&body)
            .map_err(|err| OAuthError::profile(format!("invalid userinfo payload: {err}")))
    }
}

fn map_status_error(status: StatusCode, endpoint: &str) -> OAuthError {
    if status.is_client_error() {
        OAuthError::exchange(format!("{endpoint} rejected the request ({status})"))
    } else {
        OAuthError::exchange(format!("{endpoint} failed ({status})"))
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let mut url = self.endpoints.authorize.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_url.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state)
            .append_pair("prompt", "select_account");
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthIdentity, OAuthError> {
        if code.trim().is_empty() {
            return Err(OAuthError::exchange("authorisation code is empty"));
        }
        let access_token = self.fetch_access_token(code).await?;
        self.fetch_profile(&access_token)
            .await?
            .into_identity(PROVIDER_NAME)
            .map_err(OAuthError::profile)
    }
}
