//! Application configuration loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `CATALOG_*` environment variables and an
//! optional config file. Cookie session settings are read separately (see
//! [`crate::inbound::http::session_config`]).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::outbound::oauth::GoogleOAuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_TTL_HOURS: u32 = 720;
const DEFAULT_POST_LOGIN_REDIRECT: &str = "/";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {message}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `session_ttl_hours` is zero.
    #[error("session_ttl_hours must be at least 1")]
    SessionTtl,
}

/// Top-level service settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Session token lifetime in hours.
    pub session_ttl_hours: Option<u32>,
    /// Google OAuth client identifier.
    pub google_client_id: Option<String>,
    /// Google OAuth client secret.
    pub google_client_secret: Option<String>,
    /// Google OAuth callback URL.
    pub google_redirect_url: Option<String>,
    /// Where the browser lands after an OAuth sign-in.
    pub post_login_redirect: Option<String>,
    /// Demo login email provisioned at startup.
    pub demo_email: Option<String>,
    /// Demo login password provisioned at startup.
    pub demo_password: Option<String>,
    /// JSON file of items imported into an empty store.
    pub seed_items_path: Option<PathBuf>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).map(str::trim).filter(|v| !v.is_empty())
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, if one is configured.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_ref())
    }

    /// Session token lifetime in seconds, defaulting to 30 days.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::SessionTtl`] for a zero lifetime.
    pub fn session_ttl_seconds(&self) -> Result<i64, SettingsError> {
        match self.session_ttl_hours.unwrap_or(DEFAULT_SESSION_TTL_HOURS) {
            0 => Err(SettingsError::SessionTtl),
            hours => Ok(i64::from(hours) * 3_600),
        }
    }

    /// Google client registration when all three values are present.
    pub fn google_oauth(&self) -> Option<GoogleOAuthConfig> {
        let client_id = non_blank(self.google_client_id.as_ref())?;
        let client_secret = non_blank(self.google_client_secret.as_ref())?;
        let redirect_url = non_blank(self.google_redirect_url.as_ref())?;
        Some(GoogleOAuthConfig {
            client_id: client_id.to_owned(),
            client_secret: Zeroizing::new(client_secret.to_owned()),
            redirect_url: redirect_url.to_owned(),
        })
    }

    /// Post-login redirect target, defaulting to `/`.
    pub fn post_login_redirect(&self) -> &str {
        non_blank(self.post_login_redirect.as_ref()).unwrap_or(DEFAULT_POST_LOGIN_REDIRECT)
    }

    /// Demo login email.
    pub fn demo_email(&self) -> Option<&str> {
        non_blank(self.demo_email.as_ref())
    }

    /// Demo login password.
    pub fn demo_password(&self) -> Option<&str> {
        self.demo_password.as_deref().filter(|v| !v.is_empty())
    }

    /// Item seed file.
    pub fn seed_items_path(&self) -> Option<&Path> {
        self.seed_items_path.as_deref()
    }
}
