//! OAuth provider adapters.

mod dto;
mod google;

pub use google::{GoogleEndpoints, GoogleOAuthConfig, GoogleOAuthProvider};
