//! Credential and session token adapters.

mod argon2_hasher;
mod jwt_tokens;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_tokens::{JwtSessionTokens, MIN_SECRET_LEN};
