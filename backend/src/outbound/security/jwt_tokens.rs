//! HMAC-signed JWT session tokens.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{Role, SessionToken, SessionUser, UserId};

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    name: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// [`SessionTokens`] adapter producing HS256 JWTs.
///
/// Expiry is checked against the injected clock rather than the system
/// time, so tests can pin the current instant.
#[derive(Clone)]
pub struct JwtSessionTokens {
    secret: Arc<Zeroizing<Vec<u8>>>,
    ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokens {
    /// Create a token adapter signing with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionTokenError::Encode`] when the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes or the lifetime is not positive.
    pub fn new(
        secret: &[u8],
        ttl_seconds: i64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SessionTokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionTokenError::encode(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if ttl_seconds <= 0 {
            return Err(SessionTokenError::encode("token lifetime must be positive"));
        }
        Ok(Self {
            secret: Arc::new(Zeroizing::new(secret.to_vec())),
            ttl_seconds,
            clock,
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user: &SessionUser) -> Result<SessionToken, SessionTokenError> {
        let now = self.clock.utc().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_owned(),
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map(SessionToken::new)
        .map_err(|err| SessionTokenError::encode(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionUser, SessionTokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        )
        .map_err(|err| SessionTokenError::invalid(err.to_string()))?;
        let claims = data.claims;

        if claims.exp <= self.clock.utc().timestamp() {
            return Err(SessionTokenError::expired());
        }
        let id: UserId = claims
            .sub
            .parse()
            .map_err(|_| SessionTokenError::invalid("subject is not a user id"))?;

        Ok(SessionUser {
            id,
            role: Role::new(claims.role),
            name: claims.name,
            email: claims.email,
        })
    }

    fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}
