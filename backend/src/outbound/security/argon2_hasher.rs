//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordDigest, TraceId};

/// Memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// [`PasswordHasher`] backed by Argon2id with a fixed cost.
///
/// Digests are stored in PHC string format, so the salt and parameters
/// travel with the hash and verification works across cost changes.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Hasher using the production cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] if the parameters are rejected.
    pub fn new() -> Result<Self, PasswordHashError> {
        Self::with_cost(MEMORY_COST_KIB, TIME_COST, PARALLELISM)
    }

    /// Hasher with explicit cost parameters; tests use a cheap setting.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] if the parameters are rejected.
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &[u8]) -> Result<PasswordDigest, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password, &salt)
        .map(|hash| PasswordDigest::new(hash.to_string()))
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &[u8],
    digest: &str,
) -> Result<bool, PasswordHashError> {
    let parsed =
        PasswordHash::new(digest).map_err(|err| PasswordHashError::malformed(err.to_string()))?;
    match argon2.verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(PasswordHashError::malformed(other.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let argon2 = self.argon2();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        TraceId::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let digest = digest.as_str().to_owned();
        TraceId::spawn_blocking(move || verify_blocking(&argon2, &password, &digest))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }
}
