//! Startup provisioning: item import and the demo login.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use super::documents::ItemDocument;
use crate::domain::ports::{ItemPersistenceError, ItemRepository, PasswordHasher, UserRepository};
use crate::domain::{Error, RegistrationService};

/// Display name given to the provisioned demo account.
pub const DEMO_USER_NAME: &str = "Demo User";

/// Errors returned while provisioning at startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read item seed file at {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a JSON array of item documents.
    #[error("item seed file at {path} is malformed: {source}")]
    SeedParse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The item store rejected a read or insert.
    #[error("item seeding failed: {0}")]
    Persistence(#[from] ItemPersistenceError),
    /// The demo account could not be provisioned.
    #[error("demo user provisioning failed: {0}")]
    DemoUser(#[from] Error),
}

/// Import items from `path` when the store is empty.
///
/// Returns the number of items inserted. Nothing is read when `path` is
/// `None` or the store already holds items.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the file cannot be read or parsed or
/// an insert fails.
pub async fn seed_items_on_startup<R>(
    path: Option<&Path>,
    items: &R,
) -> Result<usize, StartupSeedingError>
where
    R: ItemRepository + ?Sized,
{
    let Some(path) = path else {
        info!(reason = "not configured", "item seeding skipped");
        return Ok(0);
    };
    let existing = items.count().await?;
    if existing > 0 {
        info!(existing, "item store already populated; seeding skipped");
        return Ok(0);
    }

    let documents = load_documents(path)?;
    let total = documents.len();
    for document in documents {
        items.insert(&document.into_item()).await?;
    }
    info!(count = total, path = %path.display(), "seeded items");
    Ok(total)
}

/// Make sure the demo login exists when both credentials are configured.
///
/// # Errors
///
/// Returns [`StartupSeedingError::DemoUser`] if the lookup, hashing or
/// insert fails.
pub async fn ensure_demo_user<U, H>(
    registration: &RegistrationService<U, H>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<bool, StartupSeedingError>
where
    U: UserRepository,
    H: PasswordHasher,
{
    let (Some(email), Some(password)) = (
        email.filter(|v| !v.trim().is_empty()),
        password.filter(|v| !v.is_empty()),
    ) else {
        return Ok(false);
    };
    let created = registration
        .ensure_account(email, password, DEMO_USER_NAME)
        .await?;
    if created {
        info!("provisioned demo user");
    }
    Ok(created)
}

fn load_documents(path: &Path) -> Result<Vec<ItemDocument>, StartupSeedingError> {
    let read_error = |source: std::io::Error| StartupSeedingError::SeedRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_slice(&payload).map_err(|source| StartupSeedingError::SeedParse {
        path: path.to_path_buf(),
        source,
    })
}
