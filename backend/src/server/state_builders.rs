//! Builders wiring repositories, adapters and services into [`HttpState`].

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use catalog::domain::ports::{ItemRepository, OAuthProvider, UserRepository};
use catalog::domain::{CatalogService, ItemService, RegistrationService, SessionIssuer};
use catalog::inbound::http::session_config::SessionSettings;
use catalog::inbound::http::state::{CookiePolicy, HttpState, HttpStatePorts};
use catalog::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use catalog::outbound::oauth::GoogleOAuthProvider;
use catalog::outbound::persistence::{DbPool, DieselItemRepository, DieselUserRepository};
use catalog::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};
use catalog::seed::{ensure_demo_user, seed_items_on_startup};
use catalog::settings::AppSettings;

/// Build the HTTP state, seeding the stores first.
///
/// PostgreSQL repositories are used when a pool is supplied; otherwise the
/// process runs on in-memory stores that vanish on restart.
///
/// # Errors
///
/// Returns [`io::Error`] when an adapter cannot be constructed or startup
/// seeding fails.
pub async fn build_http_state(
    settings: &AppSettings,
    session: &SessionSettings,
    pool: Option<DbPool>,
) -> io::Result<HttpState> {
    match pool {
        Some(pool) => {
            assemble(
                Arc::new(DieselItemRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool)),
                settings,
                session,
            )
            .await
        }
        None => {
            warn!("no database configured; using in-memory stores");
            assemble(
                Arc::new(InMemoryItemRepository::default()),
                Arc::new(InMemoryUserRepository::default()),
                settings,
                session,
            )
            .await
        }
    }
}

async fn assemble<I, U>(
    items: Arc<I>,
    users: Arc<U>,
    settings: &AppSettings,
    session: &SessionSettings,
) -> io::Result<HttpState>
where
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Arc::new(Argon2PasswordHasher::new().map_err(io::Error::other)?);
    let ttl_seconds = settings.session_ttl_seconds().map_err(io::Error::other)?;
    let tokens = Arc::new(
        JwtSessionTokens::new(session.token_secret(), ttl_seconds, Arc::clone(&clock))
            .map_err(io::Error::other)?,
    );
    let registration =
        RegistrationService::new(Arc::clone(&users), Arc::clone(&hasher), Arc::clone(&clock));

    seed_items_on_startup(settings.seed_items_path(), items.as_ref())
        .await
        .map_err(io::Error::other)?;
    ensure_demo_user(&registration, settings.demo_email(), settings.demo_password())
        .await
        .map_err(io::Error::other)?;

    let ports = HttpStatePorts {
        catalog: Arc::new(CatalogService::new(Arc::clone(&items))),
        items: Arc::new(ItemService::new(items, Arc::clone(&clock))),
        registration: Arc::new(registration),
        sign_in: Arc::new(SessionIssuer::new(
            users,
            hasher,
            Arc::clone(&tokens),
            clock,
        )),
        tokens,
    };
    let state = HttpState::new(ports)
        .with_cookie_policy(CookiePolicy {
            secure: session.cookie_secure,
            same_site: session.same_site,
        })
        .with_post_login_redirect(settings.post_login_redirect());

    match settings.google_oauth() {
        Some(config) => {
            let provider = GoogleOAuthProvider::new(config).map_err(io::Error::other)?;
            info!(provider = provider.name(), "oauth sign-in enabled");
            Ok(state.with_oauth(Arc::new(provider)))
        }
        None => {
            info!("oauth sign-in disabled; client settings incomplete");
            Ok(state)
        }
    }
}
