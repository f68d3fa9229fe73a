//! Catalog entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalog::inbound::http::health::HealthState;
use catalog::inbound::http::session_config::fingerprint::key_fingerprint;
use catalog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use catalog::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use catalog::settings::AppSettings;
use server::{ServerConfig, build_http_state, create_server};

/// Connect to PostgreSQL after applying pending migrations.
async fn connect(database_url: &str) -> io::Result<DbPool> {
    let applied = run_pending_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    info!(applied, "database migrations complete");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let pool = match settings.database_url() {
        Some(url) => Some(connect(url).await?),
        None => None,
    };
    let http_state = build_http_state(&settings, &session, pool).await?;

    let config = ServerConfig::new(session, bind_addr);
    info!(bind_addr = %config.bind_addr(), "starting catalog server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, web::Data::new(http_state), config)?.await
}
