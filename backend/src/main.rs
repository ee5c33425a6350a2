//! Backend entry-point: loads settings, prepares storage and runs the server.

use std::io;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use calculator_backend::inbound::http::health::HealthState;
use calculator_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use calculator_backend::outbound::security::JwtAccessTokenIssuer;
use calculator_backend::server::{AppSettings, ServerConfig, create_server};

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

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let key = settings.session_key().map_err(io::Error::other)?;
    let ttl = settings.access_token_ttl().map_err(io::Error::other)?;

    let token_issuer = match settings.jwt_secret.as_deref() {
        Some(secret) => JwtAccessTokenIssuer::new(secret.as_bytes(), ttl),
        None => {
            warn!("no JWT secret configured; tokens will not survive a restart");
            JwtAccessTokenIssuer::with_generated_secret(ttl)
        }
    };

    let mut config = ServerConfig::new(
        key,
        settings.session_cookie_secure(),
        SameSite::Lax,
        bind_addr,
        token_issuer,
    );

    match settings.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(|e| io::Error::other(format!("migrations failed: {e}")))?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| io::Error::other(format!("database pool: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; using in-memory storage"),
    }

    info!(%bind_addr, database = config.has_database(), "starting calculator backend");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
