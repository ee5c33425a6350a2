//! Application settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `CALCULATOR_*` environment variables
//! and configuration files.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;
const MIN_SESSION_KEY_BYTES: usize = 32;

/// Errors raised while turning settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("access token TTL must be positive, got {minutes} minutes")]
    AccessTokenTtl { minutes: i64 },
    #[error("failed to read session key at {path}: {source}")]
    SessionKey {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("session key at {path} must be at least {min} bytes")]
    SessionKeyTooShort { path: PathBuf, min: usize },
}

/// Runtime configuration for the calculator server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALCULATOR")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// HMAC secret for access tokens; generated per process when absent.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in minutes.
    pub access_token_ttl_minutes: Option<i64>,
    /// File holding the session cookie master key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`; on unless set to `false`.
    pub session_cookie_secure: Option<bool>,
    /// Allow a random session key when the key file is unreadable.
    pub session_allow_ephemeral: Option<bool>,
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Access token lifetime, defaulting to 30 minutes.
    pub fn access_token_ttl(&self) -> Result<Duration, SettingsError> {
        let minutes = self
            .access_token_ttl_minutes
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_MINUTES);
        if minutes <= 0 {
            return Err(SettingsError::AccessTokenTtl { minutes });
        }
        Ok(Duration::minutes(minutes))
    }

    /// Whether the session cookie carries the `Secure` attribute.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure.unwrap_or(true)
    }

    /// Whether a missing key file may fall back to a random key.
    #[must_use]
    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    /// Session key file path.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Load the session master key.
    ///
    /// Debug builds, or `session_allow_ephemeral`, fall back to a random key
    /// when the file cannot be read.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(bytes) if bytes.len() >= MIN_SESSION_KEY_BYTES => Ok(Key::derive_from(&bytes)),
            Ok(_) => Err(SettingsError::SessionKeyTooShort {
                path: path.to_path_buf(),
                min: MIN_SESSION_KEY_BYTES,
            }),
            Err(source) => {
                if cfg!(debug_assertions) || self.session_allow_ephemeral() {
                    warn!(path = %path.display(), error = %source, "using temporary session key (dev only)");
                    Ok(Key::generate())
                } else {
                    Err(SettingsError::SessionKey {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }
    }
}
