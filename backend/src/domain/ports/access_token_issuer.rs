//! Port for issuing bearer access tokens after login.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by access token adapters.
    pub enum AccessTokenError {
        /// The token could not be signed.
        Signing { message: String } => "access token signing failed: {message}",
    }
}

/// Token type reported alongside every access token.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Signed access token handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues access tokens for authenticated users.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenIssuer: Send + Sync {
    /// Sign a token whose subject is `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, AccessTokenError>;
}
