//! HS256 JWT implementation of the `AccessTokenIssuer` port.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::{AccessToken, AccessTokenError, AccessTokenIssuer};

const GENERATED_SECRET_BYTES: usize = 32;

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User id.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Signs access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtAccessTokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl JwtAccessTokenIssuer {
    /// Issuer signing with `secret`; tokens expire after `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issuer with a freshly generated secret. Tokens will not verify across
    /// restarts.
    pub fn with_generated_secret(ttl: Duration) -> Self {
        let mut secret = [0_u8; GENERATED_SECRET_BYTES];
        OsRng.fill_bytes(&mut secret);
        Self::new(&secret, ttl)
    }
}

impl AccessTokenIssuer for JwtAccessTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, AccessTokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.ttl;
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|err| AccessTokenError::signing(err.to_string()))?;
        Ok(AccessToken { token, expires_at })
    }
}
