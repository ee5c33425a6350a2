//! Credential adapters: Argon2 password hashing and JWT access tokens.

mod argon2_password_hasher;
mod jwt_access_token_issuer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_access_token_issuer::{AccessTokenClaims, JwtAccessTokenIssuer};
