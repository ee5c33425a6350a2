//! Driving port for user profile queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading a user's public profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile, failing with `not_found` for unknown users.
    async fn fetch_user(&self, user_id: &UserId) -> Result<User, Error>;
}
