//! Driving port for account mutations: registration, profile edits and
//! password changes.

use async_trait::async_trait;

use crate::domain::{Error, PasswordChange, ProfileUpdate, Registration, User, UserId};

/// Domain use-case port for account lifecycle commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Create an account. Fails with `conflict` when the username or email is
    /// already registered.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Apply a partial profile update. Only changed fields are checked for
    /// uniqueness.
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<User, Error>;

    /// Verify the current password and store a hash of the new one.
    async fn change_password(
        &self,
        user_id: &UserId,
        change: &PasswordChange,
    ) -> Result<(), Error>;
}
