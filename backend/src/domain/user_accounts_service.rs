//! User account domain services.
//!
//! [`UserAccountsService`] implements the account driving ports on top of the
//! user repository, a password hasher and an access token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::ports::{
    AccessTokenError, AccessTokenIssuer, AuthenticatedUser, LoginService, PasswordHasher,
    PasswordHasherError, UserAccountsCommand, UserPersistenceError, UserProfileQuery,
    UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User, UserAccount,
    UserId,
};

const DUPLICATE_ACCOUNT: &str = "Username or email already exists";
const USERNAME_TAKEN: &str = "Username already taken";
const EMAIL_TAKEN: &str = "Email already taken";
const INVALID_LOGIN: &str = "Invalid email or password.";
const USER_NOT_FOUND: &str = "User not found";
const OLD_PASSWORD_INCORRECT: &str = "Old password is incorrect";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => match field.as_str() {
            "email" => Error::conflict(EMAIL_TAKEN),
            "username" => Error::conflict(USERNAME_TAKEN),
            _ => Error::conflict(DUPLICATE_ACCOUNT),
        },
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("password hasher error: {error}"))
}

fn map_token_error(error: AccessTokenError) -> Error {
    Error::internal(format!("access token error: {error}"))
}

/// Account service implementing login, profile and account command ports.
#[derive(Clone)]
pub struct UserAccountsService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> UserAccountsService<R, H, T> {
    /// Create a new service from its driven ports.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<R, H, T> UserAccountsService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: AccessTokenIssuer,
{
    async fn load_account(&self, user_id: &UserId) -> Result<UserAccount, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn ensure_profile_unique(
        &self,
        current: &User,
        update: &ProfileUpdate,
    ) -> Result<(), Error> {
        if let Some(username) = update
            .username
            .as_ref()
            .filter(|name| *name != current.username())
        {
            let holder = self
                .users
                .find_by_username(username)
                .await
                .map_err(map_repository_error)?;
            if holder.is_some_and(|account| account.user.id() != current.id()) {
                return Err(Error::conflict(USERNAME_TAKEN));
            }
        }
        if let Some(email) = update
            .email
            .as_ref()
            .filter(|email| *email != current.email())
        {
            let holder = self
                .users
                .find_by_email(email)
                .await
                .map_err(map_repository_error)?;
            if holder.is_some_and(|account| account.user.id() != current.id()) {
                return Err(Error::conflict(EMAIL_TAKEN));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R, H, T> LoginService for UserAccountsService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: AccessTokenIssuer,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !verified {
            debug!(user_id = %account.user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        let access_token = self
            .tokens
            .issue(account.user.id())
            .map_err(map_token_error)?;
        info!(user_id = %account.user.id(), "user logged in");
        Ok(AuthenticatedUser {
            user: account.user,
            access_token,
        })
    }
}

#[async_trait]
impl<R, H, T> UserProfileQuery for UserAccountsService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: AccessTokenIssuer,
{
    async fn fetch_user(&self, user_id: &UserId) -> Result<User, Error> {
        Ok(self.load_account(user_id).await?.user)
    }
}

#[async_trait]
impl<R, H, T> UserAccountsCommand for UserAccountsService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: AccessTokenIssuer,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let taken = self
            .users
            .find_by_username(registration.username())
            .await
            .map_err(map_repository_error)?
            .is_some()
            || self
                .users
                .find_by_email(registration.email())
                .await
                .map_err(map_repository_error)?
                .is_some();
        if taken {
            return Err(Error::conflict(DUPLICATE_ACCOUNT));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            Utc::now(),
        );
        let account = UserAccount {
            user,
            password_hash,
        };

        self.users.insert(&account).await.map_err(|err| match err {
            UserPersistenceError::Duplicate { .. } => Error::conflict(DUPLICATE_ACCOUNT),
            other => map_repository_error(other),
        })?;

        info!(user_id = %account.user.id(), "user registered");
        Ok(account.user)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<User, Error> {
        let current = self.load_account(user_id).await?.user;
        if update.is_empty() {
            return Ok(current);
        }
        self.ensure_profile_unique(&current, update).await?;

        let updated = current.with_profile(update.username.clone(), update.email.clone());
        let found = self
            .users
            .update_profile(&updated)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(Error::not_found(USER_NOT_FOUND));
        }

        info!(user_id = %user_id, "user profile updated");
        Ok(updated)
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        change: &PasswordChange,
    ) -> Result<(), Error> {
        let account = self.load_account(user_id).await?;
        let verified = self
            .hasher
            .verify(change.old_password(), &account.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !verified {
            return Err(Error::invalid_request(OLD_PASSWORD_INCORRECT));
        }

        let password_hash = self
            .hasher
            .hash(change.new_password())
            .await
            .map_err(map_hasher_error)?;
        let found = self
            .users
            .update_password_hash(user_id, &password_hash)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(Error::not_found(USER_NOT_FOUND));
        }

        info!(user_id = %user_id, "user password changed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_accounts_service_tests.rs"]
mod tests;
