//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, User, UserAccount, UserId, Username};

/// Accounts keyed by user id; uniqueness checked on every write.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<UserId, UserAccount>>, UserPersistenceError> {
        self.accounts
            .read()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<UserId, UserAccount>>, UserPersistenceError> {
        self.accounts
            .write()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

/// Reject `user` when another account already holds its username or email.
fn ensure_unique(
    accounts: &HashMap<UserId, UserAccount>,
    user: &User,
) -> Result<(), UserPersistenceError> {
    for other in accounts.values().filter(|other| other.user.id() != user.id()) {
        if other.user.username() == user.username() {
            return Err(UserPersistenceError::duplicate("username"));
        }
        if other.user.email() == user.email() {
            return Err(UserPersistenceError::duplicate("email"));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.write()?;
        if accounts.contains_key(account.user.id()) {
            return Err(UserPersistenceError::duplicate("id"));
        }
        ensure_unique(&accounts, &account.user)?;
        accounts.insert(account.user.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .read()?
            .values()
            .find(|account| account.user.email() == email)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .read()?
            .values()
            .find(|account| account.user.username() == username)
            .cloned())
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.write()?;
        ensure_unique(&accounts, user)?;
        let Some(account) = accounts.get_mut(user.id()) else {
            return Ok(false);
        };
        account.user = user.clone();
        Ok(true)
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.write()?;
        let Some(account) = accounts.get_mut(id) else {
            return Ok(false);
        };
        account.password_hash = password_hash.clone();
        Ok(true)
    }
}
