//! User account repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewUser, UserAccount, UserFilter, UserId, UserProfileChanges};

/// Repository trait for user account operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    async fn insert_user(&self, user: NewUser) -> RepositoryResult<UserAccount>;

    /// Fetch an account by id.
    async fn fetch_user(&self, id: UserId) -> RepositoryResult<Option<UserAccount>>;

    /// Fetch an account by email (exact match).
    async fn fetch_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserAccount>>;

    /// List accounts matching the filter, ordered by name.
    async fn list_users(&self, filter: UserFilter) -> RepositoryResult<Vec<UserAccount>>;

    /// Apply profile changes. Fails with `NotFound` for unknown ids.
    async fn update_user_profile(
        &self,
        id: UserId,
        changes: UserProfileChanges,
    ) -> RepositoryResult<UserAccount>;

    /// Replace the stored password hash.
    async fn update_user_password(&self, id: UserId, password_hash: String)
        -> RepositoryResult<()>;

    /// Delete an account. Fails with `NotFound` for unknown ids.
    async fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
}
