//! Driving port for directory use-cases.
//!
//! Inbound adapters (HTTP handlers) depend on this trait rather than on a
//! concrete store. The process-memory implementation lives in
//! `outbound::memory`; handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, UserChanges, UserDraft, UserId, UserInsights, UserSnapshot};

/// Directory operations exposed to inbound adapters.
///
/// Every method runs to completion against a consistent view of the
/// directory. Missing users or children surface as
/// [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound) errors carrying
/// `"User not found"` or `"Child not found"`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a root user, registering any inline children.
    async fn create_user(&self, draft: UserDraft) -> Result<UserSnapshot, Error>;

    /// Every record, children included, in insertion order.
    async fn list_users(&self) -> Result<Vec<UserSnapshot>, Error>;

    async fn get_user(&self, id: &UserId) -> Result<UserSnapshot, Error>;

    /// Shallow-merge `changes` into an existing user.
    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<UserSnapshot, Error>;

    /// Remove a user and all descendants; returns the removed identifiers.
    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserId>, Error>;

    async fn add_child(&self, parent: &UserId, draft: UserDraft) -> Result<UserSnapshot, Error>;

    async fn list_children(&self, parent: &UserId) -> Result<Vec<UserSnapshot>, Error>;

    async fn get_child(&self, parent: &UserId, child: &UserId) -> Result<UserSnapshot, Error>;

    async fn update_child(
        &self,
        parent: &UserId,
        child: &UserId,
        changes: UserChanges,
    ) -> Result<UserSnapshot, Error>;

    /// Remove one child without cascading; returns the removed child.
    async fn delete_child(&self, parent: &UserId, child: &UserId) -> Result<UserSnapshot, Error>;

    async fn user_insights(&self, id: &UserId) -> Result<UserInsights, Error>;

    /// Age a user up to the raw target; returns the years added.
    async fn increment_age_until(&self, id: &UserId, target_age: &str) -> Result<u32, Error>;
}
