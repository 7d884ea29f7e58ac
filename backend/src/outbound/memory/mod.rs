//! Process-memory implementation of the [`UserDirectory`] port.
//!
//! One [`Directory`] sits behind a mutex, so each operation, including the
//! cascading delete, completes before the next one starts. Nothing survives
//! the process.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::UserDirectory;
use crate::domain::{
    Directory, DirectoryError, Error, UserChanges, UserDraft, UserId, UserInsights, UserSnapshot,
};

/// Directory adapter backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    directory: Mutex<Directory>,
}

impl InMemoryUserDirectory {
    /// Empty directory whose identifiers start at `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing directory, e.g. one seeded by a test.
    #[must_use]
    pub fn with_directory(directory: Directory) -> Self {
        Self {
            directory: Mutex::new(directory),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Directory>, Error> {
        self.directory.lock().map_err(|_| {
            error!("user directory lock poisoned");
            Error::internal("user directory lock poisoned")
        })
    }

    fn read<T>(&self, op: impl FnOnce(&Directory) -> Result<T, DirectoryError>) -> Result<T, Error> {
        let guard = self.lock()?;
        op(&guard).map_err(Error::from)
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&mut Directory) -> Result<T, DirectoryError>,
    ) -> Result<T, Error> {
        let mut guard = self.lock()?;
        op(&mut guard).map_err(Error::from)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn create_user(&self, draft: UserDraft) -> Result<UserSnapshot, Error> {
        let created = self.write(|directory| Ok(directory.create(draft)))?;
        debug!(user_id = %created.id, children = created.children.len(), "created user");
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<UserSnapshot>, Error> {
        self.read(|directory| Ok(directory.list()))
    }

    async fn get_user(&self, id: &UserId) -> Result<UserSnapshot, Error> {
        self.read(|directory| directory.get(id))
    }

    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<UserSnapshot, Error> {
        self.write(|directory| directory.update(id, changes))
    }

    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserId>, Error> {
        let (removed, remaining) = self.write(|directory| {
            let removed = directory.delete(id)?;
            Ok((removed, directory.len()))
        })?;
        info!(
            user_id = %id,
            removed = removed.len(),
            remaining,
            "deleted user and descendants"
        );
        Ok(removed)
    }

    async fn add_child(&self, parent: &UserId, draft: UserDraft) -> Result<UserSnapshot, Error> {
        let child = self.write(|directory| directory.add_child(parent, &draft))?;
        debug!(parent_id = %parent, child_id = %child.id, "added child");
        Ok(child)
    }

    async fn list_children(&self, parent: &UserId) -> Result<Vec<UserSnapshot>, Error> {
        self.read(|directory| directory.children(parent))
    }

    async fn get_child(&self, parent: &UserId, child: &UserId) -> Result<UserSnapshot, Error> {
        self.read(|directory| directory.child(parent, child))
    }

    async fn update_child(
        &self,
        parent: &UserId,
        child: &UserId,
        changes: UserChanges,
    ) -> Result<UserSnapshot, Error> {
        self.write(|directory| directory.update_child(parent, child, changes))
    }

    async fn delete_child(&self, parent: &UserId, child: &UserId) -> Result<UserSnapshot, Error> {
        let removed = self.write(|directory| directory.delete_child(parent, child))?;
        info!(parent_id = %parent, child_id = %child, "deleted child");
        Ok(removed)
    }

    async fn user_insights(&self, id: &UserId) -> Result<UserInsights, Error> {
        self.read(|directory| directory.insights(id))
    }

    async fn increment_age_until(&self, id: &UserId, target_age: &str) -> Result<u32, Error> {
        self.write(|directory| directory.increment_age_until(id, target_age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryUserDirectory {
        InMemoryUserDirectory::new()
    }

    fn named(first_name: &str) -> UserDraft {
        UserDraft {
            first_name: first_name.into(),
            ..UserDraft::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn created_users_are_listed(store: InMemoryUserDirectory) {
        store.create_user(named("Ada")).await.expect("create");
        store.create_user(named("Grace")).await.expect("create");

        let users = store.list_users().await.expect("list");
        let names: Vec<_> = users.iter().map(|user| user.first_name.as_str()).collect();
        assert_eq!(names, ["Ada", "Grace"]);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_user_maps_to_not_found(store: InMemoryUserDirectory) {
        let err = store.get_user(&UserId::new("1")).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "User not found");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_child_maps_to_not_found(store: InMemoryUserDirectory) {
        let parent = store.create_user(named("Parent")).await.expect("create");
        let err = store
            .get_child(&parent.id, &UserId::new("7"))
            .await
            .expect_err("missing child");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Child not found");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_target_age_maps_to_invalid_request(store: InMemoryUserDirectory) {
        let user = store.create_user(named("Ada")).await.expect("create");
        let err = store
            .increment_age_until(&user.id, "0")
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Target age must be greater than 0");
    }

    #[rstest]
    #[tokio::test]
    async fn cascade_delete_reports_every_removed_record(store: InMemoryUserDirectory) {
        let parent = store.create_user(named("Parent")).await.expect("create");
        let child = store.add_child(&parent.id, named("Child")).await.expect("child");
        store.add_child(&child.id, named("Grandchild")).await.expect("grandchild");

        let removed = store.delete_user(&parent.id).await.expect("delete");

        assert_eq!(removed.len(), 3);
        assert!(store.list_users().await.expect("list").is_empty());
    }

    #[test]
    fn poisoned_lock_surfaces_internal_error() {
        let store = std::sync::Arc::new(InMemoryUserDirectory::new());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.directory.lock().expect("lock");
            panic!("poison the directory lock");
        })
        .join();

        let err = store.read(|directory| Ok(directory.len())).expect_err("poisoned");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
