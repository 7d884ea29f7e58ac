//! In-memory user directory.
//!
//! Users live in a single arena keyed by [`UserId`]. A parent's `children`
//! holds identifiers into the same arena, so every child is both listed under
//! its parent and present as a record of its own. All mutations keep the two
//! views consistent.
//!
//! Identifiers come from one [`IdSequence`] owned by the directory and shared
//! by root users and children.

use std::collections::HashMap;

use thiserror::Error;

use super::user::{
    AgeIncrementError, User, UserChanges, UserDraft, UserId, UserInsights, UserSnapshot,
};
use super::Error as DomainError;

/// Monotonic identifier generator. A fresh sequence starts at `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next identifier.
    pub fn allocate(&mut self) -> UserId {
        let id = UserId::from(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Lookup and validation failures raised by [`Directory`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("User not found")]
    UserNotFound { id: UserId },
    #[error("Child not found")]
    ChildNotFound { parent: UserId, child: UserId },
    #[error(transparent)]
    InvalidTargetAge(#[from] AgeIncrementError),
}

impl From<DirectoryError> for DomainError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::UserNotFound { .. } | DirectoryError::ChildNotFound { .. } => {
                Self::not_found(value.to_string())
            }
            DirectoryError::InvalidTargetAge(_) => Self::invalid_request(value.to_string()),
        }
    }
}

/// Arena of users plus the identifier sequence.
#[derive(Debug, Default)]
pub struct Directory {
    users: HashMap<UserId, User>,
    order: Vec<UserId>,
    ids: IdSequence,
}

impl Directory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, children included.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        self.users.contains_key(id)
    }

    /// Create a root user.
    ///
    /// Children supplied inline become records of their own, allocated depth
    /// first after their parent and linked to it.
    pub fn create(&mut self, mut draft: UserDraft) -> UserSnapshot {
        let mut root = User::new(self.ids.allocate(), &draft);
        self.order.push(root.id().clone());

        let mut pending: Vec<(Option<UserId>, UserDraft)> = std::mem::take(&mut draft.children)
            .into_iter()
            .rev()
            .map(|child| (None, child))
            .collect();
        while let Some((parent, child)) = pending.pop() {
            let id = self.ids.allocate();
            match parent.and_then(|parent| self.users.get_mut(&parent)) {
                Some(record) => record.push_child(id.clone()),
                None => root.push_child(id.clone()),
            }
            let nested = self.register(id.clone(), child);
            pending.extend(nested.into_iter().map(|grandchild| (Some(id.clone()), grandchild)));
        }

        let snapshot = self.render(&root);
        self.users.insert(root.id().clone(), root);
        snapshot
    }

    /// Store `draft` under `id` and return its nested drafts, reversed so the
    /// worklist pops them in their original order.
    fn register(&mut self, id: UserId, mut draft: UserDraft) -> Vec<UserDraft> {
        let mut children = std::mem::take(&mut draft.children);
        children.reverse();
        self.insert(User::new(id, &draft));
        children
    }

    fn insert(&mut self, user: User) {
        self.order.push(user.id().clone());
        self.users.insert(user.id().clone(), user);
    }

    fn remove_record(&mut self, id: &UserId) -> Option<User> {
        let user = self.users.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(user)
    }

    fn user(&self, id: &UserId) -> Result<&User, DirectoryError> {
        self.users
            .get(id)
            .ok_or_else(|| DirectoryError::UserNotFound { id: id.clone() })
    }

    fn user_mut(&mut self, id: &UserId) -> Result<&mut User, DirectoryError> {
        self.users
            .get_mut(id)
            .ok_or_else(|| DirectoryError::UserNotFound { id: id.clone() })
    }

    fn render(&self, user: &User) -> UserSnapshot {
        let children = user
            .children()
            .iter()
            .filter_map(|child| self.users.get(child))
            .map(|child| self.render(child))
            .collect();
        UserSnapshot::from_user(user, children)
    }

    fn render_id(&self, id: &UserId) -> Option<UserSnapshot> {
        self.users.get(id).map(|user| self.render(user))
    }

    /// Every record in insertion order, children included.
    #[must_use]
    pub fn list(&self) -> Vec<UserSnapshot> {
        self.order.iter().filter_map(|id| self.render_id(id)).collect()
    }

    /// # Errors
    /// [`DirectoryError::UserNotFound`] when `id` is absent.
    pub fn get(&self, id: &UserId) -> Result<UserSnapshot, DirectoryError> {
        self.user(id).map(|user| self.render(user))
    }

    /// Shallow-merge `changes` into the user. Serves both replace and patch
    /// requests.
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] when `id` is absent.
    pub fn update(&mut self, id: &UserId, changes: UserChanges) -> Result<UserSnapshot, DirectoryError> {
        self.user_mut(id)?.apply(changes);
        self.get(id)
    }

    /// Remove a user and every descendant reachable through `children`.
    ///
    /// The user is also detached from any parent still listing it. Returns the
    /// removed identifiers in removal order (pre-order, children in their
    /// listed order).
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] when `id` is absent; nothing is
    /// removed.
    pub fn delete(&mut self, id: &UserId) -> Result<Vec<UserId>, DirectoryError> {
        self.user(id)?;
        for user in self.users.values_mut() {
            user.remove_child(id);
        }

        let mut removed = Vec::new();
        let mut pending = vec![id.clone()];
        while let Some(next) = pending.pop() {
            if let Some(user) = self.remove_record(&next) {
                pending.extend(user.children().iter().rev().cloned());
                removed.push(next);
            }
        }
        Ok(removed)
    }

    /// Create a child under `parent`. Inline children in `draft` are ignored;
    /// only one level is created per call.
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] when the parent is absent. No
    /// identifier is consumed in that case.
    pub fn add_child(&mut self, parent: &UserId, draft: &UserDraft) -> Result<UserSnapshot, DirectoryError> {
        self.user(parent)?;
        let id = self.ids.allocate();
        let child = User::new(id.clone(), draft);
        let snapshot = self.render(&child);
        self.user_mut(parent)?.push_child(id);
        self.insert(child);
        Ok(snapshot)
    }

    /// Direct children of `parent`, rendered.
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] when the parent is absent.
    pub fn children(&self, parent: &UserId) -> Result<Vec<UserSnapshot>, DirectoryError> {
        let parent = self.user(parent)?;
        Ok(self.render(parent).children)
    }

    /// Confirm `child` is listed under an existing `parent` and still stored.
    fn child_of(&self, parent: &UserId, child: &UserId) -> Result<&User, DirectoryError> {
        let listed = self.user(parent)?.children().contains(child);
        let not_found = || DirectoryError::ChildNotFound {
            parent: parent.clone(),
            child: child.clone(),
        };
        if !listed {
            return Err(not_found());
        }
        self.users.get(child).ok_or_else(not_found)
    }

    /// # Errors
    /// [`DirectoryError::UserNotFound`] or [`DirectoryError::ChildNotFound`].
    pub fn child(&self, parent: &UserId, child: &UserId) -> Result<UserSnapshot, DirectoryError> {
        self.child_of(parent, child).map(|user| self.render(user))
    }

    /// # Errors
    /// [`DirectoryError::UserNotFound`] or [`DirectoryError::ChildNotFound`].
    pub fn update_child(
        &mut self,
        parent: &UserId,
        child: &UserId,
        changes: UserChanges,
    ) -> Result<UserSnapshot, DirectoryError> {
        self.child_of(parent, child)?;
        self.update(child, changes)
    }

    /// Remove a single child record and unlink it from `parent`.
    ///
    /// Unlike [`Directory::delete`] this does not cascade: the child's own
    /// children remain as orphaned records. Returns the child as rendered just
    /// before removal.
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] or [`DirectoryError::ChildNotFound`].
    pub fn delete_child(&mut self, parent: &UserId, child: &UserId) -> Result<UserSnapshot, DirectoryError> {
        let snapshot = self.child(parent, child)?;
        self.user_mut(parent)?.remove_child(child);
        self.remove_record(child);
        Ok(snapshot)
    }

    /// Derived values for one user.
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] when `id` is absent.
    pub fn insights(&self, id: &UserId) -> Result<UserInsights, DirectoryError> {
        let user = self.user(id)?;
        let children = user.children().iter().filter_map(|child| self.users.get(child));
        Ok(UserInsights {
            proposed_status: user.propose_new_status(),
            years_to_retirement: user.years_to_retirement(),
            category: user.category(),
            total_money: user.total_money(children),
            eligible_for_discount: user.is_eligible_for_discount(),
        })
    }

    /// Age a user up to the raw `target_age`. The user lookup happens before
    /// the target is parsed, so a missing user wins over a malformed target.
    ///
    /// # Errors
    /// [`DirectoryError::UserNotFound`] when `id` is absent,
    /// [`DirectoryError::InvalidTargetAge`] when the target is rejected.
    pub fn increment_age_until(&mut self, id: &UserId, target_age: &str) -> Result<u32, DirectoryError> {
        let user = self.user_mut(id)?;
        let target = AgeIncrementError::parse_target(target_age)?;
        Ok(user.increment_age_until(target)?)
    }
}
