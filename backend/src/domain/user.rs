//! User entity and the business rules derived from its age, money and status.
//!
//! A [`User`] stored in the directory references its children by identifier;
//! [`UserSnapshot`] is the rendered form with children embedded, which is what
//! adapters serialise. [`UserDraft`] and [`UserChanges`] are the inbound shapes
//! for creation and shallow merges.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Age at which users retire.
pub const RETIREMENT_AGE: u32 = 65;

const ADULT_AGE: u32 = 18;
const SENIOR_CATEGORY_AGE: u32 = 60;
const SENIOR_CITIZEN_AGE: u32 = 65;
const TEENAGE_YEARS: RangeInclusive<u32> = 13..=19;

const REGULAR_MONEY: f64 = 1_000.0;
const VIP_MONEY: f64 = 5_000.0;
const ADMIN_MONEY: f64 = 10_000.0;

/// Directory-assigned user identifier.
///
/// Identifiers are decimal strings allocated from the directory's sequence.
/// Path parameters are wrapped as-is, so lookups with foreign values simply
/// miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "1")]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership status, ordered by the money thresholds in
/// [`User::propose_new_status`].
///
/// Serialised in lowercase; capitalised spellings are accepted on input.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(alias = "Outdated")]
    Outdated,
    #[default]
    #[serde(alias = "Regular")]
    Regular,
    #[serde(alias = "VIP", alias = "Vip")]
    Vip,
    #[serde(alias = "Admin")]
    Admin,
}

/// Age bracket derived from [`User::age`]. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum UserCategory {
    Child,
    Adult,
    Senior,
}

/// Rejections raised by [`User::increment_age_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgeIncrementError {
    #[error("Target age must be a number")]
    NotANumber,
    #[error("Target age must be greater than 0")]
    NotPositive,
    #[error("Target age must be greater than the current age")]
    NotAboveCurrentAge { current: u32, target: i64 },
    #[error("Target age is out of range")]
    OutOfRange,
}

impl AgeIncrementError {
    /// Parse a raw target age such as a path segment.
    ///
    /// Only the leading integer is read: `"40.5"` gives 40 and `"45years"`
    /// gives 45. Surrounding whitespace and a single sign are accepted.
    ///
    /// # Errors
    /// Returns [`AgeIncrementError::NotANumber`] when `raw` does not start
    /// with a digit (after an optional sign) and
    /// [`AgeIncrementError::OutOfRange`] when the prefix overflows `i64`.
    pub fn parse_target(raw: &str) -> Result<i64, Self> {
        let trimmed = raw.trim_start();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(Self::NotANumber);
        }
        let magnitude: i64 = digits.parse().map_err(|_| Self::OutOfRange)?;
        Ok(if negative { -magnitude } else { magnitude })
    }
}

/// Fields used to create a user. Omitted fields take their defaults.
///
/// `children` is honoured when creating a root user: every nested draft
/// becomes its own directory record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub money: f64,
    #[schema(no_recursion)]
    pub children: Vec<UserDraft>,
    pub pet_name: String,
    pub address: String,
    pub post_code: String,
    pub status: Status,
}

/// Shallow merge applied by update and patch operations.
///
/// Only scalar fields are mergeable; `id` and `children` in a request body
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// A user record as stored in the directory.
///
/// `id` and `children` are maintained by the directory; the remaining fields
/// are plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub money: f64,
    children: Vec<UserId>,
    pub pet_name: String,
    pub address: String,
    pub post_code: String,
    pub status: Status,
}

impl User {
    /// Build a user from a draft. Nested drafts are not copied; the caller
    /// decides how to register them.
    #[must_use]
    pub fn new(id: UserId, draft: &UserDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            age: draft.age,
            money: draft.money,
            children: Vec::new(),
            pet_name: draft.pet_name.clone(),
            address: draft.address.clone(),
            post_code: draft.post_code.clone(),
            status: draft.status,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Identifiers of the direct children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[UserId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: UserId) {
        self.children.push(child);
    }

    /// Drop `child` from the children list. Returns whether it was present.
    pub(crate) fn remove_child(&mut self, child: &UserId) -> bool {
        let before = self.children.len();
        self.children.retain(|id| id != child);
        before != self.children.len()
    }

    /// Overwrite every field present in `changes`.
    pub fn apply(&mut self, changes: UserChanges) {
        let UserChanges {
            first_name,
            last_name,
            age,
            money,
            pet_name,
            address,
            post_code,
            status,
        } = changes;
        if let Some(value) = first_name {
            self.first_name = value;
        }
        if let Some(value) = last_name {
            self.last_name = value;
        }
        if let Some(value) = age {
            self.age = value;
        }
        if let Some(value) = money {
            self.money = value;
        }
        if let Some(value) = pet_name {
            self.pet_name = value;
        }
        if let Some(value) = address {
            self.address = value;
        }
        if let Some(value) = post_code {
            self.post_code = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
    }

    /// Own money plus the money of the direct children passed in.
    /// Grandchildren are not counted.
    pub fn total_money<'a>(&self, children: impl IntoIterator<Item = &'a User>) -> f64 {
        children
            .into_iter()
            .fold(self.money, |total, child| total + child.money)
    }

    #[must_use]
    pub const fn is_eligible_for_discount(&self) -> bool {
        matches!(self.status, Status::Vip | Status::Admin)
    }

    /// Age the user up to `target_age`, returning the number of years added.
    ///
    /// # Errors
    /// Fails without touching the age when `target_age` is not positive or
    /// not strictly above the current age.
    pub fn increment_age_until(&mut self, target_age: i64) -> Result<u32, AgeIncrementError> {
        if target_age <= 0 {
            return Err(AgeIncrementError::NotPositive);
        }
        let target = u32::try_from(target_age).map_err(|_| AgeIncrementError::OutOfRange)?;
        if target <= self.age {
            return Err(AgeIncrementError::NotAboveCurrentAge {
                current: self.age,
                target: target_age,
            });
        }
        let years_added = target - self.age;
        self.age = target;
        Ok(years_added)
    }

    /// Child below 18, Adult below 60, Senior from 60.
    #[must_use]
    pub const fn category(&self) -> UserCategory {
        if self.age < ADULT_AGE {
            UserCategory::Child
        } else if self.age < SENIOR_CATEGORY_AGE {
            UserCategory::Adult
        } else {
            UserCategory::Senior
        }
    }

    #[must_use]
    pub fn is_teenager(&self) -> bool {
        TEENAGE_YEARS.contains(&self.age)
    }

    /// Senior citizen from 65. Deliberately independent of
    /// [`UserCategory::Senior`], which starts at 60.
    #[must_use]
    pub const fn is_senior_citizen(&self) -> bool {
        self.age >= SENIOR_CITIZEN_AGE
    }

    #[must_use]
    pub const fn retirement_age(&self) -> u32 {
        RETIREMENT_AGE
    }

    /// Years left until [`RETIREMENT_AGE`]; zero once reached.
    #[must_use]
    pub const fn years_to_retirement(&self) -> u32 {
        self.retirement_age().saturating_sub(self.age)
    }

    /// Status suggested by the current money balance.
    #[must_use]
    pub fn propose_new_status(&self) -> Status {
        if self.money < REGULAR_MONEY {
            Status::Outdated
        } else if self.money < VIP_MONEY {
            Status::Regular
        } else if self.money < ADMIN_MONEY {
            Status::Vip
        } else {
            Status::Admin
        }
    }
}

/// Rendered user with its children resolved and embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub money: f64,
    #[schema(no_recursion)]
    pub children: Vec<UserSnapshot>,
    pub pet_name: String,
    pub address: String,
    pub post_code: String,
    pub status: Status,
}

impl UserSnapshot {
    /// Render `user` with already-rendered `children`.
    #[must_use]
    pub fn from_user(user: &User, children: Vec<Self>) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            age: user.age,
            money: user.money,
            children,
            pet_name: user.pet_name.clone(),
            address: user.address.clone(),
            post_code: user.post_code.clone(),
            status: user.status,
        }
    }
}

/// Values derived from a single user's record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserInsights {
    pub proposed_status: Status,
    pub years_to_retirement: u32,
    pub category: UserCategory,
    pub total_money: f64,
    pub eligible_for_discount: bool,
}

#[cfg(test)]
mod tests;
