//! Domain primitives, the user model and the directory arena.
//!
//! Public surface:
//! - `User`, `UserSnapshot`, `UserDraft`, `UserChanges`: the user entity, its
//!   rendered form and its inbound shapes.
//! - `Directory`: arena of users with cascade-aware mutations.
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `ports::UserDirectory`: driving port used by inbound adapters.

pub mod directory;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::directory::{Directory, DirectoryError, IdSequence};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AgeIncrementError, RETIREMENT_AGE, Status, User, UserCategory, UserChanges, UserDraft, UserId,
    UserInsights, UserSnapshot,
};
