//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-memory directory guarded by a mutex.
//!
//! Adapters translate between domain types and their storage. They contain
//! no business logic.

pub mod memory;
