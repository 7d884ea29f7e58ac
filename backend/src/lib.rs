//! User directory service library.
//!
//! Layout follows a ports-and-adapters split:
//! - `domain`: the user model, the directory arena and the driving port.
//! - `outbound`: the mutex-guarded in-memory adapter.
//! - `inbound`: Actix handlers, error mapping and health probes.
//! - `server`: app assembly and listener lifecycle.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
