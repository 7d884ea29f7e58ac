//! Inbound adapters translating external requests into directory port calls
//! while keeping framework details at the edge.

pub mod http;
