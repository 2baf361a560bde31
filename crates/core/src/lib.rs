//! Shared request/response contract for the commerce admin API.
//!
//! Holds the entity schemas and the route contract registry. Both the server
//! crates and the HTTP client depend on this crate and build their own copy of
//! the registry from the same static table, so the two sides agree on paths,
//! methods and payload shapes without any runtime handshake.

pub mod contract;
pub mod error;
pub mod schema;
pub mod types;
