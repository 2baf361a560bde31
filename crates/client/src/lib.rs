//! Typed HTTP client for the commerce API.
//!
//! Every call is built from the shared route contract registry: request
//! bodies are checked against the route's input schema before they leave the
//! process, and response bodies are checked against the schema declared for
//! the status that came back. Reads are cached per query key until a write
//! to the same resource invalidates them.

pub mod cache;
pub mod client;
pub mod dashboard;
pub mod error;

pub use cache::{QueryCache, QueryKey};
pub use client::ApiClient;
pub use dashboard::DashboardSummary;
pub use error::{ClientError, ClientResult};
