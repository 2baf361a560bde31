//! Request handlers, one module per resource.
//!
//! Each handler validates its input against the route contract, makes a single
//! storage call and answers through [`crate::response::respond`].

pub mod automation;
pub mod products;
pub mod regions;
