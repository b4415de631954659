//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Webhook reconciliation writes; enrollment and catalog handlers mostly read.

pub mod handlers;

pub use handlers::*;
