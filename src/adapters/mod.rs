//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session token validation (Clerk, mock)
//! - `cache` - Course catalog cache over the course repository
//! - `http` - REST API and webhook endpoints (axum)
//! - `memory` - In-memory store for tests and local runs
//! - `postgres` - PostgreSQL repositories (sqlx)
//! - `stripe` - Payment gateway (Stripe Checkout, mock)

pub mod auth;
pub mod cache;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
