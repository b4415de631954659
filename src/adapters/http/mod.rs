//! HTTP adapters - REST API and webhook endpoints.
//!
//! Each area has its own adapter module with DTOs, handlers and routes.
//! `build_router` assembles them behind the shared middleware stack.

pub mod catalog;
pub mod educator;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod user;
pub mod webhooks;

pub use error::{ApiError, ErrorResponse};
pub use router::build_router;
pub use state::AppState;
