//! HTTP adapter for learner endpoints.
//!
//! - `GET /api/user/data` - The caller's user record
//! - `GET /api/user/enrolled-courses` - Enrolled courses, newest first
//! - `POST /api/user/purchase` - Start a hosted checkout

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::UserResponse;
pub use routes::user_routes;
