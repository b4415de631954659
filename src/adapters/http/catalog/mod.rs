//! HTTP adapter for the public course catalog.
//!
//! - `GET /api/course/all` - Published courses
//! - `GET /api/course/:id` - One published course

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CourseListResponse, CourseResponse};
pub use routes::catalog_routes;
