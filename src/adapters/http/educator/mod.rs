//! HTTP adapter for educator endpoints.
//!
//! - `GET /api/educator/courses` - Own courses with student counts
//! - `POST /api/educator/courses` - Create a course
//! - `GET /api/educator/courses/:id/students` - Students of an owned course
//! - `GET /api/educator/dashboard` - Earnings and totals
//! - `GET /api/educator/enrolled-students` - Students across owned courses
//! - `POST /api/educator/update-role` - Become an educator

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::educator_routes;
