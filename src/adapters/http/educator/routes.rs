//! Axum router configuration for educator endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_course, educator_dashboard, list_course_students, list_educator_courses,
    list_enrolled_students, update_role,
};
use crate::adapters::http::state::AppState;

/// Create the educator router, mounted at `/api/educator`.
///
/// # Routes (require authentication)
/// - `GET /courses` - Own courses with student counts (educator only)
/// - `POST /courses` - Create a course (educator only)
/// - `GET /courses/:id/students` - Enrolled users (owner only)
/// - `GET /dashboard` - Earnings, course and student totals (educator only)
/// - `GET /enrolled-students` - Students of every owned course (educator only)
/// - `POST /update-role` - Request the educator role (any user)
pub fn educator_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_educator_courses).post(create_course))
        .route("/courses/:id/students", get(list_course_students))
        .route("/dashboard", get(educator_dashboard))
        .route("/enrolled-students", get(list_enrolled_students))
        .route("/update-role", post(update_role))
}
