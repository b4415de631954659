//! Axum router configuration for learner endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_enrolled_courses, get_user_data, purchase_course};
use crate::adapters::http::state::AppState;

/// Create the learner router, mounted at `/api/user`.
///
/// # Routes (require authentication)
/// - `GET /data` - The caller's user record
/// - `GET /enrolled-courses` - Courses the caller is enrolled in
/// - `POST /purchase` - Start a checkout for one course
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(get_user_data))
        .route("/enrolled-courses", get(get_enrolled_courses))
        .route("/purchase", post(purchase_course))
}
