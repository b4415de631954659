//! Axum router configuration for the public catalog.

use axum::{routing::get, Router};

use super::handlers::{get_course, list_published_courses};
use crate::adapters::http::state::AppState;

/// Create the catalog router, mounted at `/api/course`.
///
/// # Routes
/// - `GET /all` - Published courses
/// - `GET /:id` - One published course
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_published_courses))
        .route("/:id", get(get_course))
}
