//! HTTP handlers for the public course catalog.

use std::str::FromStr;

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::GetCourseQuery;
use crate::domain::foundation::{CourseId, DomainError};

use super::dto::{CourseListResponse, CourseResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

/// Parses a course id path segment.
pub(crate) fn parse_course_id(raw: &str) -> Result<CourseId, ApiError> {
    CourseId::from_str(raw)
        .map_err(|_| ApiError::from(DomainError::validation("course_id", "Invalid course id")))
}

/// GET / - Liveness probe
pub async fn health() -> &'static str {
    "API Working"
}

/// GET /api/course/all - Published courses, served through the catalog cache
pub async fn list_published_courses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.list_published_courses_handler().handle().await?;
    Ok(Json(CourseListResponse::from(courses)))
}

/// GET /api/course/:id - One published course
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetCourseQuery {
        course_id: parse_course_id(&course_id)?,
    };

    let course = state.get_course_handler().handle(query).await?;

    Ok(Json(CourseResponse::from(course)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn parse_course_id_accepts_uuid() {
        let id = CourseId::new();
        assert_eq!(parse_course_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_course_id_rejects_garbage() {
        let err = parse_course_id("not-a-uuid").unwrap_err();
        assert_eq!(err.0.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn health_reports_working() {
        assert_eq!(health().await, "API Working");
    }
}
