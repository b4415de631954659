//! HTTP handlers for educator endpoints.
//!
//! Role and ownership checks live in the application handlers; these routes
//! only require a bearer token.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::catalog::handlers::parse_course_id;
use crate::adapters::http::catalog::CourseResponse;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{CreateCourseCommand, GetEnrolledUsersQuery, RoleUpgrade};
use crate::domain::course::NewCourse;

use super::dto::{
    DashboardResponse, EducatorCourseResponse, EducatorCoursesResponse, EnrollmentResponse,
    EnrollmentsResponse, RoleUpgradeResponse, StudentResponse, StudentsResponse,
};

/// GET /api/educator/courses - The caller's own courses
pub async fn list_educator_courses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.list_educator_courses_handler().handle(&user).await?;

    Ok(Json(EducatorCoursesResponse {
        courses: courses
            .into_iter()
            .map(EducatorCourseResponse::from)
            .collect(),
    }))
}

/// POST /api/educator/courses - Create a course
pub async fn create_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<NewCourse>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateCourseCommand {
        requester: user,
        input,
    };

    let course = state.create_course_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// GET /api/educator/courses/:id/students - Students of an owned course
pub async fn list_course_students(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetEnrolledUsersQuery {
        course_id: parse_course_id(&course_id)?,
        requester: user.id,
    };

    let students = state.get_enrolled_users_handler().handle(query).await?;

    Ok(Json(StudentsResponse {
        students: students.into_iter().map(StudentResponse::from).collect(),
    }))
}

/// GET /api/educator/dashboard - Earnings and student totals
pub async fn educator_dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state.educator_dashboard_handler().handle(&user).await?;
    Ok(Json(DashboardResponse::from(dashboard)))
}

/// GET /api/educator/enrolled-students - Students across all owned courses
pub async fn list_enrolled_students(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let enrollments = state.list_educator_students_handler().handle(&user).await?;

    Ok(Json(EnrollmentsResponse {
        enrollments: enrollments
            .into_iter()
            .map(EnrollmentResponse::from)
            .collect(),
    }))
}

/// POST /api/educator/update-role - Ask the identity provider for the
/// educator role
pub async fn update_role(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.become_educator_handler().handle(&user).await?;

    let code = match status {
        RoleUpgrade::Requested => StatusCode::ACCEPTED,
        RoleUpgrade::AlreadyEducator => StatusCode::OK,
    };
    Ok((code, Json(RoleUpgradeResponse { status })))
}
