//! HTTP handlers for learner endpoints.
//!
//! All routes here require a bearer token; the caller is always the subject.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    GetEnrolledCoursesQuery, GetUserDataQuery, PurchaseCourseCommand,
};

use super::dto::{
    EnrolledCourseResponse, EnrolledCoursesResponse, PurchaseRequest, PurchaseResponse,
    UserResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;

/// GET /api/user/data - The caller's user record
pub async fn get_user_data(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetUserDataQuery { user_id: user.id };

    let record = state.get_user_data_handler().handle(query).await?;

    Ok(Json(UserResponse::from(record)))
}

/// GET /api/user/enrolled-courses - Courses the caller has bought
pub async fn get_enrolled_courses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetEnrolledCoursesQuery { user_id: user.id };

    let enrolled = state.get_enrolled_courses_handler().handle(query).await?;

    Ok(Json(EnrolledCoursesResponse {
        courses: enrolled
            .into_iter()
            .map(EnrolledCourseResponse::from)
            .collect(),
    }))
}

/// POST /api/user/purchase - Start a hosted checkout
pub async fn purchase_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = PurchaseCourseCommand {
        user_id: user.id,
        course_id: request.course_id,
    };

    let result = state.purchase_course_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseResponse {
            session_url: result.session_url,
        }),
    ))
}
