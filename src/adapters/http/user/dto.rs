//! HTTP DTOs for learner endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::catalog::CourseResponse;
use crate::domain::foundation::{CourseId, Timestamp, UserId, UserRole};
use crate::domain::user::User;
use crate::ports::EnrolledCourse;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to buy a course.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    pub course_id: CourseId,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// The caller's local user record.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub role: UserRole,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image_url: user.image_url,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// An enrolled course with full lecture links.
#[derive(Debug, Clone, Serialize)]
pub struct EnrolledCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub enrolled_at: Timestamp,
}

impl From<EnrolledCourse> for EnrolledCourseResponse {
    fn from(enrolled: EnrolledCourse) -> Self {
        Self {
            course: CourseResponse::from(enrolled.course),
            enrolled_at: enrolled.enrolled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrolledCoursesResponse {
    pub courses: Vec<EnrolledCourseResponse>,
}

/// Hosted checkout page for a started purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseResponse {
    pub session_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserProfile;

    #[test]
    fn purchase_request_parses_course_id() {
        let id = CourseId::new();
        let json = format!(r#"{{"course_id":"{}"}}"#, id);

        let request: PurchaseRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request.course_id, id);
    }

    #[test]
    fn purchase_request_rejects_non_uuid() {
        let result = serde_json::from_str::<PurchaseRequest>(r#"{"course_id":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn user_response_hides_internal_fields() {
        let user = User::from_profile(
            UserId::new("user_1").unwrap(),
            UserProfile {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                image_url: None,
                role: UserRole::Educator,
            },
            None,
        );

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["role"], "educator");
        assert!(json.get("deleted").is_none());
        assert!(json.get("source_updated_at").is_none());
    }
}
