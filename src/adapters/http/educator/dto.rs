//! HTTP DTOs for educator endpoints.

use serde::Serialize;

use crate::adapters::http::catalog::CourseResponse;
use crate::adapters::http::user::UserResponse;
use crate::application::handlers::{EducatorCourse, EducatorDashboard, RoleUpgrade};
use crate::domain::foundation::{CourseId, Timestamp};
use crate::ports::{EducatorEnrollment, EnrolledUser};

/// An owned course with its student count.
#[derive(Debug, Clone, Serialize)]
pub struct EducatorCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub student_count: usize,
}

impl From<EducatorCourse> for EducatorCourseResponse {
    fn from(owned: EducatorCourse) -> Self {
        Self {
            course: CourseResponse::from(owned.course),
            student_count: owned.student_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EducatorCoursesResponse {
    pub courses: Vec<EducatorCourseResponse>,
}

/// One student of a course.
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub enrolled_at: Timestamp,
}

impl From<EnrolledUser> for StudentResponse {
    fn from(enrolled: EnrolledUser) -> Self {
        Self {
            user: UserResponse::from(enrolled.user),
            enrolled_at: enrolled.enrolled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentsResponse {
    pub students: Vec<StudentResponse>,
}

/// Earnings and headcount across the caller's courses.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub total_courses: usize,
    pub total_earnings_cents: i64,
    pub completed_purchases: u64,
    pub enrolled_students: usize,
}

impl From<EducatorDashboard> for DashboardResponse {
    fn from(dashboard: EducatorDashboard) -> Self {
        Self {
            total_courses: dashboard.total_courses,
            total_earnings_cents: dashboard.total_earnings_cents,
            completed_purchases: dashboard.completed_purchases,
            enrolled_students: dashboard.enrolled_students,
        }
    }
}

/// One student in one of the caller's courses.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResponse {
    pub student: UserResponse,
    pub course_id: CourseId,
    pub course_title: String,
    pub enrolled_at: Timestamp,
}

impl From<EducatorEnrollment> for EnrollmentResponse {
    fn from(enrollment: EducatorEnrollment) -> Self {
        Self {
            student: UserResponse::from(enrollment.user),
            course_id: enrollment.course_id,
            course_title: enrollment.course_title,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentsResponse {
    pub enrollments: Vec<EnrollmentResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleUpgradeResponse {
    pub status: RoleUpgrade,
}
