//! Enrollment reader port (CQRS read side).
//!
//! Enrollment is derived: a `(user, course)` pair is enrolled iff a purchase
//! for it is completed. Readers query purchases directly and never cache.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError, Timestamp, UserId};
use crate::domain::user::User;

/// A course the user is enrolled in, with the enrollment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrolledCourse {
    pub course: Course,
    pub enrolled_at: Timestamp,
}

/// A user enrolled in a course, with the enrollment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrolledUser {
    pub user: User,
    pub enrolled_at: Timestamp,
}

/// One student's enrollment in one of an educator's courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducatorEnrollment {
    pub user: User,
    pub course_id: CourseId,
    pub course_title: String,
    pub enrolled_at: Timestamp,
}

/// Revenue collected by an educator's courses.
///
/// Summed over completed purchases, one term per purchase. A purchase
/// completes at most once, so redelivered payment events cannot inflate it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EducatorEarnings {
    pub total_cents: i64,
    pub completed_purchases: u64,
}

/// Read-only access to the derived enrollment relation.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// Courses the user is enrolled in, most recent enrollment first.
    /// Each course appears once.
    async fn courses_for_user(&self, user_id: &UserId) -> Result<Vec<EnrolledCourse>, DomainError>;

    /// Users enrolled in the course, most recent enrollment first.
    async fn users_for_course(&self, course_id: &CourseId) -> Result<Vec<EnrolledUser>, DomainError>;

    /// Every `(student, course)` enrollment across the educator's courses,
    /// most recent first. A pair appears once.
    async fn enrollments_for_educator(
        &self,
        educator_id: &UserId,
    ) -> Result<Vec<EducatorEnrollment>, DomainError>;

    /// Earnings over completed purchases of the educator's courses.
    async fn earnings_for_educator(
        &self,
        educator_id: &UserId,
    ) -> Result<EducatorEarnings, DomainError>;

    /// True if the user holds a completed purchase for the course.
    async fn is_enrolled(&self, user_id: &UserId, course_id: &CourseId) -> Result<bool, DomainError>;
}
