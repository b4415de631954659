//! GetEnrolledUsersHandler - Query handler for a course's students.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId};
use crate::ports::{CourseRepository, EnrolledUser, EnrollmentReader};

/// Query for the students of one course.
#[derive(Debug, Clone)]
pub struct GetEnrolledUsersQuery {
    pub course_id: CourseId,
    /// Caller; must own the course.
    pub requester: UserId,
}

pub type GetEnrolledUsersResult = Vec<EnrolledUser>;

/// Handler for listing a course's enrolled users.
///
/// Only the owning educator may read the list.
pub struct GetEnrolledUsersHandler {
    courses: Arc<dyn CourseRepository>,
    reader: Arc<dyn EnrollmentReader>,
}

impl GetEnrolledUsersHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { courses, reader }
    }

    pub async fn handle(
        &self,
        query: GetEnrolledUsersQuery,
    ) -> Result<GetEnrolledUsersResult, DomainError> {
        let course = self
            .courses
            .find_by_id(&query.course_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CourseNotFound, "Course not found")
                    .with_detail("course_id", query.course_id.to_string())
            })?;

        course.ensure_owner(&query.requester)?;

        self.reader.users_for_course(&course.id).await
    }
}
