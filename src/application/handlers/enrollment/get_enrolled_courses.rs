//! GetEnrolledCoursesHandler - Query handler for a learner's courses.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{EnrolledCourse, EnrollmentReader};

/// Query for the caller's enrolled courses.
#[derive(Debug, Clone)]
pub struct GetEnrolledCoursesQuery {
    pub user_id: UserId,
}

/// Courses with a completed purchase, newest enrollment first.
pub type GetEnrolledCoursesResult = Vec<EnrolledCourse>;

/// Handler for listing enrolled courses. Reads bypass the catalog cache.
pub struct GetEnrolledCoursesHandler {
    reader: Arc<dyn EnrollmentReader>,
}

impl GetEnrolledCoursesHandler {
    pub fn new(reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetEnrolledCoursesQuery,
    ) -> Result<GetEnrolledCoursesResult, DomainError> {
        self.reader.courses_for_user(&query.user_id).await
    }
}
