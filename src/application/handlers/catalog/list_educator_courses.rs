//! ListEducatorCoursesHandler - Query handler for an educator's dashboard.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::course::Course;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{CourseRepository, EnrollmentReader};

/// An owned course with its current student count.
#[derive(Debug, Clone, Serialize)]
pub struct EducatorCourse {
    #[serde(flatten)]
    pub course: Course,
    pub student_count: usize,
}

/// Handler listing the caller's own courses, drafts included.
pub struct ListEducatorCoursesHandler {
    courses: Arc<dyn CourseRepository>,
    reader: Arc<dyn EnrollmentReader>,
}

impl ListEducatorCoursesHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { courses, reader }
    }

    pub async fn handle(
        &self,
        requester: &AuthenticatedUser,
    ) -> Result<Vec<EducatorCourse>, DomainError> {
        if !requester.is_educator() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only educators have a course dashboard",
            ));
        }

        let courses = self.courses.list_by_educator(&requester.id).await?;
        let mut result = Vec::with_capacity(courses.len());
        for course in courses {
            let student_count = self.reader.users_for_course(&course.id).await?.len();
            result.push(EducatorCourse {
                course,
                student_count,
            });
        }
        Ok(result)
    }
}
