//! GetCourseHandler - Query handler for one public course.

use std::sync::Arc;

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError, ErrorCode};
use crate::ports::CourseRepository;

#[derive(Debug, Clone)]
pub struct GetCourseQuery {
    pub course_id: CourseId,
}

/// Handler for a single course page.
///
/// Drafts are hidden from the public and reported as not found.
pub struct GetCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl GetCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, query: GetCourseQuery) -> Result<Course, DomainError> {
        let mut course = self
            .courses
            .find_by_id(&query.course_id)
            .await?
            .filter(|course| course.published)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CourseNotFound, "Course not found")
                    .with_detail("course_id", query.course_id.to_string())
            })?;
        course.redact_locked_lectures();
        Ok(course)
    }
}
