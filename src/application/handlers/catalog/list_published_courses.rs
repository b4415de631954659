//! ListPublishedCoursesHandler - Query handler for the public catalog.

use std::sync::Arc;

use crate::domain::course::Course;
use crate::domain::foundation::DomainError;
use crate::ports::CourseRepository;

/// Handler for the public course listing.
///
/// Wire it with the catalog cache; lecture URLs are redacted except free
/// previews.
pub struct ListPublishedCoursesHandler {
    courses: Arc<dyn CourseRepository>,
}

impl ListPublishedCoursesHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self) -> Result<Vec<Course>, DomainError> {
        let mut courses = self.courses.list_published().await?;
        courses.iter_mut().for_each(Course::redact_locked_lectures);
        Ok(courses)
    }
}
