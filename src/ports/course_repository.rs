//! Course repository port.

use async_trait::async_trait;

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError, UserId};

/// Repository port for Course persistence.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Inserts or updates a course.
    async fn save(&self, course: &Course) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// Published courses, newest first.
    async fn list_published(&self) -> Result<Vec<Course>, DomainError>;

    /// Courses owned by an educator, newest first.
    async fn list_by_educator(&self, educator_id: &UserId) -> Result<Vec<Course>, DomainError>;
}
