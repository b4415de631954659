//! CreateCourseHandler - Command handler for publishing a new course.

use std::sync::Arc;

use crate::domain::course::{Course, NewCourse};
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::CourseRepository;

/// Command to create a course owned by the caller.
#[derive(Debug, Clone)]
pub struct CreateCourseCommand {
    pub requester: AuthenticatedUser,
    pub input: NewCourse,
}

/// Handler for course creation. Educators only.
///
/// Saving through the catalog cache invalidates the public listing.
pub struct CreateCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl CreateCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: CreateCourseCommand) -> Result<Course, DomainError> {
        if !cmd.requester.is_educator() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only educators can create courses",
            ));
        }

        let course = Course::create(cmd.requester.id, cmd.input)?;
        self.courses.save(&course).await?;

        tracing::info!(
            course_id = %course.id,
            educator_id = %course.educator_id,
            published = course.published,
            "Course created"
        );
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMarketplaceStore;
    use crate::domain::foundation::{UserId, UserRole};

    fn input(title: &str) -> NewCourse {
        NewCourse {
            title: title.to_string(),
            description: "Ownership and borrowing".to_string(),
            thumbnail_url: None,
            price_cents: 4_900,
            discount_percent: 10,
            published: true,
            content: vec![],
        }
    }

    fn caller(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_e").unwrap(), role)
    }

    #[tokio::test]
    async fn educator_creates_owned_course() {
        let store = InMemoryMarketplaceStore::new();
        let handler = CreateCourseHandler::new(Arc::new(store.clone()));

        let course = handler
            .handle(CreateCourseCommand {
                requester: caller(UserRole::Educator),
                input: input("Rust 101"),
            })
            .await
            .unwrap();

        assert_eq!(course.educator_id.as_str(), "user_e");
        assert_eq!(
            store.find_by_id(&course.id).await.unwrap().map(|c| c.title),
            Some("Rust 101".to_string())
        );
    }

    #[tokio::test]
    async fn learner_is_forbidden() {
        let store = InMemoryMarketplaceStore::new();
        let handler = CreateCourseHandler::new(Arc::new(store.clone()));

        let err = handler
            .handle(CreateCourseCommand {
                requester: caller(UserRole::Learner),
                input: input("Rust 101"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected() {
        let handler = CreateCourseHandler::new(Arc::new(InMemoryMarketplaceStore::new()));

        let err = handler
            .handle(CreateCourseCommand {
                requester: caller(UserRole::Educator),
                input: input(""),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
