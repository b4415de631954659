//! ListEducatorStudentsHandler - Students across all of an educator's courses.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{EducatorEnrollment, EnrollmentReader};

/// Handler listing every enrollment in the caller's courses, newest first.
pub struct ListEducatorStudentsHandler {
    reader: Arc<dyn EnrollmentReader>,
}

impl ListEducatorStudentsHandler {
    pub fn new(reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        requester: &AuthenticatedUser,
    ) -> Result<Vec<EducatorEnrollment>, DomainError> {
        if !requester.is_educator() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only educators have enrolled students",
            ));
        }

        self.reader.enrollments_for_educator(&requester.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMarketplaceStore;
    use crate::application::handlers::enrollment::fixtures::{seed_course, seed_purchase, seed_user};
    use crate::domain::foundation::{UserId, UserRole};
    use crate::domain::purchase::PurchaseStatus;

    #[tokio::test]
    async fn lists_students_with_course_titles() {
        let store = InMemoryMarketplaceStore::new();
        let alice = seed_user(&store, "user_alice", UserRole::Learner).await;
        let bob = seed_user(&store, "user_bob", UserRole::Learner).await;
        let rust = seed_course(&store, "user_e", "Rust").await;
        let sql = seed_course(&store, "user_e", "SQL").await;
        seed_purchase(&store, &alice.id, &rust.id, PurchaseStatus::Completed, 100).await;
        seed_purchase(&store, &bob.id, &sql.id, PurchaseStatus::Completed, 200).await;
        seed_purchase(&store, &bob.id, &rust.id, PurchaseStatus::Pending, 0).await;

        let educator = AuthenticatedUser::new(UserId::new("user_e").unwrap(), UserRole::Educator);
        let students = ListEducatorStudentsHandler::new(Arc::new(store))
            .handle(&educator)
            .await
            .unwrap();

        let rows: Vec<(&str, &str)> = students
            .iter()
            .map(|s| (s.user.id.as_str(), s.course_title.as_str()))
            .collect();
        assert_eq!(rows, vec![("user_bob", "SQL"), ("user_alice", "Rust")]);
    }

    #[tokio::test]
    async fn learner_is_forbidden() {
        let learner = AuthenticatedUser::new(UserId::new("user_l").unwrap(), UserRole::Learner);

        let err = ListEducatorStudentsHandler::new(Arc::new(InMemoryMarketplaceStore::new()))
            .handle(&learner)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
