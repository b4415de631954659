//! GetEducatorDashboardHandler - Query handler for an educator's totals.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{CourseRepository, EnrollmentReader};

/// Totals across the caller's courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducatorDashboard {
    pub total_courses: usize,
    /// Sum over completed purchases of owned courses.
    pub total_earnings_cents: i64,
    pub completed_purchases: u64,
    /// Distinct students enrolled in at least one owned course.
    pub enrolled_students: usize,
}

/// Handler for the educator dashboard.
pub struct GetEducatorDashboardHandler {
    courses: Arc<dyn CourseRepository>,
    reader: Arc<dyn EnrollmentReader>,
}

impl GetEducatorDashboardHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { courses, reader }
    }

    pub async fn handle(
        &self,
        requester: &AuthenticatedUser,
    ) -> Result<EducatorDashboard, DomainError> {
        if !requester.is_educator() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only educators have a dashboard",
            ));
        }

        let total_courses = self.courses.list_by_educator(&requester.id).await?.len();
        let earnings = self.reader.earnings_for_educator(&requester.id).await?;
        let enrolled_students = self
            .reader
            .enrollments_for_educator(&requester.id)
            .await?
            .into_iter()
            .map(|enrollment| enrollment.user.id)
            .collect::<HashSet<_>>()
            .len();

        Ok(EducatorDashboard {
            total_courses,
            total_earnings_cents: earnings.total_cents,
            completed_purchases: earnings.completed_purchases,
            enrolled_students,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMarketplaceStore;
    use crate::application::handlers::enrollment::fixtures::{seed_course, seed_purchase, seed_user};
    use crate::domain::foundation::{UserId, UserRole};
    use crate::domain::purchase::PurchaseStatus;

    fn handler(store: &InMemoryMarketplaceStore) -> GetEducatorDashboardHandler {
        GetEducatorDashboardHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn educator() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_e").unwrap(), UserRole::Educator)
    }

    #[tokio::test]
    async fn totals_follow_completed_purchases() {
        let store = InMemoryMarketplaceStore::new();
        let alice = seed_user(&store, "user_alice", UserRole::Learner).await;
        let bob = seed_user(&store, "user_bob", UserRole::Learner).await;
        let rust = seed_course(&store, "user_e", "Rust").await;
        let sql = seed_course(&store, "user_e", "SQL").await;
        let theirs = seed_course(&store, "user_other", "Theirs").await;
        seed_purchase(&store, &alice.id, &rust.id, PurchaseStatus::Completed, 100).await;
        seed_purchase(&store, &alice.id, &sql.id, PurchaseStatus::Completed, 200).await;
        seed_purchase(&store, &bob.id, &rust.id, PurchaseStatus::Pending, 0).await;
        seed_purchase(&store, &bob.id, &sql.id, PurchaseStatus::Failed, 300).await;
        seed_purchase(&store, &bob.id, &theirs.id, PurchaseStatus::Completed, 400).await;

        let dashboard = handler(&store).handle(&educator()).await.unwrap();

        assert_eq!(
            dashboard,
            EducatorDashboard {
                total_courses: 2,
                total_earnings_cents: 10_000,
                completed_purchases: 2,
                enrolled_students: 1,
            }
        );
    }

    #[tokio::test]
    async fn new_educator_starts_at_zero() {
        let store = InMemoryMarketplaceStore::new();

        let dashboard = handler(&store).handle(&educator()).await.unwrap();

        assert_eq!(dashboard.total_courses, 0);
        assert_eq!(dashboard.total_earnings_cents, 0);
        assert_eq!(dashboard.enrolled_students, 0);
    }

    #[tokio::test]
    async fn learner_is_forbidden() {
        let store = InMemoryMarketplaceStore::new();
        let learner = AuthenticatedUser::new(UserId::new("user_l").unwrap(), UserRole::Learner);

        let err = handler(&store).handle(&learner).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
