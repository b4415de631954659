//! In-memory marketplace store.
//!
//! Implements every store port over one lock, so the conditional purchase
//! update is atomic exactly as the SQL statement is. Useful for tests and
//! local development without PostgreSQL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::course::Course;
use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, PurchaseId, TransactionRef, UserId,
};
use crate::domain::purchase::{Purchase, PurchaseStatus, PurchaseUpdate};
use crate::domain::user::User;
use crate::ports::{
    CourseRepository, EducatorEarnings, EducatorEnrollment, EnrolledCourse, EnrolledUser,
    EnrollmentReader, PurchaseRepository, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    courses: HashMap<CourseId, Course>,
    purchases: HashMap<PurchaseId, Purchase>,
}

/// In-memory implementation of the store ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketplaceStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryMarketplaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with `DatabaseError` until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful mutating operations so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn purchase_count(&self) -> usize {
        self.tables.read().await.purchases.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "In-memory store marked unavailable",
            ));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for InMemoryMarketplaceStore {
    async fn upsert(&self, user: &User) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.users.get(&user.id) {
            if !user.may_replace(existing) {
                return Ok(false);
            }
        }

        tables.users.insert(user.id.clone(), user.clone());
        self.record_write();
        Ok(true)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.users.get(id).cloned())
    }
}

#[async_trait]
impl CourseRepository for InMemoryMarketplaceStore {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        self.check_available()?;
        self.tables
            .write()
            .await
            .courses
            .insert(course.id, course.clone());
        self.record_write();
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.courses.get(id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Course>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables
            .courses
            .values()
            .filter(|c| c.published)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }

    async fn list_by_educator(&self, educator_id: &UserId) -> Result<Vec<Course>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables
            .courses
            .values()
            .filter(|c| c.is_owned_by(educator_id))
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryMarketplaceStore {
    async fn save(&self, purchase: &Purchase) -> Result<(), DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if tables
            .purchases
            .values()
            .any(|p| p.transaction_ref == purchase.transaction_ref)
        {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Transaction reference already recorded",
            )
            .with_detail("transaction_ref", purchase.transaction_ref.to_string()));
        }

        tables.purchases.insert(purchase.id, purchase.clone());
        self.record_write();
        Ok(())
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.purchases.get(id).cloned())
    }

    async fn find_by_transaction_ref(
        &self,
        reference: &TransactionRef,
    ) -> Result<Option<Purchase>, DomainError> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .purchases
            .values()
            .find(|p| &p.transaction_ref == reference)
            .cloned())
    }

    async fn update_if_status(
        &self,
        id: &PurchaseId,
        expected: PurchaseStatus,
        new_status: PurchaseStatus,
        extra: PurchaseUpdate,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.purchases.get_mut(id) {
            Some(purchase) if purchase.status == expected => {
                purchase.apply(new_status, extra);
                self.record_write();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryMarketplaceStore {
    async fn courses_for_user(&self, user_id: &UserId) -> Result<Vec<EnrolledCourse>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;

        let mut latest: HashMap<CourseId, EnrolledCourse> = HashMap::new();
        for purchase in tables
            .purchases
            .values()
            .filter(|p| &p.user_id == user_id && p.status == PurchaseStatus::Completed)
        {
            let (Some(completed_at), Some(course)) =
                (purchase.completed_at, tables.courses.get(&purchase.course_id))
            else {
                continue;
            };
            let entry = latest.entry(course.id).or_insert_with(|| EnrolledCourse {
                course: course.clone(),
                enrolled_at: completed_at,
            });
            if entry.enrolled_at < completed_at {
                entry.enrolled_at = completed_at;
            }
        }

        let mut courses: Vec<EnrolledCourse> = latest.into_values().collect();
        courses.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(courses)
    }

    async fn users_for_course(&self, course_id: &CourseId) -> Result<Vec<EnrolledUser>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;

        let mut latest: HashMap<UserId, EnrolledUser> = HashMap::new();
        for purchase in tables
            .purchases
            .values()
            .filter(|p| &p.course_id == course_id && p.status == PurchaseStatus::Completed)
        {
            let (Some(completed_at), Some(user)) =
                (purchase.completed_at, tables.users.get(&purchase.user_id))
            else {
                continue;
            };
            let entry = latest
                .entry(user.id.clone())
                .or_insert_with(|| EnrolledUser {
                    user: user.clone(),
                    enrolled_at: completed_at,
                });
            if entry.enrolled_at < completed_at {
                entry.enrolled_at = completed_at;
            }
        }

        let mut users: Vec<EnrolledUser> = latest.into_values().collect();
        users.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(users)
    }

    async fn enrollments_for_educator(
        &self,
        educator_id: &UserId,
    ) -> Result<Vec<EducatorEnrollment>, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;

        let mut latest: HashMap<(UserId, CourseId), EducatorEnrollment> = HashMap::new();
        for purchase in tables
            .purchases
            .values()
            .filter(|p| p.status == PurchaseStatus::Completed)
        {
            let (Some(completed_at), Some(course), Some(user)) = (
                purchase.completed_at,
                tables.courses.get(&purchase.course_id),
                tables.users.get(&purchase.user_id),
            ) else {
                continue;
            };
            if &course.educator_id != educator_id {
                continue;
            }
            let entry = latest
                .entry((user.id.clone(), course.id))
                .or_insert_with(|| EducatorEnrollment {
                    user: user.clone(),
                    course_id: course.id,
                    course_title: course.title.clone(),
                    enrolled_at: completed_at,
                });
            if entry.enrolled_at < completed_at {
                entry.enrolled_at = completed_at;
            }
        }

        let mut enrollments: Vec<EducatorEnrollment> = latest.into_values().collect();
        enrollments.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(enrollments)
    }

    async fn earnings_for_educator(
        &self,
        educator_id: &UserId,
    ) -> Result<EducatorEarnings, DomainError> {
        self.check_available()?;
        let tables = self.tables.read().await;

        Ok(tables
            .purchases
            .values()
            .filter(|p| p.status == PurchaseStatus::Completed)
            .filter(|p| {
                tables
                    .courses
                    .get(&p.course_id)
                    .is_some_and(|course| &course.educator_id == educator_id)
            })
            .fold(EducatorEarnings::default(), |acc, p| EducatorEarnings {
                total_cents: acc.total_cents.saturating_add(p.amount_cents),
                completed_purchases: acc.completed_purchases + 1,
            }))
    }

    async fn is_enrolled(&self, user_id: &UserId, course_id: &CourseId) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.tables.read().await.purchases.values().any(|p| {
            &p.user_id == user_id && &p.course_id == course_id && p.status == PurchaseStatus::Completed
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::NewCourse;
    use crate::domain::foundation::{Timestamp, UserRole};
    use crate::domain::user::UserProfile;

    fn user(id: &str) -> User {
        User::from_profile(
            UserId::new(id).unwrap(),
            UserProfile {
                name: id.to_string(),
                email: format!("{}@example.com", id),
                image_url: None,
                role: UserRole::Learner,
            },
            None,
        )
    }

    fn course(title: &str) -> Course {
        Course::create(
            UserId::new("user_edu").unwrap(),
            NewCourse {
                title: title.to_string(),
                description: String::new(),
                thumbnail_url: None,
                price_cents: 1_000,
                discount_percent: 0,
                published: true,
                content: vec![],
            },
        )
        .unwrap()
    }

    async fn complete(store: &InMemoryMarketplaceStore, purchase: &Purchase, at: Timestamp) -> bool {
        let update = purchase.settle(PurchaseStatus::Completed, at).unwrap();
        store
            .update_if_status(&purchase.id, PurchaseStatus::Pending, PurchaseStatus::Completed, update)
            .await
            .unwrap()
    }

    fn pending(user: &str, course: &Course, reference: &str) -> Purchase {
        Purchase::create_pending(
            PurchaseId::new(),
            UserId::new(user).unwrap(),
            course.id,
            1_000,
            TransactionRef::new(reference).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn update_if_status_applies_once() {
        let store = InMemoryMarketplaceStore::new();
        let c = course("Rust");
        let purchase = pending("user_1", &c, "cs_1");
        PurchaseRepository::save(&store, &purchase).await.unwrap();

        assert!(complete(&store, &purchase, Timestamp::now()).await);
        assert!(!complete(&store, &purchase, Timestamp::now()).await);

        let stored = PurchaseRepository::find_by_id(&store, &purchase.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PurchaseStatus::Completed);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_transaction_ref() {
        let store = InMemoryMarketplaceStore::new();
        let c = course("Rust");
        PurchaseRepository::save(&store, &pending("user_1", &c, "cs_1"))
            .await
            .unwrap();

        let err = PurchaseRepository::save(&store, &pending("user_2", &c, "cs_1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn courses_for_user_are_distinct_and_newest_first() {
        let store = InMemoryMarketplaceStore::new();
        let first = course("First");
        let second = course("Second");
        CourseRepository::save(&store, &first).await.unwrap();
        CourseRepository::save(&store, &second).await.unwrap();

        let p1 = pending("user_1", &first, "cs_1");
        let p2 = pending("user_1", &second, "cs_2");
        let p3 = pending("user_1", &first, "cs_3");
        for p in [&p1, &p2, &p3] {
            PurchaseRepository::save(&store, p).await.unwrap();
        }
        complete(&store, &p1, Timestamp::from_unix_secs(100).unwrap()).await;
        complete(&store, &p2, Timestamp::from_unix_secs(200).unwrap()).await;
        complete(&store, &p3, Timestamp::from_unix_secs(300).unwrap()).await;

        let enrolled = store
            .courses_for_user(&UserId::new("user_1").unwrap())
            .await
            .unwrap();

        let titles: Vec<&str> = enrolled.iter().map(|e| e.course.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn pending_purchases_do_not_enroll() {
        let store = InMemoryMarketplaceStore::new();
        let c = course("Rust");
        CourseRepository::save(&store, &c).await.unwrap();
        store.upsert(&user("user_1")).await.unwrap();
        PurchaseRepository::save(&store, &pending("user_1", &c, "cs_1"))
            .await
            .unwrap();

        assert!(store.users_for_course(&c.id).await.unwrap().is_empty());
        assert!(!store
            .is_enrolled(&UserId::new("user_1").unwrap(), &c.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn upsert_skips_older_source_data() {
        let store = InMemoryMarketplaceStore::new();
        let mut newer = user("user_1");
        newer.source_updated_at = Timestamp::from_unix_secs(200);
        let mut older = user("user_1");
        older.source_updated_at = Timestamp::from_unix_secs(100);
        older.name = "Old".to_string();

        assert!(store.upsert(&newer).await.unwrap());
        assert!(!store.upsert(&older).await.unwrap());

        let stored = UserRepository::find_by_id(&store, &newer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "user_1");
    }

    #[tokio::test]
    async fn upsert_keeps_tombstone_against_replayed_profile() {
        let store = InMemoryMarketplaceStore::new();
        let mut profile = user("user_1");
        profile.source_updated_at = Timestamp::from_unix_secs(100);
        let mut tombstone = profile.clone();
        tombstone.mark_deleted(Timestamp::from_unix_secs(150).unwrap());

        assert!(store.upsert(&profile).await.unwrap());
        assert!(store.upsert(&tombstone).await.unwrap());
        assert!(!store.upsert(&profile).await.unwrap());

        let stored = UserRepository::find_by_id(&store, &profile.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.deleted);
    }

    #[tokio::test]
    async fn educator_earnings_sum_completed_purchases_once() {
        let store = InMemoryMarketplaceStore::new();
        let mine = course("Mine");
        let theirs = Course::create(
            UserId::new("user_other").unwrap(),
            NewCourse {
                title: "Theirs".to_string(),
                description: String::new(),
                thumbnail_url: None,
                price_cents: 9_000,
                discount_percent: 0,
                published: true,
                content: vec![],
            },
        )
        .unwrap();
        CourseRepository::save(&store, &mine).await.unwrap();
        CourseRepository::save(&store, &theirs).await.unwrap();

        let paid = pending("user_1", &mine, "cs_1");
        let open = pending("user_2", &mine, "cs_2");
        let elsewhere = pending("user_1", &theirs, "cs_3");
        for p in [&paid, &open, &elsewhere] {
            PurchaseRepository::save(&store, p).await.unwrap();
        }
        complete(&store, &paid, Timestamp::now()).await;
        // Redelivered completion loses the conditional update
        complete(&store, &paid, Timestamp::now()).await;
        complete(&store, &elsewhere, Timestamp::now()).await;

        let earnings = store
            .earnings_for_educator(&UserId::new("user_edu").unwrap())
            .await
            .unwrap();

        assert_eq!(
            earnings,
            EducatorEarnings {
                total_cents: 1_000,
                completed_purchases: 1
            }
        );
    }

    #[tokio::test]
    async fn educator_enrollments_are_distinct_pairs() {
        let store = InMemoryMarketplaceStore::new();
        let rust = course("Rust");
        let sql = course("SQL");
        CourseRepository::save(&store, &rust).await.unwrap();
        CourseRepository::save(&store, &sql).await.unwrap();
        store.upsert(&user("user_1")).await.unwrap();

        let p1 = pending("user_1", &rust, "cs_1");
        let p2 = pending("user_1", &rust, "cs_2");
        let p3 = pending("user_1", &sql, "cs_3");
        for p in [&p1, &p2, &p3] {
            PurchaseRepository::save(&store, p).await.unwrap();
        }
        complete(&store, &p1, Timestamp::from_unix_secs(100).unwrap()).await;
        complete(&store, &p2, Timestamp::from_unix_secs(300).unwrap()).await;
        complete(&store, &p3, Timestamp::from_unix_secs(200).unwrap()).await;

        let enrollments = store
            .enrollments_for_educator(&UserId::new("user_edu").unwrap())
            .await
            .unwrap();

        let rows: Vec<(&str, i64)> = enrollments
            .iter()
            .map(|e| (e.course_title.as_str(), e.enrolled_at.as_unix_secs()))
            .collect();
        assert_eq!(rows, vec![("Rust", 300), ("SQL", 200)]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryMarketplaceStore::new();
        store.set_unavailable(true);

        let err = CourseRepository::list_published(&store).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
