//! Seed helpers shared by the enrollment handler tests.

use crate::adapters::memory::InMemoryMarketplaceStore;
use crate::domain::course::{Course, NewCourse};
use crate::domain::foundation::{CourseId, PurchaseId, Timestamp, TransactionRef, UserId, UserRole};
use crate::domain::purchase::{Purchase, PurchaseStatus};
use crate::domain::user::{User, UserProfile};
use crate::ports::{CourseRepository, PurchaseRepository, UserRepository};

pub async fn seed_user(store: &InMemoryMarketplaceStore, id: &str, role: UserRole) -> User {
    let user = User::from_profile(
        UserId::new(id).unwrap(),
        UserProfile {
            name: id.to_string(),
            email: format!("{}@example.com", id),
            image_url: None,
            role,
        },
        None,
    );
    UserRepository::upsert(store, &user).await.unwrap();
    user
}

pub async fn seed_course(store: &InMemoryMarketplaceStore, educator: &str, title: &str) -> Course {
    let course = Course::create(
        UserId::new(educator).unwrap(),
        NewCourse {
            title: title.to_string(),
            description: String::new(),
            thumbnail_url: None,
            price_cents: 5_000,
            discount_percent: 0,
            published: true,
            content: vec![],
        },
    )
    .unwrap();
    CourseRepository::save(store, &course).await.unwrap();
    course
}

/// Records a purchase and settles it to `status` at `settled_at` seconds.
pub async fn seed_purchase(
    store: &InMemoryMarketplaceStore,
    user: &UserId,
    course: &CourseId,
    status: PurchaseStatus,
    settled_at: i64,
) -> Purchase {
    let id = PurchaseId::new();
    let purchase = Purchase::create_pending(
        id,
        user.clone(),
        *course,
        5_000,
        TransactionRef::new(format!("cs_{}", id)).unwrap(),
    )
    .unwrap();
    PurchaseRepository::save(store, &purchase).await.unwrap();

    if status != PurchaseStatus::Pending {
        let at = Timestamp::from_unix_secs(settled_at).unwrap();
        let update = purchase.settle(status, at).unwrap();
        PurchaseRepository::update_if_status(store, &id, PurchaseStatus::Pending, status, update)
            .await
            .unwrap();
    }
    purchase
}
