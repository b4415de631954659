//! GetUserDataHandler - Query handler for the caller's own record.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetUserDataQuery {
    pub user_id: UserId,
}

/// Handler returning the mirrored user record.
///
/// A user who signed in before the identity webhook arrived, or who was
/// deleted upstream, is reported as not found.
pub struct GetUserDataHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserDataHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserDataQuery) -> Result<User, DomainError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .filter(|user| !user.deleted)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UserNotFound, "User not found")
                    .with_detail("user_id", query.user_id.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMarketplaceStore;
    use crate::application::handlers::enrollment::fixtures::seed_user;
    use crate::domain::foundation::{Timestamp, UserRole};

    #[tokio::test]
    async fn returns_live_user() {
        let store = InMemoryMarketplaceStore::new();
        seed_user(&store, "user_1", UserRole::Educator).await;

        let user = GetUserDataHandler::new(Arc::new(store))
            .handle(GetUserDataQuery {
                user_id: UserId::new("user_1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Educator);
        assert_eq!(user.email, "user_1@example.com");
    }

    #[tokio::test]
    async fn deleted_user_is_not_found() {
        let store = InMemoryMarketplaceStore::new();
        let mut user = seed_user(&store, "user_1", UserRole::Learner).await;
        user.mark_deleted(Timestamp::now());
        UserRepository::upsert(&store, &user).await.unwrap();

        let err = GetUserDataHandler::new(Arc::new(store))
            .handle(GetUserDataQuery { user_id: user.id })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let err = GetUserDataHandler::new(Arc::new(InMemoryMarketplaceStore::new()))
            .handle(GetUserDataQuery {
                user_id: UserId::new("user_missing").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
