//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for User persistence.
///
/// Users are never hard-deleted; there is no delete operation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts or replaces the user keyed by id.
    ///
    /// Implementations skip the write and return `false` unless
    /// [`User::may_replace`] holds against the stored row. Deletion is an
    /// upsert of a tombstoned user.
    async fn upsert(&self, user: &User) -> Result<bool, DomainError>;

    /// Finds a user by id, including tombstoned users.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
