//! BecomeEducatorHandler - Command handler for the educator role upgrade.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UserRole};
use crate::ports::IdentityProvider;

/// Outcome of a role upgrade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleUpgrade {
    /// The provider accepted the change; the local user follows on the next
    /// `user.updated` identity event.
    Requested,
    AlreadyEducator,
}

/// Asks the identity provider to make the caller an educator.
///
/// Nothing is written locally. The provider's `user.updated` event is the
/// only path by which the stored role changes.
pub struct BecomeEducatorHandler {
    provider: Arc<dyn IdentityProvider>,
}

impl BecomeEducatorHandler {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, requester: &AuthenticatedUser) -> Result<RoleUpgrade, DomainError> {
        if requester.is_educator() {
            return Ok(RoleUpgrade::AlreadyEducator);
        }

        self.provider
            .set_role(&requester.id, UserRole::Educator)
            .await?;

        tracing::info!(user_id = %requester.id, "Educator role requested");
        Ok(RoleUpgrade::Requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockIdentityProvider;
    use crate::domain::foundation::{ErrorCode, UserId};
    use crate::ports::IdentityProviderError;

    fn learner() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_l").unwrap(), UserRole::Learner)
    }

    #[tokio::test]
    async fn learner_upgrade_goes_to_provider() {
        let provider = MockIdentityProvider::new();

        let outcome = BecomeEducatorHandler::new(Arc::new(provider.clone()))
            .handle(&learner())
            .await
            .unwrap();

        assert_eq!(outcome, RoleUpgrade::Requested);
        assert_eq!(
            provider.role_changes(),
            vec![(UserId::new("user_l").unwrap(), UserRole::Educator)]
        );
    }

    #[tokio::test]
    async fn educator_is_left_alone() {
        let provider = MockIdentityProvider::new();
        let educator = AuthenticatedUser::new(UserId::new("user_e").unwrap(), UserRole::Educator);

        let outcome = BecomeEducatorHandler::new(Arc::new(provider.clone()))
            .handle(&educator)
            .await
            .unwrap();

        assert_eq!(outcome, RoleUpgrade::AlreadyEducator);
        assert!(provider.role_changes().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_surfaces() {
        let provider = MockIdentityProvider::new();
        provider.set_error(IdentityProviderError::Unavailable("timeout".to_string()));

        let err = BecomeEducatorHandler::new(Arc::new(provider))
            .handle(&learner())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::IdentityProviderFailed);
    }
}
