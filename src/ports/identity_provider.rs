//! Identity provider port for writes back to the provider.
//!
//! The provider owns user records. Changes requested through this port are
//! not applied locally; they return as signed `user.updated` identity events
//! and are mirrored from there.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, UserRole};

/// Port for identity provider management calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sets the user's marketplace role in the provider's public metadata.
    async fn set_role(&self, user_id: &UserId, role: UserRole)
        -> Result<(), IdentityProviderError>;
}

/// Errors from identity provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityProviderError {
    #[error("User not found at identity provider: {0}")]
    UserNotFound(String),

    #[error("Identity provider rejected the API key")]
    Unauthorized,

    #[error("Identity provider unreachable: {0}")]
    Unavailable(String),

    #[error("Identity provider error: {0}")]
    Provider(String),
}

impl IdentityProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, IdentityProviderError::Unavailable(_))
    }
}

impl From<IdentityProviderError> for DomainError {
    fn from(err: IdentityProviderError) -> Self {
        let code = match err {
            IdentityProviderError::UserNotFound(_) => ErrorCode::UserNotFound,
            _ => ErrorCode::IdentityProviderFailed,
        };
        DomainError::new(code, err.to_string())
    }
}
