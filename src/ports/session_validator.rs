//! Session validation port for bearer token validation.
//!
//! Provider-agnostic: the Clerk adapter and the test mock implement it.
//!
//! Implementations MUST validate issuer, expiry and signature. Audience is
//! validated when the deployment configures one.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed or badly signed tokens
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient failures (JWKS fetch)
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a raw token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UserId, UserRole};
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_works_behind_dyn() {
        let mut tokens = HashMap::new();
        tokens.insert(
            "valid".to_string(),
            AuthenticatedUser::new(UserId::new("user_1").unwrap(), UserRole::Educator),
        );
        let validator: Box<dyn SessionValidator> = Box::new(TestSessionValidator {
            tokens: RwLock::new(tokens),
        });

        let user = validator.validate("valid").await.unwrap();
        assert_eq!(user.id.as_str(), "user_1");
        assert!(matches!(
            validator.validate("other").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
