//! Mock session validator for testing.
//!
//! Implements the `SessionValidator` port without an identity provider, so
//! handlers and HTTP routes can be exercised with fixed bearer tokens.
//!
//! # Example
//!
//! ```ignore
//! use course_marketplace::adapters::auth::MockSessionValidator;
//! use course_marketplace::domain::foundation::UserRole;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("learner-token", "user_learner", UserRole::Learner);
//!
//! let user = validator.validate("learner-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

#[derive(Debug, Default)]
struct MockState {
    tokens: HashMap<String, AuthenticatedUser>,
    force_error: Option<AuthError>,
}

/// Mock session validator.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    state: RwLock<MockState>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MockState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a user with the given id and role.
    ///
    /// An empty `user_id` is ignored; the token stays invalid.
    pub fn with_test_user(
        self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        role: UserRole,
    ) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_user(token, AuthenticatedUser::new(id, role)),
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        self.write().force_error = Some(error);
        self
    }

    pub fn clear_error(&self) {
        self.write().force_error = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.write().tokens.insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.write().tokens.remove(token);
    }

    pub fn token_count(&self) -> usize {
        self.read().tokens.len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let state = self.read();
        if let Some(error) = state.force_error.clone() {
            return Err(error);
        }

        state
            .tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
