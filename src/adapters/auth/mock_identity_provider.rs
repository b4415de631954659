//! Mock identity provider for testing.
//!
//! Records role changes instead of calling the provider and can be told to
//! fail the next call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::{UserId, UserRole};
use crate::ports::{IdentityProvider, IdentityProviderError};

/// Mock identity provider.
#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_error: Option<IdentityProviderError>,
    role_changes: Vec<(UserId, UserRole)>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the next `set_role` call with `error`.
    pub fn set_error(&self, error: IdentityProviderError) {
        self.state().next_error = Some(error);
    }

    /// Role changes requested so far, in order.
    pub fn role_changes(&self) -> Vec<(UserId, UserRole)> {
        self.state().role_changes.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn set_role(
        &self,
        user_id: &UserId,
        role: UserRole,
    ) -> Result<(), IdentityProviderError> {
        let mut state = self.state();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        state.role_changes.push((user_id.clone(), role));
        Ok(())
    }
}
