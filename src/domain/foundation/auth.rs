//! Authentication types for the domain layer.
//!
//! These types represent a caller whose bearer token was verified by the
//! identity provider. They carry **no provider dependencies**; any adapter
//! behind the `SessionValidator` port can populate them.

use super::{UserId, UserRole};
use thiserror::Error;

/// Authenticated user extracted from a validated identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable identifier from the identity provider.
    pub id: UserId,

    /// Role claim carried by the token.
    pub role: UserRole,

    /// Session identifier (`sid` claim) when the provider issues one.
    pub session_id: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self {
            id,
            role,
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn is_educator(&self) -> bool {
        self.role.is_educator()
    }
}

/// Authentication errors that can occur during token validation.
///
/// Domain-centric: they describe what went wrong for the application,
/// not for the identity provider.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No bearer credential was presented.
    #[error("Authentication required")]
    Unauthenticated,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Caller is authenticated but lacks the role for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The identity provider could not be reached (JWKS fetch, config).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthenticated | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
