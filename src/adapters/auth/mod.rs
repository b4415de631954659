//! Identity provider adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `clerk` - Clerk session tokens verified against the instance JWKS
//! - `mock` - Test implementation that doesn't require external services
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `clerk_backend` - role changes through the Clerk Backend API
//! - `mock_identity_provider` - records role changes in memory

mod clerk;
mod clerk_backend;
mod mock;
mod mock_identity_provider;

pub use clerk::{ClerkConfig, ClerkSessionValidator};
pub use clerk_backend::{ClerkBackendConfig, ClerkIdentityProvider};
pub use mock::MockSessionValidator;
pub use mock_identity_provider::MockIdentityProvider;
