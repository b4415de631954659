//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers and error types that form the vocabulary
//! of the marketplace domain.

mod auth;
mod errors;
mod ids;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CourseId, PurchaseId, TransactionRef, UserId};
pub use role::UserRole;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
