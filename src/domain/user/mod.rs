//! User module.
//!
//! Users are owned by the identity provider and mirrored locally through
//! signed lifecycle events. Enrollment is not stored on the user.

mod aggregate;

pub use aggregate::{ProfileChange, User, UserProfile};
