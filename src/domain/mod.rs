//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, roles, errors)
//! - `user` - Users mirrored from the identity provider
//! - `course` - Courses, content tree and pricing
//! - `purchase` - Purchase lifecycle and settlement
//! - `webhook` - Signature schemes and typed lifecycle events

pub mod course;
pub mod foundation;
pub mod purchase;
pub mod user;
pub mod webhook;
