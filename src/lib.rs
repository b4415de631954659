//! Course Marketplace - Backend for selling and taking online courses
//!
//! Educators publish courses, learners buy them through a hosted checkout,
//! and enrollment follows from signed payment webhooks. Users are mirrored
//! from the identity provider through signed identity webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
