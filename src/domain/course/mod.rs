//! Course domain module.
//!
//! - `aggregate` - Course aggregate and educator input
//! - `content` - chapter and lecture tree with duration helpers
//! - `pricing` - discount arithmetic in cents

mod aggregate;
mod content;
mod pricing;

pub use aggregate::{Course, NewCourse};
pub use content::{Chapter, Lecture, MAX_LECTURE_MINUTES};
pub use pricing::{Discount, MAX_PRICE_CENTS};
