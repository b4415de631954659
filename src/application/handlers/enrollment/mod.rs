//! Enrollment command and query handlers.
//!
//! Enrollment is never stored; it is read from completed purchases.

mod get_enrolled_courses;
mod get_enrolled_users;
mod get_user_data;
mod purchase_course;

#[cfg(test)]
pub(crate) mod fixtures;

pub use get_enrolled_courses::{
    GetEnrolledCoursesHandler, GetEnrolledCoursesQuery, GetEnrolledCoursesResult,
};
pub use get_enrolled_users::{
    GetEnrolledUsersHandler, GetEnrolledUsersQuery, GetEnrolledUsersResult,
};
pub use get_user_data::{GetUserDataHandler, GetUserDataQuery};
pub use purchase_course::{
    CheckoutRedirects, PurchaseCourseCommand, PurchaseCourseHandler, PurchaseCourseResult,
};
