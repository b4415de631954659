//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod catalog;
pub mod educator;
pub mod enrollment;
pub mod reconciliation;

pub use catalog::{
    CreateCourseCommand, CreateCourseHandler, EducatorCourse, GetCourseHandler, GetCourseQuery,
    ListEducatorCoursesHandler, ListPublishedCoursesHandler,
};
pub use educator::{
    BecomeEducatorHandler, EducatorDashboard, GetEducatorDashboardHandler,
    ListEducatorStudentsHandler, RoleUpgrade,
};
pub use enrollment::{
    CheckoutRedirects, GetEnrolledCoursesHandler, GetEnrolledCoursesQuery,
    GetEnrolledCoursesResult, GetEnrolledUsersHandler, GetEnrolledUsersQuery,
    GetEnrolledUsersResult, GetUserDataHandler, GetUserDataQuery, PurchaseCourseCommand,
    PurchaseCourseHandler, PurchaseCourseResult,
};
pub use reconciliation::{
    HandleIdentityEventCommand, HandleIdentityEventHandler, HandlePaymentEventCommand,
    HandlePaymentEventHandler, IdentityEventOutcome, PaymentEventOutcome,
};
