//! Educator handlers: earnings dashboard, student roster and the
//! learner-to-educator upgrade.

mod become_educator;
mod get_educator_dashboard;
mod list_educator_students;

pub use become_educator::{BecomeEducatorHandler, RoleUpgrade};
pub use get_educator_dashboard::{EducatorDashboard, GetEducatorDashboardHandler};
pub use list_educator_students::ListEducatorStudentsHandler;
