//! Course catalog handlers: public browsing and educator course management.

mod create_course;
mod get_course;
mod list_educator_courses;
mod list_published_courses;

pub use create_course::{CreateCourseCommand, CreateCourseHandler};
pub use get_course::{GetCourseHandler, GetCourseQuery};
pub use list_educator_courses::{EducatorCourse, ListEducatorCoursesHandler};
pub use list_published_courses::ListPublishedCoursesHandler;
