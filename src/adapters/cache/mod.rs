//! Read-through caches layered over repository ports.

mod course_catalog;

pub use course_catalog::CourseCatalogCache;
