//! HTTP DTOs for the public course catalog.
//!
//! Course bodies are shared by the learner and educator routes, which embed
//! `CourseResponse` in their own responses.

use serde::Serialize;

use crate::domain::course::{Chapter, Course};
use crate::domain::foundation::{CourseId, Timestamp, UserId};

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A course as rendered to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub id: CourseId,
    pub educator_id: UserId,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// List price in minor units.
    pub price_cents: i64,
    pub discount_percent: u8,
    /// Amount charged at checkout.
    pub effective_price_cents: i64,
    pub published: bool,
    pub duration_minutes: u64,
    pub lecture_count: usize,
    pub content: Vec<Chapter>,
    pub created_at: Timestamp,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            effective_price_cents: course.effective_price_cents(),
            duration_minutes: course.duration_minutes(),
            lecture_count: course.lecture_count(),
            discount_percent: course.discount.percent(),
            id: course.id,
            educator_id: course.educator_id,
            title: course.title,
            description: course.description,
            thumbnail_url: course.thumbnail_url,
            price_cents: course.price_cents,
            published: course.published,
            content: course.content,
            created_at: course.created_at,
        }
    }
}

/// Published course listing.
#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

impl From<Vec<Course>> for CourseListResponse {
    fn from(courses: Vec<Course>) -> Self {
        Self {
            courses: courses.into_iter().map(CourseResponse::from).collect(),
        }
    }
}
