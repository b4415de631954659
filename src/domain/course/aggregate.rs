//! Course aggregate entity.

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};

use super::{Chapter, Discount, MAX_PRICE_CENTS};

/// Educator input for a new course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub discount_percent: u8,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub content: Vec<Chapter>,
}

/// A course offered by an educator.
///
/// # Invariants
///
/// - `price_cents >= 0`
/// - only `educator_id` may mutate the course or list its students
/// - enrollment count is never stored here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub educator_id: UserId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub price_cents: i64,
    pub discount: Discount,
    pub published: bool,
    pub content: Vec<Chapter>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    /// Creates a course owned by `educator_id`.
    ///
    /// # Errors
    ///
    /// Validation errors for an empty title, a price outside
    /// `0..=MAX_PRICE_CENTS`, an out of range discount or malformed content.
    pub fn create(educator_id: UserId, input: NewCourse) -> Result<Self, ValidationError> {
        if input.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if !(0..=MAX_PRICE_CENTS).contains(&input.price_cents) {
            return Err(ValidationError::out_of_range(
                "price_cents",
                0,
                MAX_PRICE_CENTS,
                input.price_cents,
            ));
        }
        let discount = Discount::try_new(input.discount_percent)?;
        for chapter in &input.content {
            chapter.validate()?;
        }

        let now = Timestamp::now();
        Ok(Self {
            id: CourseId::new(),
            educator_id,
            title: input.title.trim().to_string(),
            description: input.description,
            thumbnail_url: input.thumbnail_url,
            price_cents: input.price_cents,
            discount,
            published: input.published,
            content: input.content,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.educator_id == user_id
    }

    /// Fails with `Forbidden` unless `user_id` owns the course.
    pub fn ensure_owner(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the course owner can perform this action",
            )
            .with_detail("course_id", self.id.to_string()))
        }
    }

    /// Amount charged at checkout.
    pub fn effective_price_cents(&self) -> i64 {
        self.discount.apply(self.price_cents)
    }

    /// Total running time in minutes.
    pub fn duration_minutes(&self) -> u64 {
        self.content.iter().map(Chapter::duration_minutes).sum()
    }

    pub fn lecture_count(&self) -> usize {
        self.content.iter().map(|c| c.lectures.len()).sum()
    }

    /// Clears lecture URLs except free previews. Used for public views.
    pub fn redact_locked_lectures(&mut self) {
        self.content
            .iter_mut()
            .flat_map(|chapter| chapter.lectures.iter_mut())
            .filter(|lecture| !lecture.is_preview_free)
            .for_each(|lecture| lecture.url.clear());
    }
}
