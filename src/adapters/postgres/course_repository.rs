//! PostgreSQL implementation of CourseRepository.
//!
//! Chapters and lectures live in a JSONB column; they are always read and
//! written with the course.

use crate::domain::course::{Chapter, Course, Discount};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::CourseRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, db_error};

const EDUCATOR_FK: &str = "courses_educator_id_fkey";

/// PostgreSQL implementation of the CourseRepository port.
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a course.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct CourseRow {
    pub id: Uuid,
    pub educator_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub price_cents: i64,
    pub discount_percent: i16,
    pub published: bool,
    pub content: Json<Vec<Chapter>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = DomainError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let percent = u8::try_from(row.discount_percent).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid discount value: {}", row.discount_percent),
            )
        })?;

        Ok(Course {
            id: CourseId::from_uuid(row.id),
            educator_id: UserId::new(row.educator_id).map_err(corrupt_row)?,
            title: row.title,
            description: row.description,
            thumbnail_url: row.thumbnail_url,
            price_cents: row.price_cents,
            discount: Discount::try_new(percent).map_err(corrupt_row)?,
            published: row.published,
            content: row.content.0,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) const COURSE_COLUMNS: &str = "c.id, c.educator_id, c.title, c.description, \
     c.thumbnail_url, c.price_cents, c.discount_percent, c.published, c.content, \
     c.created_at, c.updated_at";

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO courses (
                id, educator_id, title, description, thumbnail_url, price_cents,
                discount_percent, published, content, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                thumbnail_url = EXCLUDED.thumbnail_url,
                price_cents = EXCLUDED.price_cents,
                discount_percent = EXCLUDED.discount_percent,
                published = EXCLUDED.published,
                content = EXCLUDED.content,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(course.educator_id.as_str())
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.thumbnail_url)
        .bind(course.price_cents)
        .bind(i16::from(course.discount.percent()))
        .bind(course.published)
        .bind(Json(&course.content))
        .bind(course.created_at.as_datetime())
        .bind(course.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(EDUCATOR_FK) {
                    return DomainError::new(
                        ErrorCode::UserNotFound,
                        "Educator has no user record yet",
                    )
                    .with_detail("user_id", course.educator_id.to_string());
                }
            }
            db_error("Failed to save course", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> =
            sqlx::query_as(&format!("SELECT {} FROM courses c WHERE c.id = $1", COURSE_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find course", e))?;

        row.map(Course::try_from).transpose()
    }

    async fn list_published(&self) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses c WHERE c.published ORDER BY c.created_at DESC",
            COURSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list courses", e))?;

        rows.into_iter().map(Course::try_from).collect()
    }

    async fn list_by_educator(&self, educator_id: &UserId) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses c WHERE c.educator_id = $1 ORDER BY c.created_at DESC",
            COURSE_COLUMNS
        ))
        .bind(educator_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list educator courses", e))?;

        rows.into_iter().map(Course::try_from).collect()
    }
}
