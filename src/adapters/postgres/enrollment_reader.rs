//! PostgreSQL implementation of EnrollmentReader.
//!
//! Enrollment is computed from completed purchases on every read. A buyer
//! with several completed purchases of one course appears once, dated by the
//! most recent completion.

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{
    EducatorEarnings, EducatorEnrollment, EnrolledCourse, EnrolledUser, EnrollmentReader,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::course_repository::{CourseRow, COURSE_COLUMNS};
use super::db_error;
use super::user_repository::UserRow;

/// PostgreSQL implementation of the EnrollmentReader port.
pub struct PostgresEnrollmentReader {
    pool: PgPool,
}

impl PostgresEnrollmentReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrolledCourseRow {
    #[sqlx(flatten)]
    course: CourseRow,
    enrolled_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct EnrolledUserRow {
    #[sqlx(flatten)]
    user: UserRow,
    enrolled_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct EducatorEnrollmentRow {
    #[sqlx(flatten)]
    user: UserRow,
    course_id: uuid::Uuid,
    course_title: String,
    enrolled_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct EarningsRow {
    total_cents: i64,
    completed_purchases: i64,
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentReader {
    async fn courses_for_user(&self, user_id: &UserId) -> Result<Vec<EnrolledCourse>, DomainError> {
        let rows: Vec<EnrolledCourseRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, e.enrolled_at
            FROM courses c
            JOIN (
                SELECT course_id, MAX(completed_at) AS enrolled_at
                FROM purchases
                WHERE user_id = $1 AND status = 'completed'
                GROUP BY course_id
            ) e ON e.course_id = c.id
            ORDER BY e.enrolled_at DESC
            "#,
            COURSE_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read enrolled courses", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(EnrolledCourse {
                    course: Course::try_from(row.course)?,
                    enrolled_at: Timestamp::from_datetime(row.enrolled_at),
                })
            })
            .collect()
    }

    async fn users_for_course(&self, course_id: &CourseId) -> Result<Vec<EnrolledUser>, DomainError> {
        let rows: Vec<EnrolledUserRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.name, u.email, u.image_url, u.role, u.deleted,
                   u.source_updated_at, u.created_at, u.updated_at, e.enrolled_at
            FROM users u
            JOIN (
                SELECT user_id, MAX(completed_at) AS enrolled_at
                FROM purchases
                WHERE course_id = $1 AND status = 'completed'
                GROUP BY user_id
            ) e ON e.user_id = u.id
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read enrolled users", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(EnrolledUser {
                    user: User::try_from(row.user)?,
                    enrolled_at: Timestamp::from_datetime(row.enrolled_at),
                })
            })
            .collect()
    }

    async fn enrollments_for_educator(
        &self,
        educator_id: &UserId,
    ) -> Result<Vec<EducatorEnrollment>, DomainError> {
        let rows: Vec<EducatorEnrollmentRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.name, u.email, u.image_url, u.role, u.deleted,
                   u.source_updated_at, u.created_at, u.updated_at,
                   c.id AS course_id, c.title AS course_title, e.enrolled_at
            FROM (
                SELECT p.user_id, p.course_id, MAX(p.completed_at) AS enrolled_at
                FROM purchases p
                JOIN courses owned ON owned.id = p.course_id
                WHERE owned.educator_id = $1 AND p.status = 'completed'
                GROUP BY p.user_id, p.course_id
            ) e
            JOIN users u ON u.id = e.user_id
            JOIN courses c ON c.id = e.course_id
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(educator_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read educator enrollments", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(EducatorEnrollment {
                    user: User::try_from(row.user)?,
                    course_id: CourseId::from_uuid(row.course_id),
                    course_title: row.course_title,
                    enrolled_at: Timestamp::from_datetime(row.enrolled_at),
                })
            })
            .collect()
    }

    async fn earnings_for_educator(
        &self,
        educator_id: &UserId,
    ) -> Result<EducatorEarnings, DomainError> {
        let row: EarningsRow = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(p.amount_cents), 0)::BIGINT AS total_cents,
                   COUNT(*) AS completed_purchases
            FROM purchases p
            JOIN courses c ON c.id = p.course_id
            WHERE c.educator_id = $1 AND p.status = 'completed'
            "#,
        )
        .bind(educator_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to sum educator earnings", e))?;

        Ok(EducatorEarnings {
            total_cents: row.total_cents,
            completed_purchases: u64::try_from(row.completed_purchases).unwrap_or_default(),
        })
    }

    async fn is_enrolled(&self, user_id: &UserId, course_id: &CourseId) -> Result<bool, DomainError> {
        let enrolled: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM purchases
                WHERE user_id = $1 AND course_id = $2 AND status = 'completed'
            )
            "#,
        )
        .bind(user_id.as_str())
        .bind(course_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check enrollment", e))?;

        Ok(enrolled)
    }
}
