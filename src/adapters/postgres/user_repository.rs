//! PostgreSQL implementation of UserRepository.

use crate::domain::foundation::{DomainError, Timestamp, UserId, UserRole};
use crate::domain::user::User;
use crate::ports::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{corrupt_row, db_error};

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: String,
    pub deleted: bool,
    pub source_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: UserRole = row.role.parse().map_err(corrupt_row)?;

        Ok(User {
            id: UserId::new(row.id).map_err(corrupt_row)?,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            role,
            deleted: row.deleted,
            source_updated_at: row.source_updated_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(&self, user: &User) -> Result<bool, DomainError> {
        // Mirrors User::may_replace so the freshness check and the write are
        // one statement. A tombstone only yields to a strictly newer profile.
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, image_url, role, deleted,
                source_updated_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                image_url = EXCLUDED.image_url,
                role = EXCLUDED.role,
                deleted = EXCLUDED.deleted,
                source_updated_at = COALESCE(EXCLUDED.source_updated_at, users.source_updated_at),
                updated_at = EXCLUDED.updated_at
            WHERE users.source_updated_at IS NULL
               OR (users.deleted AND NOT EXCLUDED.deleted
                   AND EXCLUDED.source_updated_at > users.source_updated_at)
               OR (NOT (users.deleted AND NOT EXCLUDED.deleted)
                   AND (EXCLUDED.source_updated_at IS NULL
                        OR EXCLUDED.source_updated_at >= users.source_updated_at))
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image_url)
        .bind(user.role.as_str())
        .bind(user.deleted)
        .bind(user.source_updated_at.map(|t| *t.as_datetime()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to upsert user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, image_url, role, deleted,
                   source_updated_at, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find user", e))?;

        row.map(User::try_from).transpose()
    }
}
