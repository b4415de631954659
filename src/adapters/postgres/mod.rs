//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresUserRepository` - Users mirrored from the identity provider
//! - `PostgresCourseRepository` - Courses with JSONB content
//! - `PostgresPurchaseRepository` - Purchases and the conditional settlement update
//! - `PostgresEnrollmentReader` - Enrollment derived from completed purchases

mod course_repository;
mod enrollment_reader;
mod purchase_repository;
mod user_repository;

pub use course_repository::PostgresCourseRepository;
pub use enrollment_reader::PostgresEnrollmentReader;
pub use purchase_repository::PostgresPurchaseRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::{DomainError, ErrorCode};
use sqlx::PgPool;

/// Runs all pending schema migrations.
///
/// Migrations are embedded at compile time from the `migrations/` directory
/// and applied in filename order.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations completed successfully");
    Ok(())
}

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

/// A stored value the domain refuses to load.
fn corrupt_row(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored value: {}", err))
}
