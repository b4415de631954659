//! Course catalog cache.
//!
//! Wraps a `CourseRepository` and memoizes the published listing for a fixed
//! TTL. Any course write through the wrapper drops the cached listing, so an
//! educator sees a new course on the next request instead of after expiry.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::course::Course;
use crate::domain::foundation::{CourseId, DomainError, UserId};
use crate::ports::CourseRepository;

#[derive(Debug, Clone)]
struct CachedListing {
    courses: Vec<Course>,
    fetched_at: Instant,
}

/// TTL cache over the published course listing.
///
/// Point lookups and per-educator listings pass straight through.
pub struct CourseCatalogCache {
    inner: Arc<dyn CourseRepository>,
    ttl: Duration,
    listing: RwLock<Option<CachedListing>>,
}

impl CourseCatalogCache {
    pub fn new(inner: Arc<dyn CourseRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            listing: RwLock::new(None),
        }
    }

    /// Drops the cached listing.
    pub async fn invalidate(&self) {
        *self.listing.write().await = None;
    }

    fn fresh(&self, entry: &CachedListing) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }
}

#[async_trait]
impl CourseRepository for CourseCatalogCache {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        self.inner.save(course).await?;
        self.invalidate().await;
        tracing::debug!(course_id = %course.id, "Course catalog cache invalidated");
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn list_published(&self) -> Result<Vec<Course>, DomainError> {
        if let Some(entry) = self.listing.read().await.as_ref() {
            if self.fresh(entry) {
                return Ok(entry.courses.clone());
            }
        }

        let mut slot = self.listing.write().await;
        // Another request may have refilled it while we waited for the lock.
        if let Some(entry) = slot.as_ref() {
            if self.fresh(entry) {
                return Ok(entry.courses.clone());
            }
        }

        let courses = self.inner.list_published().await?;
        *slot = Some(CachedListing {
            courses: courses.clone(),
            fetched_at: Instant::now(),
        });
        Ok(courses)
    }

    async fn list_by_educator(&self, educator_id: &UserId) -> Result<Vec<Course>, DomainError> {
        self.inner.list_by_educator(educator_id).await
    }
}
