//! User aggregate, mirrored from the identity provider.

use crate::domain::foundation::{Timestamp, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// Profile fields as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: UserRole,
}

/// Marketplace user.
///
/// # Invariants
///
/// - `id` never changes once created
/// - users are never hard-deleted; `deleted` is a tombstone
/// - `source_updated_at` only moves forward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: UserRole,
    pub deleted: bool,
    /// Provider-side modification time of the last applied profile.
    pub source_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of applying a provider profile to an existing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileChange {
    Applied,
    /// The stored profile is newer than the incoming one.
    Stale,
}

impl User {
    /// Creates a user the first time the provider reports it.
    pub fn from_profile(id: UserId, profile: UserProfile, source_updated_at: Option<Timestamp>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name: profile.name,
            email: profile.email,
            image_url: profile.image_url,
            role: profile.role,
            deleted: false,
            source_updated_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a provider update. Data older than what was last applied is
    /// stale, and so is any update to a deleted user. Events without a
    /// provider timestamp apply unless the user is deleted.
    pub fn apply_profile(
        &mut self,
        profile: UserProfile,
        source_updated_at: Option<Timestamp>,
    ) -> ProfileChange {
        if self.deleted || self.is_newer_than(source_updated_at) {
            return ProfileChange::Stale;
        }
        self.overwrite(profile, source_updated_at);
        ProfileChange::Applied
    }

    /// Applies a provider `created` event to a user already stored here.
    ///
    /// A deleted user is restored only when the event is strictly newer than
    /// the deletion.
    pub fn restore(
        &mut self,
        profile: UserProfile,
        source_updated_at: Option<Timestamp>,
    ) -> ProfileChange {
        let fresh = if self.deleted {
            postdates_deletion(self.source_updated_at, source_updated_at)
        } else {
            !self.is_newer_than(source_updated_at)
        };
        if !fresh {
            return ProfileChange::Stale;
        }
        self.overwrite(profile, source_updated_at);
        self.deleted = false;
        ProfileChange::Applied
    }

    /// Tombstones the user as of `at`, the delivery time of the deletion.
    ///
    /// `at` becomes the new `source_updated_at`, so replays of earlier
    /// profile events cannot bring the user back.
    pub fn mark_deleted(&mut self, at: Timestamp) -> ProfileChange {
        if self.is_newer_than(Some(at)) {
            return ProfileChange::Stale;
        }
        self.deleted = true;
        self.source_updated_at = Some(at);
        self.updated_at = Timestamp::now();
        ProfileChange::Applied
    }

    /// Whether writing `self` over `stored` keeps `source_updated_at`
    /// monotonic. Stores call this to re-check freshness at write time.
    pub fn may_replace(&self, stored: &User) -> bool {
        if stored.deleted && !self.deleted {
            postdates_deletion(stored.source_updated_at, self.source_updated_at)
        } else {
            !stored.is_newer_than(self.source_updated_at)
        }
    }

    fn is_newer_than(&self, incoming: Option<Timestamp>) -> bool {
        match (self.source_updated_at, incoming) {
            (Some(stored), Some(incoming)) => incoming.is_before(&stored),
            _ => false,
        }
    }

    fn overwrite(&mut self, profile: UserProfile, source_updated_at: Option<Timestamp>) {
        self.name = profile.name;
        self.email = profile.email;
        self.image_url = profile.image_url;
        self.role = profile.role;
        if source_updated_at.is_some() {
            self.source_updated_at = source_updated_at;
        }
        self.updated_at = Timestamp::now();
    }
}

fn postdates_deletion(deleted_at: Option<Timestamp>, incoming: Option<Timestamp>) -> bool {
    match (deleted_at, incoming) {
        (Some(deleted_at), Some(incoming)) => deleted_at.is_before(&incoming),
        (None, _) => true,
        (Some(_), None) => false,
    }
}
