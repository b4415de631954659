//! HandleIdentityEventHandler - mirrors identity provider users locally.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{ProfileChange, User};
use crate::domain::webhook::{
    IdentityEvent, ReconciliationError, SvixHeaders, SvixSignatureVerifier, UserSnapshot,
};
use crate::ports::UserRepository;

/// Command carrying one raw identity delivery.
#[derive(Debug, Clone)]
pub struct HandleIdentityEventCommand {
    pub payload: Vec<u8>,
    pub headers: SvixHeaders,
}

/// Successful outcomes, all acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEventOutcome {
    UserUpserted { user_id: UserId, created: bool },
    UserDeleted { user_id: UserId },
    /// A newer profile or a later deletion was already applied; nothing
    /// written.
    Stale { user_id: UserId },
    /// Deletion of a user never seen here.
    NoOp { user_id: UserId },
}

/// Handler for identity lifecycle webhooks.
pub struct HandleIdentityEventHandler {
    verifier: Arc<SvixSignatureVerifier>,
    users: Arc<dyn UserRepository>,
}

impl HandleIdentityEventHandler {
    pub fn new(verifier: Arc<SvixSignatureVerifier>, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }

    pub async fn handle(
        &self,
        cmd: HandleIdentityEventCommand,
    ) -> Result<IdentityEventOutcome, ReconciliationError> {
        let result = self.process(cmd).await;
        match &result {
            Ok(outcome) => tracing::info!(?outcome, "Identity event reconciled"),
            Err(err) if err.is_acknowledged() => {
                tracing::debug!(error = %err, "Identity event ignored")
            }
            Err(err) => tracing::warn!(error = %err, "Identity event rejected"),
        }
        result
    }

    async fn process(
        &self,
        cmd: HandleIdentityEventCommand,
    ) -> Result<IdentityEventOutcome, ReconciliationError> {
        self.verifier.verify(&cmd.payload, &cmd.headers)?;
        let delivered_at = cmd.headers.signed_at().unwrap_or_else(Timestamp::now);

        match IdentityEvent::parse(&cmd.payload)? {
            IdentityEvent::Created(snapshot) => self.upsert(snapshot, ProfileEvent::Created).await,
            IdentityEvent::Updated(snapshot) => self.upsert(snapshot, ProfileEvent::Updated).await,
            IdentityEvent::Deleted { user_id } => self.delete(user_id, delivered_at).await,
        }
    }

    async fn upsert(
        &self,
        snapshot: UserSnapshot,
        event: ProfileEvent,
    ) -> Result<IdentityEventOutcome, ReconciliationError> {
        let UserSnapshot {
            user_id,
            profile,
            source_updated_at,
        } = snapshot;

        let existing = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(store_unavailable)?;

        let (user, created) = match existing {
            Some(mut user) => {
                let change = match event {
                    ProfileEvent::Created => user.restore(profile, source_updated_at),
                    ProfileEvent::Updated => user.apply_profile(profile, source_updated_at),
                };
                if change == ProfileChange::Stale {
                    return Ok(IdentityEventOutcome::Stale { user_id });
                }
                (user, false)
            }
            None => (
                User::from_profile(user_id.clone(), profile, source_updated_at),
                true,
            ),
        };

        // The store re-checks freshness; a concurrent newer write wins.
        let written = self.users.upsert(&user).await.map_err(store_unavailable)?;
        if !written {
            return Ok(IdentityEventOutcome::Stale { user_id });
        }

        Ok(IdentityEventOutcome::UserUpserted { user_id, created })
    }

    async fn delete(
        &self,
        user_id: UserId,
        delivered_at: Timestamp,
    ) -> Result<IdentityEventOutcome, ReconciliationError> {
        let Some(mut user) = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(store_unavailable)?
        else {
            return Ok(IdentityEventOutcome::NoOp { user_id });
        };

        if user.mark_deleted(delivered_at) == ProfileChange::Stale {
            return Ok(IdentityEventOutcome::Stale { user_id });
        }
        let written = self.users.upsert(&user).await.map_err(store_unavailable)?;
        Ok(if written {
            IdentityEventOutcome::UserDeleted { user_id }
        } else {
            IdentityEventOutcome::Stale { user_id }
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum ProfileEvent {
    Created,
    Updated,
}

fn store_unavailable(err: DomainError) -> ReconciliationError {
    ReconciliationError::StoreUnavailable(err.to_string())
}
