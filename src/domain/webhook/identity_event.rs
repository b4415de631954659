//! Identity lifecycle events decoded from a verified provider body.

use serde::Deserialize;

use crate::domain::foundation::{Timestamp, UserId, UserRole};
use crate::domain::user::UserProfile;

use super::ReconciliationError;

/// User state carried by a create or update event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub user_id: UserId,
    pub profile: UserProfile,
    /// Provider-side modification time, when present.
    pub source_updated_at: Option<Timestamp>,
}

/// A verified identity event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    Created(UserSnapshot),
    Updated(UserSnapshot),
    Deleted { user_id: UserId },
}

impl IdentityEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            IdentityEvent::Created(_) => "user.created",
            IdentityEvent::Updated(_) => "user.updated",
            IdentityEvent::Deleted { .. } => "user.deleted",
        }
    }

    pub fn user_id(&self) -> &UserId {
        match self {
            IdentityEvent::Created(snapshot) | IdentityEvent::Updated(snapshot) => {
                &snapshot.user_id
            }
            IdentityEvent::Deleted { user_id } => user_id,
        }
    }

    /// Decodes a verified body.
    ///
    /// # Errors
    ///
    /// - `UnsupportedEventKind` for anything but `user.created`,
    ///   `user.updated` and `user.deleted`
    /// - `MalformedPayload` when the body or user data is invalid
    pub fn parse(payload: &[u8]) -> Result<Self, ReconciliationError> {
        let raw: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))?;

        match raw.event_type.as_str() {
            "user.created" => Ok(IdentityEvent::Created(snapshot(raw.data)?)),
            "user.updated" => Ok(IdentityEvent::Updated(snapshot(raw.data)?)),
            "user.deleted" => {
                let deleted: DeletedObject = serde_json::from_value(raw.data)
                    .map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))?;
                Ok(IdentityEvent::Deleted {
                    user_id: user_id(deleted.id)?,
                })
            }
            _ => Err(ReconciliationError::UnsupportedEventKind(raw.event_type)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DeletedObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserObject {
    id: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    primary_email_address_id: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    public_metadata: PublicMetadata,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    updated_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct EmailAddress {
    #[serde(default)]
    id: Option<String>,
    email_address: String,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetadata {
    #[serde(default)]
    role: Option<String>,
}

fn user_id(raw: String) -> Result<UserId, ReconciliationError> {
    UserId::new(raw).map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))
}

fn snapshot(data: serde_json::Value) -> Result<UserSnapshot, ReconciliationError> {
    let user: UserObject = serde_json::from_value(data)
        .map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))?;

    let email = primary_email(&user);
    let name = display_name(&user, &email);

    Ok(UserSnapshot {
        user_id: user_id(user.id)?,
        profile: UserProfile {
            name,
            email,
            image_url: user.image_url,
            role: UserRole::from_claim(user.public_metadata.role.as_deref()),
        },
        source_updated_at: user.updated_at.and_then(Timestamp::from_unix_millis),
    })
}

fn primary_email(user: &UserObject) -> String {
    let primary = user.primary_email_address_id.as_deref();
    user.email_addresses
        .iter()
        .find(|address| primary.is_some() && address.id.as_deref() == primary)
        .or_else(|| user.email_addresses.first())
        .map(|address| address.email_address.clone())
        .unwrap_or_default()
}

fn display_name(user: &UserObject, email: &str) -> String {
    let full = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if !full.is_empty() {
        return full;
    }
    user.username
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| email.to_string())
}
