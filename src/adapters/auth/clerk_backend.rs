//! Clerk Backend API adapter.
//!
//! Implements the `IdentityProvider` port. Role changes are written to the
//! user's public metadata with `PATCH /v1/users/{id}/metadata`; Clerk then
//! emits `user.updated`, which the identity webhook mirrors locally.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::domain::foundation::{UserId, UserRole};
use crate::ports::{IdentityProvider, IdentityProviderError};

/// Clerk Backend API configuration.
#[derive(Clone)]
pub struct ClerkBackendConfig {
    /// Instance secret key (`sk_live_...` or `sk_test_...`).
    secret_key: SecretString,

    /// Base URL for the Backend API (default: https://api.clerk.com).
    api_base_url: String,
}

impl ClerkBackendConfig {
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            api_base_url: "https://api.clerk.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Identity provider adapter backed by the Clerk Backend API.
pub struct ClerkIdentityProvider {
    config: ClerkBackendConfig,
    http_client: reqwest::Client,
}

impl ClerkIdentityProvider {
    pub fn new(config: ClerkBackendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn metadata_url(&self, user_id: &UserId) -> String {
        format!("{}/v1/users/{}/metadata", self.config.api_base_url, user_id)
    }
}

#[derive(Debug, Deserialize)]
struct ClerkErrorEnvelope {
    #[serde(default)]
    errors: Vec<ClerkErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ClerkErrorBody {
    #[serde(default)]
    long_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Body merged into the user's metadata. Other public keys are preserved.
fn role_patch(role: UserRole) -> serde_json::Value {
    json!({ "public_metadata": { "role": role.as_str() } })
}

fn error_from_response(
    status: reqwest::StatusCode,
    body: &str,
    user_id: &UserId,
) -> IdentityProviderError {
    let message = serde_json::from_str::<ClerkErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.errors.into_iter().next())
        .and_then(|e| e.long_message.or(e.message))
        .unwrap_or_else(|| format!("Clerk API error ({})", status));

    match status.as_u16() {
        404 => IdentityProviderError::UserNotFound(user_id.to_string()),
        401 | 403 => IdentityProviderError::Unauthorized,
        429 | 502..=504 => IdentityProviderError::Unavailable(message),
        _ => IdentityProviderError::Provider(message),
    }
}

#[async_trait]
impl IdentityProvider for ClerkIdentityProvider {
    async fn set_role(
        &self,
        user_id: &UserId,
        role: UserRole,
    ) -> Result<(), IdentityProviderError> {
        let response = self
            .http_client
            .patch(self.metadata_url(user_id))
            .bearer_auth(self.config.secret_key.expose_secret())
            .json(&role_patch(role))
            .send()
            .await
            .map_err(|e| IdentityProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = error_from_response(status, &body, user_id);
            tracing::error!(
                status = status.as_u16(),
                error = %error,
                user_id = %user_id,
                "Clerk metadata update failed"
            );
            return Err(error);
        }

        tracing::info!(user_id = %user_id, role = role.as_str(), "Requested role change");
        Ok(())
    }
}
