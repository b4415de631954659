//! Clerk adapter for session token validation.
//!
//! This adapter implements the `SessionValidator` port using Clerk as the
//! identity provider. It validates JWTs by:
//!
//! 1. Fetching JWKS from the Clerk frontend API
//! 2. Validating JWT signature against the public keys
//! 3. Validating issuer, expiry and (when configured) audience and `azp`
//! 4. Mapping claims to the domain `AuthenticatedUser` type
//!
//! The role comes from a custom session claim. Clerk only includes user
//! metadata in session tokens when the instance's token template adds it, so
//! three locations are accepted: `public_metadata.role`, `metadata.role` and
//! a top-level `role`. A token without any of them is a learner.
//!
//! # Example
//!
//! ```ignore
//! use course_marketplace::adapters::auth::{ClerkConfig, ClerkSessionValidator};
//!
//! let config = ClerkConfig::new("https://clerk.example.com");
//! let validator = ClerkSessionValidator::new(config);
//! let user = validator.validate("eyJ...").await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, TokenData, Validation,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Default JWKS cache lifetime.
const DEFAULT_JWKS_TTL: Duration = Duration::from_secs(3600);

/// Configuration for the Clerk adapter.
#[derive(Debug, Clone)]
pub struct ClerkConfig {
    /// Frontend API URL, e.g. `https://clerk.example.com`. Also the `iss` claim.
    pub issuer_url: String,

    /// Expected `aud` claim. Clerk session tokens carry none by default.
    pub audience: Option<String>,

    /// Origins accepted in the `azp` claim. Empty accepts any.
    pub authorized_parties: Vec<String>,

    /// How long to cache JWKS before refetching.
    pub jwks_cache_duration: Option<Duration>,
}

impl ClerkConfig {
    pub fn new(issuer_url: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: None,
            authorized_parties: Vec::new(),
            jwks_cache_duration: None,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_authorized_parties(mut self, parties: Vec<String>) -> Self {
        self.authorized_parties = parties;
        self
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = Some(duration);
        self
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer_url.trim_end_matches('/'))
    }
}

/// JWT claims structure for Clerk session tokens.
#[derive(Debug, Deserialize)]
struct ClerkClaims {
    /// Subject - the Clerk user id (`user_...`)
    sub: String,

    iss: String,

    /// Session id
    #[serde(default)]
    sid: Option<String>,

    /// Authorized party (origin of the frontend that requested the token)
    #[serde(default)]
    azp: Option<String>,

    #[serde(default)]
    role: Option<String>,

    #[serde(default)]
    metadata: Option<RoleClaims>,

    #[serde(default)]
    public_metadata: Option<RoleClaims>,
}

#[derive(Debug, Default, Deserialize)]
struct RoleClaims {
    #[serde(default)]
    role: Option<String>,
}

impl ClerkClaims {
    fn role(&self) -> UserRole {
        let claim = self
            .public_metadata
            .as_ref()
            .and_then(|m| m.role.as_deref())
            .or_else(|| self.metadata.as_ref().and_then(|m| m.role.as_deref()))
            .or(self.role.as_deref());
        UserRole::from_claim(claim)
    }
}

/// Cached JWKS with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

/// Clerk session validator.
///
/// Keys are fetched lazily on first validation so startup never blocks on
/// the identity provider.
pub struct ClerkSessionValidator {
    config: ClerkConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl ClerkSessionValidator {
    pub fn new(config: ClerkConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client for JWKS");
                reqwest::Client::new()
            });

        Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();

        tracing::debug!(url = %url, "Fetching JWKS");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch JWKS");
            AuthError::ServiceUnavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "JWKS endpoint returned an error");
            return Err(AuthError::ServiceUnavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse JWKS");
            AuthError::ServiceUnavailable(format!("Failed to parse JWKS: {}", e))
        })?;

        tracing::debug!(keys = jwks.keys.len(), "Fetched JWKS");

        Ok(jwks)
    }

    /// Returns the cached JWKS, refetching when expired or when `kid` is
    /// unknown (key rotation).
    async fn get_jwks(&self, kid: &str) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() && cached.jwks.find(kid).is_some() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            let duration = self.config.jwks_cache_duration.unwrap_or(DEFAULT_JWKS_TTL);
            *cache = Some(JwksCache::new(jwks.clone(), duration));
        }

        Ok(jwks)
    }

    fn find_decoding_key(kid: &str, jwks: &JwkSet) -> Result<(DecodingKey, Algorithm), AuthError> {
        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!(kid = %kid, "No matching key found");
            AuthError::InvalidToken
        })?;

        let algorithm = match jwk.common.key_algorithm {
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) | None => Algorithm::RS256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(other) => {
                tracing::warn!(algorithm = ?other, "Unsupported algorithm");
                return Err(AuthError::InvalidToken);
            }
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!(error = %e, "Failed to create decoding key");
            AuthError::InvalidToken
        })?;

        Ok((decoding_key, algorithm))
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer_url]);
        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }

    fn decode_claims(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<TokenData<ClerkClaims>, AuthError> {
        decode::<ClerkClaims>(token, decoding_key, &self.validation(algorithm)).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })
    }

    fn authorized_party_allowed(&self, azp: Option<&str>) -> bool {
        if self.config.authorized_parties.is_empty() {
            return true;
        }
        azp.is_some_and(|azp| self.config.authorized_parties.iter().any(|p| p == azp))
    }
}

#[async_trait]
impl SessionValidator for ClerkSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "Failed to decode JWT header");
            AuthError::InvalidToken
        })?;
        let kid = header.kid.ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks(&kid).await?;
        let (decoding_key, algorithm) = Self::find_decoding_key(&kid, &jwks)?;
        let claims = self.decode_claims(token, &decoding_key, algorithm)?.claims;

        if claims.iss != self.config.issuer_url {
            tracing::warn!(issuer = %claims.iss, "Issuer mismatch after validation");
            return Err(AuthError::InvalidToken);
        }

        if !self.authorized_party_allowed(claims.azp.as_deref()) {
            tracing::warn!(azp = ?claims.azp, "Token issued for an unknown origin");
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token has an empty subject");
            AuthError::InvalidToken
        })?;

        let mut user = AuthenticatedUser::new(user_id, claims.role());
        if let Some(sid) = claims.sid {
            user = user.with_session_id(sid);
        }
        Ok(user)
    }
}

impl std::fmt::Debug for ClerkSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClerkSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
