//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (Clerk)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Clerk frontend API URL; the `iss` claim of session tokens
    pub clerk_issuer_url: String,

    /// Expected `aud` claim, when the token template sets one
    pub clerk_audience: Option<String>,

    /// Accepted `azp` origins (comma-separated)
    pub authorized_parties: Option<String>,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,

    /// Svix signing secret for the identity webhook (`whsec_...`)
    pub webhook_secret: SecretString,

    /// Backend API secret key (`sk_...`), used for role changes
    pub secret_key: SecretString,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    pub fn authorized_parties_list(&self) -> Vec<String> {
        self.authorized_parties
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the issuer URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.clerk_issuer_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__CLERK_ISSUER_URL"));
        }
        if *environment == Environment::Production && !self.clerk_issuer_url.starts_with("https://")
        {
            return Err(ValidationError::IssuerMustBeHttps);
        }

        let secret = self.webhook_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__WEBHOOK_SECRET"));
        }
        if !secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidIdentityWebhookSecret);
        }

        let key = self.secret_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SECRET_KEY"));
        }
        if !key.starts_with("sk_") {
            return Err(ValidationError::InvalidIdentitySecretKey);
        }

        Ok(())
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

fn default_api_url() -> String {
    "https://api.clerk.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(issuer: &str, secret: &str) -> AuthConfig {
        AuthConfig {
            clerk_issuer_url: issuer.to_string(),
            clerk_audience: None,
            authorized_parties: None,
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
            webhook_secret: SecretString::new(secret.to_string()),
            secret_key: SecretString::new("sk_test_clerk".to_string()),
            api_url: default_api_url(),
        }
    }

    #[test]
    fn test_jwks_cache_ttl_duration() {
        let config = AuthConfig {
            jwks_cache_ttl_secs: 7200,
            ..config("https://clerk.example.com", "whsec_abc")
        };
        assert_eq!(config.jwks_cache_ttl(), Duration::from_secs(7200));
    }

    #[test]
    fn test_authorized_parties_parsing() {
        let config = AuthConfig {
            authorized_parties: Some("https://app.example.com, http://localhost:5173".to_string()),
            ..config("https://clerk.example.com", "whsec_abc")
        };
        assert_eq!(
            config.authorized_parties_list(),
            vec!["https://app.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_validation_missing_issuer() {
        let config = config("", "whsec_abc");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__CLERK_ISSUER_URL"))
        );
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = config("http://clerk.localhost", "whsec_abc");
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::IssuerMustBeHttps)
        );
    }

    #[test]
    fn test_validation_webhook_secret_prefix() {
        let config = config("https://clerk.example.com", "sk_wrong");
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::InvalidIdentityWebhookSecret)
        );
    }

    #[test]
    fn test_validation_secret_key_prefix() {
        let missing = AuthConfig {
            secret_key: SecretString::new(String::new()),
            ..config("https://clerk.example.com", "whsec_abc")
        };
        let wrong = AuthConfig {
            secret_key: SecretString::new("pk_test_abc".to_string()),
            ..config("https://clerk.example.com", "whsec_abc")
        };

        assert_eq!(
            missing.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__SECRET_KEY"))
        );
        assert_eq!(
            wrong.validate(&Environment::Development),
            Err(ValidationError::InvalidIdentitySecretKey)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config("https://clerk.example.com", "whsec_dGVzdA==");
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
