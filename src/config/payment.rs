//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// ISO currency for checkout sessions
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Frontend origin used for checkout success and cancel redirects
    pub frontend_url: String,

    /// Maximum age of a signed webhook in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self.stripe_api_key.expose_secret();
        let webhook_secret = self.stripe_webhook_secret.expose_secret();

        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__STRIPE_WEBHOOK_SECRET",
            ));
        }

        // Verify key prefixes for safety
        if !api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency);
        }
        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidFrontendUrl);
        }
        if !(1..=3600).contains(&self.webhook_tolerance_secs) {
            return Err(ValidationError::InvalidWebhookTolerance);
        }

        Ok(())
    }
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_webhook_tolerance() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str, webhook_secret: &str) -> PaymentConfig {
        PaymentConfig {
            stripe_api_key: SecretString::new(api_key.to_string()),
            stripe_webhook_secret: SecretString::new(webhook_secret.to_string()),
            currency: default_currency(),
            frontend_url: "http://localhost:5173".to_string(),
            webhook_tolerance_secs: default_webhook_tolerance(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = config("sk_test_xxx", "whsec_xxx");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = config("sk_live_xxx", "whsec_xxx");
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_api_key() {
        assert!(config("", "whsec_xxx").validate().is_err());
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        assert!(config("sk_test_xxx", "").validate().is_err());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        assert_eq!(
            config("pk_test_xxx", "whsec_xxx").validate(),
            Err(ValidationError::InvalidStripeKey)
        );
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        assert_eq!(
            config("sk_test_xxx", "secret_xxx").validate(),
            Err(ValidationError::InvalidStripeWebhookSecret)
        );
    }

    #[test]
    fn test_validation_rejects_bad_currency_and_frontend() {
        let mut bad_currency = config("sk_test_xxx", "whsec_xxx");
        bad_currency.currency = "dollars".to_string();
        assert_eq!(bad_currency.validate(), Err(ValidationError::InvalidCurrency));

        let mut bad_frontend = config("sk_test_xxx", "whsec_xxx");
        bad_frontend.frontend_url = "app.example.com".to_string();
        assert_eq!(bad_frontend.validate(), Err(ValidationError::InvalidFrontendUrl));
    }

    #[test]
    fn test_validation_rejects_zero_tolerance() {
        let mut config = config("sk_test_xxx", "whsec_xxx");
        config.webhook_tolerance_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidWebhookTolerance));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("sk_test_abcd1234", "whsec_xyz789").validate().is_ok());
    }
}
