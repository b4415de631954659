//! Stripe Checkout adapter.
//!
//! Implements the `PaymentGateway` port against the Stripe REST API. Sessions
//! are created in `payment` mode with inline `price_data`, so courses need no
//! Stripe-side product catalog.
//!
//! Webhook verification is not here; see `domain::webhook::stripe`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key).with_currency("eur");
//! let gateway = StripeCheckoutAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentGateway,
};

/// Stripe checkout sessions expire after 24 hours unless configured otherwise.
const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// ISO currency code, lowercase.
    currency: String,
}

impl StripeConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: "https://api.stripe.com".to_string(),
            currency: "usd".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into().to_lowercase();
        self
    }
}

/// Stripe payment gateway adapter.
pub struct StripeCheckoutAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Subset of the Stripe Checkout Session object returned on creation.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Form parameters for `POST /v1/checkout/sessions`.
fn checkout_params(request: &CreateCheckoutRequest, currency: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("mode", "payment".to_string()),
        ("line_items[0][price_data][currency]", currency.to_string()),
        (
            "line_items[0][price_data][product_data][name]",
            request.course_title.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]",
            request.amount_cents.to_string(),
        ),
        ("line_items[0][quantity]", "1".to_string()),
        ("success_url", request.success_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
        ("client_reference_id", request.purchase_id.to_string()),
        ("metadata[purchase_id]", request.purchase_id.to_string()),
        ("metadata[user_id]", request.user_id.to_string()),
        ("metadata[course_id]", request.course_id.to_string()),
    ];

    if let Some(email) = &request.customer_email {
        params.push(("customer_email", email.clone()));
    }

    params
}

/// Maps a non-success Stripe response to a port error.
fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error ({})", status));

    let code = match status.as_u16() {
        400 | 402 | 404 => PaymentErrorCode::InvalidRequest,
        401 | 403 => PaymentErrorCode::AuthenticationError,
        429 => PaymentErrorCode::RateLimitExceeded,
        _ => PaymentErrorCode::ProviderError,
    };

    let error = PaymentError::new(code, message);
    match parsed.and_then(|e| e.error.code) {
        Some(provider_code) => error.with_provider_code(provider_code),
        None => error,
    }
}

#[async_trait]
impl PaymentGateway for StripeCheckoutAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = checkout_params(&request, &self.config.currency);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            // Retrying the same purchase never opens a second session.
            .header("Idempotency-Key", request.purchase_id.to_string())
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = error_from_response(status, &error_text);
            tracing::error!(
                status = status.as_u16(),
                error = %error,
                purchase_id = %request.purchase_id,
                "Stripe create_checkout_session failed"
            );
            return Err(error);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::provider("Stripe session has no hosted URL"))?;

        Ok(CheckoutSession {
            id: session.id,
            url,
            expires_at: session
                .expires_at
                .unwrap_or_else(|| chrono::Utc::now().timestamp() + DEFAULT_SESSION_TTL_SECS),
        })
    }
}
