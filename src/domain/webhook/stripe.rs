//! Stripe webhook signature verification.
//!
//! `Stripe-Signature: t=<unix>,v1=<hex>[,v1=<hex>...]` where each `v1` is
//! HMAC-SHA256 of `"{t}.{raw body}"` keyed with the endpoint secret. Several
//! `v1` entries appear while a secret is being rolled; any one may match.

use secrecy::{ExposeSecret, SecretString};

use super::signature::{constant_time_eq, hmac_sha256, TimestampWindow};
use super::SignatureError;

/// Parsed components of the `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeSignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Every `v1` signature present, decoded from hex.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl StripeSignatureHeader {
    /// Parses `t=<timestamp>,v1=<signature>[,...]`. Unknown keys (such as the
    /// legacy `v0`) are ignored, and so are `v1` values that are not hex.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| SignatureError::MalformedHeader("expected key=value".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        SignatureError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                // An undecodable entry can never match; skip it.
                "v1" => {
                    if let Ok(decoded) = hex::decode(value) {
                        v1_signatures.push(decoded);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| SignatureError::MalformedHeader("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(SignatureError::MalformedHeader(
                "missing v1 signature".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for payment gateway webhook signatures.
pub struct StripeSignatureVerifier {
    secret: SecretString,
    window: TimestampWindow,
}

impl StripeSignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            window: TimestampWindow::default(),
        }
    }

    pub fn with_window(mut self, window: TimestampWindow) -> Self {
        self.window = window;
        self
    }

    /// Verifies `payload` against the header using the current clock.
    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> Result<(), SignatureError> {
        let header = header.ok_or(SignatureError::MissingHeader("Stripe-Signature"))?;
        self.verify_at(payload, header, chrono::Utc::now().timestamp())
    }

    /// Verifies `payload` against the header as of `now` (Unix seconds).
    ///
    /// Order: parse header, check timestamp window, compare signatures in
    /// constant time.
    pub fn verify_at(&self, payload: &[u8], header: &str, now: i64) -> Result<(), SignatureError> {
        let header = StripeSignatureHeader::parse(header)?;
        self.window.check(header.timestamp, now)?;

        let expected = self.compute(header.timestamp, payload)?;
        if header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_eq(&expected, candidate))
        {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }

    /// Builds a header value the way the gateway signs deliveries.
    ///
    /// Used by local tooling and fixtures that replay events.
    pub fn signature_header(&self, payload: &[u8], timestamp: i64) -> Result<String, SignatureError> {
        let signature = self.compute(timestamp, payload)?;
        Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
    }

    fn compute(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, SignatureError> {
        let timestamp = timestamp.to_string();
        hmac_sha256(
            self.secret.expose_secret().as_bytes(),
            &[timestamp.as_bytes(), b".", payload],
        )
    }
}
