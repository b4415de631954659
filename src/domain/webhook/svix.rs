//! Identity provider webhook signature verification (Svix scheme).
//!
//! Headers:
//! - `svix-id`: delivery id
//! - `svix-timestamp`: Unix seconds
//! - `svix-signature`: space separated `v1,<base64>` entries
//!
//! Signed content is `"{id}.{timestamp}.{raw body}"`; the key is the
//! base64 part of the `whsec_` secret.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::Timestamp;

use super::signature::{constant_time_eq, hmac_sha256, TimestampWindow};
use super::SignatureError;

const SECRET_PREFIX: &str = "whsec_";

pub const SVIX_ID_HEADER: &str = "svix-id";
pub const SVIX_TIMESTAMP_HEADER: &str = "svix-timestamp";
pub const SVIX_SIGNATURE_HEADER: &str = "svix-signature";

/// Raw Svix headers as received. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvixHeaders {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub signature: Option<String>,
}

impl SvixHeaders {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            timestamp: Some(timestamp.into()),
            signature: Some(signature.into()),
        }
    }

    /// Delivery time from `svix-timestamp`, if present and well formed.
    pub fn signed_at(&self) -> Option<Timestamp> {
        let secs = self.timestamp.as_deref()?.trim().parse().ok()?;
        Timestamp::from_unix_secs(secs)
    }
}

/// Verifier for identity provider webhooks.
pub struct SvixSignatureVerifier {
    key: SecretKey,
    window: TimestampWindow,
}

struct SecretKey(Vec<u8>);

impl SvixSignatureVerifier {
    /// Builds a verifier from a `whsec_<base64>` secret.
    ///
    /// # Errors
    ///
    /// `InvalidSecret` when the base64 part does not decode.
    pub fn new(secret: &SecretString) -> Result<Self, SignatureError> {
        let raw = secret.expose_secret();
        let encoded = raw.strip_prefix(SECRET_PREFIX).unwrap_or(raw);
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| SignatureError::InvalidSecret)?;
        Ok(Self {
            key: SecretKey(key),
            window: TimestampWindow::default(),
        })
    }

    pub fn with_window(mut self, window: TimestampWindow) -> Self {
        self.window = window;
        self
    }

    /// Verifies a delivery using the current clock.
    pub fn verify(&self, payload: &[u8], headers: &SvixHeaders) -> Result<(), SignatureError> {
        self.verify_at(payload, headers, chrono::Utc::now().timestamp())
    }

    /// Verifies a delivery as of `now` (Unix seconds).
    pub fn verify_at(
        &self,
        payload: &[u8],
        headers: &SvixHeaders,
        now: i64,
    ) -> Result<(), SignatureError> {
        let id = headers
            .id
            .as_deref()
            .ok_or(SignatureError::MissingHeader(SVIX_ID_HEADER))?;
        let timestamp = headers
            .timestamp
            .as_deref()
            .ok_or(SignatureError::MissingHeader(SVIX_TIMESTAMP_HEADER))?;
        let signature = headers
            .signature
            .as_deref()
            .ok_or(SignatureError::MissingHeader(SVIX_SIGNATURE_HEADER))?;

        let signed_at: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::MalformedHeader("invalid timestamp".to_string()))?;
        self.window.check(signed_at, now)?;

        let candidates = parse_signatures(signature)?;
        let expected = self.compute(id, timestamp.trim(), payload)?;

        if candidates
            .iter()
            .any(|candidate| constant_time_eq(&expected, candidate))
        {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }

    /// Signs a payload the way the identity provider does.
    ///
    /// Used by local tooling and fixtures that replay events.
    pub fn sign(&self, id: &str, timestamp: i64, payload: &[u8]) -> Result<SvixHeaders, SignatureError> {
        let timestamp = timestamp.to_string();
        let signature = self.compute(id, &timestamp, payload)?;
        Ok(SvixHeaders::new(
            id,
            timestamp,
            format!("v1,{}", STANDARD.encode(signature)),
        ))
    }

    fn compute(&self, id: &str, timestamp: &str, payload: &[u8]) -> Result<Vec<u8>, SignatureError> {
        hmac_sha256(
            &self.key.0,
            &[id.as_bytes(), b".", timestamp.as_bytes(), b".", payload],
        )
    }
}

/// Decodes every `v1,<base64>` entry; other versions are skipped.
fn parse_signatures(header: &str) -> Result<Vec<Vec<u8>>, SignatureError> {
    let mut signatures = Vec::new();
    for entry in header.split_whitespace() {
        let Some((version, value)) = entry.split_once(',') else {
            return Err(SignatureError::MalformedHeader(
                "expected version,signature".to_string(),
            ));
        };
        if version != "v1" {
            continue;
        }
        let decoded = STANDARD.decode(value).map_err(|_| {
            SignatureError::MalformedHeader("invalid base64 signature".to_string())
        })?;
        signatures.push(decoded);
    }

    if signatures.is_empty() {
        return Err(SignatureError::MalformedHeader(
            "missing v1 signature".to_string(),
        ));
    }
    Ok(signatures)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_704_067_200;

    fn secret() -> SecretString {
        SecretString::new(format!("whsec_{}", STANDARD.encode(b"identity-signing-key")))
    }

    fn verifier() -> SvixSignatureVerifier {
        SvixSignatureVerifier::new(&secret()).unwrap()
    }

    fn payload() -> &'static [u8] {
        br#"{"type":"user.created","data":{"id":"user_1"}}"#
    }

    #[test]
    fn new_rejects_secret_that_is_not_base64() {
        let bad = SecretString::new("whsec_***".to_string());
        assert!(matches!(
            SvixSignatureVerifier::new(&bad),
            Err(SignatureError::InvalidSecret)
        ));
    }

    #[test]
    fn verify_accepts_own_signature() {
        let verifier = verifier();
        let headers = verifier.sign("msg_1", NOW, payload()).unwrap();

        assert_eq!(verifier.verify_at(payload(), &headers, NOW + 1), Ok(()));
    }

    #[test]
    fn verify_accepts_any_listed_signature() {
        let verifier = verifier();
        let mut headers = verifier.sign("msg_1", NOW, payload()).unwrap();
        let good = headers.signature.take().unwrap();
        headers.signature = Some(format!("v1,{} v1a,ignored {}", STANDARD.encode([0u8; 32]), good));

        assert_eq!(verifier.verify_at(payload(), &headers, NOW), Ok(()));
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let verifier = verifier();
        let headers = verifier.sign("msg_1", NOW, payload()).unwrap();
        let mut tampered = payload().to_vec();
        tampered[3] ^= 0x20;

        assert_eq!(
            verifier.verify_at(&tampered, &headers, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn verify_rejects_replayed_id_swap() {
        let verifier = verifier();
        let mut headers = verifier.sign("msg_1", NOW, payload()).unwrap();
        headers.id = Some("msg_2".to_string());

        assert_eq!(
            verifier.verify_at(payload(), &headers, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn verify_reports_each_missing_header() {
        let verifier = verifier();
        let full = verifier.sign("msg_1", NOW, payload()).unwrap();

        let mut no_id = full.clone();
        no_id.id = None;
        assert_eq!(
            verifier.verify_at(payload(), &no_id, NOW),
            Err(SignatureError::MissingHeader(SVIX_ID_HEADER))
        );

        let mut no_sig = full;
        no_sig.signature = None;
        assert_eq!(
            verifier.verify_at(payload(), &no_sig, NOW),
            Err(SignatureError::MissingHeader(SVIX_SIGNATURE_HEADER))
        );
    }

    #[test]
    fn verify_rejects_stale_delivery() {
        let verifier = verifier();
        let headers = verifier.sign("msg_1", NOW, payload()).unwrap();

        assert_eq!(
            verifier.verify_at(payload(), &headers, NOW + 3_600),
            Err(SignatureError::TimestampTooOld)
        );
    }

    #[test]
    fn parse_signatures_requires_a_v1_entry() {
        assert!(parse_signatures("v2,abcd").is_err());
        assert!(parse_signatures("garbage").is_err());
    }
}
