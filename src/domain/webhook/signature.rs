//! HMAC primitives shared by the payment and identity webhook schemes.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::SignatureError;

/// Default maximum age of a signed delivery (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Maximum allowed clock skew for deliveries stamped in the future.
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Accepted age window for signed deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampWindow {
    pub tolerance_secs: i64,
    pub max_skew_secs: i64,
}

impl Default for TimestampWindow {
    fn default() -> Self {
        Self {
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            max_skew_secs: MAX_CLOCK_SKEW_SECS,
        }
    }
}

impl TimestampWindow {
    pub fn with_tolerance(tolerance_secs: i64) -> Self {
        Self {
            tolerance_secs,
            ..Self::default()
        }
    }

    /// Checks `signed_at` (Unix seconds) against `now` (Unix seconds).
    pub fn check(&self, signed_at: i64, now: i64) -> Result<(), SignatureError> {
        // `signed_at` is unauthenticated here; widen so no value overflows.
        let age = i128::from(now) - i128::from(signed_at);
        if age > i128::from(self.tolerance_secs) {
            return Err(SignatureError::TimestampTooOld);
        }
        if age < -i128::from(self.max_skew_secs) {
            return Err(SignatureError::TimestampInFuture);
        }
        Ok(())
    }
}

/// HMAC-SHA256 over the concatenation of `parts`.
pub fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, SignatureError> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).map_err(|_| SignatureError::InvalidSecret)?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Constant-time comparison of two byte slices.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_accepts_recent_timestamp() {
        assert!(TimestampWindow::default().check(1_000, 1_100).is_ok());
    }

    #[test]
    fn window_accepts_exact_boundary() {
        assert!(TimestampWindow::default().check(1_000, 1_300).is_ok());
    }

    #[test]
    fn window_rejects_just_past_boundary() {
        assert_eq!(
            TimestampWindow::default().check(1_000, 1_301),
            Err(SignatureError::TimestampTooOld)
        );
    }

    #[test]
    fn window_tolerates_small_skew() {
        assert!(TimestampWindow::default().check(1_030, 1_000).is_ok());
    }

    #[test]
    fn window_rejects_far_future() {
        assert_eq!(
            TimestampWindow::default().check(1_100, 1_000),
            Err(SignatureError::TimestampInFuture)
        );
    }

    #[test]
    fn window_rejects_extreme_timestamps() {
        let window = TimestampWindow::default();
        assert_eq!(
            window.check(i64::MIN, 1_000),
            Err(SignatureError::TimestampTooOld)
        );
        assert_eq!(
            window.check(i64::MAX, 1_000),
            Err(SignatureError::TimestampInFuture)
        );
        assert_eq!(
            window.check(i64::MIN, i64::MAX),
            Err(SignatureError::TimestampTooOld)
        );
        assert_eq!(
            window.check(1_000, i64::MIN),
            Err(SignatureError::TimestampInFuture)
        );
    }

    #[test]
    fn custom_tolerance_is_honoured() {
        let window = TimestampWindow::with_tolerance(10);
        assert!(window.check(1_000, 1_011).is_err());
        assert!(window.check(1_000, 1_010).is_ok());
    }

    #[test]
    fn hmac_over_parts_equals_hmac_over_joined_message() {
        let split = hmac_sha256(b"key", &[b"123", b".", b"body"]).unwrap();
        let joined = hmac_sha256(b"key", &[b"123.body"]).unwrap();
        assert_eq!(split, joined);
        assert_eq!(split.len(), 32);
    }

    #[test]
    fn constant_time_eq_handles_lengths() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}
