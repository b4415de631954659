//! Mock payment gateway for testing.
//!
//! Provides a configurable implementation of `PaymentGateway` for unit and
//! integration tests. Supports:
//! - Deterministic session ids (`cs_mock_1`, `cs_mock_2`, ...)
//! - Error injection
//! - Request capture for assertions

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentGateway};

/// Mock payment gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.set_error(PaymentError::network("down"));
/// let result = gateway.create_checkout_session(request).await;
/// assert!(result.is_err());
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Sessions created so far; also drives the id counter.
    created: u32,

    /// Error returned by the next call (consumed).
    next_error: Option<PaymentError>,

    /// Every request received, in order.
    requests: Vec<CreateCheckoutRequest>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the next `create_checkout_session` call with `error`.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CreateCheckoutRequest> {
        self.state().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Session id the n-th successful call returned (1-based).
    pub fn session_id(n: u32) -> String {
        format!("cs_mock_{}", n)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.state();
        state.requests.push(request);

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.created += 1;
        let id = Self::session_id(state.created);
        Ok(CheckoutSession {
            url: format!("https://checkout.mock.test/pay/{}", id),
            id,
            expires_at: chrono::Utc::now().timestamp() + 24 * 60 * 60,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CourseId, PurchaseId, UserId};

    fn request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            purchase_id: PurchaseId::new(),
            user_id: UserId::new("user_1").unwrap(),
            course_id: CourseId::new(),
            course_title: "Rust".to_string(),
            amount_cents: 1_000,
            customer_email: None,
            success_url: "http://localhost/ok".to_string(),
            cancel_url: "http://localhost/".to_string(),
        }
    }

    #[tokio::test]
    async fn issues_sequential_session_ids() {
        let gateway = MockPaymentGateway::new();

        let first = gateway.create_checkout_session(request()).await.unwrap();
        let second = gateway.create_checkout_session(request()).await.unwrap();

        assert_eq!(first.id, "cs_mock_1");
        assert_eq!(second.id, "cs_mock_2");
        assert!(second.url.ends_with("cs_mock_2"));
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn injected_error_is_consumed() {
        let gateway = MockPaymentGateway::new();
        gateway.set_error(PaymentError::network("connection reset"));

        assert!(gateway.create_checkout_session(request()).await.is_err());
        assert!(gateway.create_checkout_session(request()).await.is_ok());
        assert_eq!(gateway.requests().len(), 2);
    }
}
