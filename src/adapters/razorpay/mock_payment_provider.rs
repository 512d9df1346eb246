//! Mock payment provider for testing.
//!
//! Provides a configurable implementation of `PaymentProvider` for unit and
//! integration tests. Supports:
//! - Sequential provider order ids (`order_mock_1`, `order_mock_2`, ...)
//! - Error injection
//! - Call tracking
//! - Real signature verification against a configurable secret

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::payment::{compute_payment_signature, verify_payment_signature};
use crate::ports::{CreateProviderOrderRequest, PaymentProvider, ProviderError, ProviderOrder};

/// Secret used when none is configured.
pub const MOCK_KEY_SECRET: &str = "mock_key_secret";

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_error(ProviderError::timeout("simulated"));
///
/// let order = handler.handle(cmd).await; // fails with ProviderError
/// assert_eq!(mock.call_count("create_order"), 1);
/// ```
#[derive(Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
    key_secret: String,
}

#[derive(Default)]
struct MockState {
    /// Counter for generated provider order ids.
    next_order_seq: u64,

    /// Error to return on next call (consumed).
    next_error: Option<ProviderError>,

    /// Error returned on every call until cleared.
    sticky_error: Option<ProviderError>,

    /// Requests received by `create_order`.
    requests: Vec<CreateProviderOrderRequest>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::with_secret(MOCK_KEY_SECRET)
    }
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(key_secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            key_secret: key_secret.into(),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Fail the next `create_order` call.
    pub fn set_error(&self, error: ProviderError) {
        self.state().next_error = Some(error);
    }

    /// Fail every `create_order` call until `clear_errors`.
    pub fn set_sticky_error(&self, error: ProviderError) {
        self.state().sticky_error = Some(error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.sticky_error = None;
    }

    /// Signature the real provider would issue for this order/payment pair.
    pub fn sign(&self, provider_order_id: &str, provider_payment_id: &str) -> String {
        compute_payment_signature(provider_order_id, provider_payment_id, &self.key_secret)
            .unwrap_or_default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Requests passed to `create_order`, in call order.
    pub fn requests(&self) -> Vec<CreateProviderOrderRequest> {
        self.state().requests.clone()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self) -> Result<(), ProviderError> {
        let mut state = self.state();
        if let Some(error) = state.sticky_error.clone() {
            return Err(error);
        }
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_order(
        &self,
        request: CreateProviderOrderRequest,
    ) -> Result<ProviderOrder, ProviderError> {
        self.record_call(
            "create_order",
            vec![request.amount_minor.to_string(), request.receipt.clone()],
        );
        self.check_error()?;

        let mut state = self.state();
        state.next_order_seq += 1;
        state.requests.push(request.clone());

        Ok(ProviderOrder {
            id: format!("order_mock_{}", state.next_order_seq),
            amount_minor: request.amount_minor,
            currency: request.currency,
            receipt: Some(request.receipt),
            status: "created".to_string(),
        })
    }

    fn verify_payment(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        signature: &str,
    ) -> bool {
        self.record_call(
            "verify_payment",
            vec![provider_order_id.to_string(), provider_payment_id.to_string()],
        );
        verify_payment_signature(provider_order_id, provider_payment_id, signature, &self.key_secret)
    }
}
