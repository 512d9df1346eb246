//! Payment provider port for external order creation.
//!
//! Defines the contract for the payment gateway (Razorpay in production).
//! The provider creates an order the client then pays against, and issues
//! the signature that proves a payment belongs to that order.
//!
//! # Design
//!
//! - **Single provider**: One production adapter plus a test double
//! - **No retries**: Order creation is never retried by callers
//! - **Local verification**: Signature checks need no network round-trip

use crate::domain::foundation::{DomainError, ErrorCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order with the provider.
    ///
    /// Returns the provider's order id, which becomes the join key for
    /// payment confirmation.
    async fn create_order(
        &self,
        request: CreateProviderOrderRequest,
    ) -> Result<ProviderOrder, ProviderError>;

    /// Verify the signature the provider issued for a completed payment.
    ///
    /// Pure computation with the provider secret; returns false on mismatch.
    fn verify_payment(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        signature: &str,
    ) -> bool;
}

/// Request to create a provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProviderOrderRequest {
    /// Amount in minor units (paise).
    pub amount_minor: u64,

    /// ISO currency code.
    pub currency: String,

    /// Our receipt identifier.
    pub receipt: String,

    /// Free-form key/value notes shown in the provider dashboard.
    pub notes: HashMap<String, String>,
}

/// Order as created by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOrder {
    /// Provider's order id.
    pub id: String,

    /// Amount in minor units, as echoed by the provider.
    pub amount_minor: u64,

    pub currency: String,
    pub receipt: Option<String>,

    /// Provider-side status, "created" for a fresh order.
    pub status: String,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderError {
    /// Error code for categorization.
    pub code: ProviderErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl ProviderError {
    /// Create a new provider error.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Timeout, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProviderError {}

impl From<ProviderError> for DomainError {
    fn from(err: ProviderError) -> Self {
        let mut domain = DomainError::new(ErrorCode::ProviderError, err.to_string());
        if let Some(provider_code) = err.provider_code {
            domain = domain.with_detail("provider_code", provider_code);
        }
        domain
    }
}

/// Provider error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Provider did not answer within the configured timeout.
    Timeout,

    /// API authentication failed.
    AuthenticationError,

    /// Provider rejected the request payload.
    BadRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider-side failure.
    ProviderError,

    /// Response body could not be understood.
    InvalidResponse,

    /// Unknown error.
    Unknown,
}

impl ProviderErrorCode {
    /// Transient failures. Order creation is still never retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderErrorCode::NetworkError
                | ProviderErrorCode::Timeout
                | ProviderErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProviderErrorCode::NetworkError => "network_error",
            ProviderErrorCode::Timeout => "timeout",
            ProviderErrorCode::AuthenticationError => "authentication_error",
            ProviderErrorCode::BadRequest => "bad_request",
            ProviderErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            ProviderErrorCode::ProviderError => "provider_error",
            ProviderErrorCode::InvalidResponse => "invalid_response",
            ProviderErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
