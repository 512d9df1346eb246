//! Payment lifecycle error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidPlan | 400 |
//! | ValidationFailed | 400 |
//! | NotFound | 400 on verify, 404 on status query |
//! | InvalidSignature | 400 |
//! | AlreadyFinalized | 409 |
//! | Provider | 500 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::OrderStatus;

/// Errors raised while creating, confirming or querying orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order {provider_order_id} is already {status}")]
    AlreadyFinalized {
        provider_order_id: String,
        status: OrderStatus,
    },

    #[error("Invalid payment signature")]
    InvalidSignature,

    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl OrderError {
    pub fn invalid_plan(plan: impl Into<String>) -> Self {
        OrderError::InvalidPlan(plan.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(provider_order_id: impl Into<String>) -> Self {
        OrderError::NotFound(provider_order_id.into())
    }

    pub fn already_finalized(provider_order_id: impl Into<String>, status: OrderStatus) -> Self {
        OrderError::AlreadyFinalized {
            provider_order_id: provider_order_id.into(),
            status,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        OrderError::Provider(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        OrderError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::InvalidPlan(_) => ErrorCode::InvalidPlan,
            OrderError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::AlreadyFinalized { .. } => ErrorCode::AlreadyFinalized,
            OrderError::InvalidSignature => ErrorCode::InvalidSignature,
            OrderError::Provider(_) => ErrorCode::ProviderError,
            OrderError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Provider and infrastructure details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            OrderError::Provider(_) => "Payment provider unavailable, please retry".to_string(),
            OrderError::Infrastructure(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => OrderError::validation(
                err.details.get("field").cloned().unwrap_or_default(),
                err.message,
            ),
            ErrorCode::ProviderError => OrderError::Provider(err.message),
            _ => OrderError::Infrastructure(err.to_string()),
        }
    }
}
