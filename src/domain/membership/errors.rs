//! Account provisioning and authentication errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | NoValidPayment | 400 |
//! | UserExists | 409 |
//! | InvalidCredentials | 401 |
//! | MembershipInactive | 403 |
//! | Hashing | 500 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::payment::Plan;

/// Errors raised while provisioning or authenticating members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("A user with email {0} already exists")]
    UserExists(String),

    #[error("No valid {plan} payment found for {email}")]
    NoValidPayment { email: String, plan: Plan },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Membership is not active")]
    MembershipInactive,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ProvisioningError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProvisioningError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_exists(email: impl Into<String>) -> Self {
        ProvisioningError::UserExists(email.into())
    }

    pub fn no_valid_payment(email: impl Into<String>, plan: Plan) -> Self {
        ProvisioningError::NoValidPayment {
            email: email.into(),
            plan,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProvisioningError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProvisioningError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProvisioningError::UserExists(_) => ErrorCode::UserExists,
            ProvisioningError::NoValidPayment { .. } => ErrorCode::NoValidPayment,
            ProvisioningError::InvalidCredentials => ErrorCode::InvalidCredentials,
            ProvisioningError::MembershipInactive => ErrorCode::MembershipInactive,
            ProvisioningError::Hashing(_) => ErrorCode::InternalError,
            ProvisioningError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message safe to show to API clients.
    pub fn client_message(&self) -> String {
        match self {
            ProvisioningError::Hashing(_) | ProvisioningError::Infrastructure(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for ProvisioningError {
    fn from(err: ValidationError) -> Self {
        ProvisioningError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for ProvisioningError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserExists => ProvisioningError::UserExists(
                err.details.get("email").cloned().unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => ProvisioningError::validation(
                err.details.get("field").cloned().unwrap_or_default(),
                err.message,
            ),
            _ => ProvisioningError::Infrastructure(err.to_string()),
        }
    }
}
