//! Error body shared by every endpoint.

use axum::extract::rejection::JsonRejection;
use serde::Serialize;

/// Standard error body: `{success: false, error, error_code}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub error_code: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.into(),
        }
    }
}

/// Describes a body that failed to deserialize, for a validation error.
pub fn rejection_message(rejection: &JsonRejection) -> String {
    format!("Invalid request body: {}", rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_success_false() {
        let json = serde_json::to_value(ErrorResponse::new("INVALID_PLAN", "Invalid plan: GOLD"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Invalid plan: GOLD",
                "error_code": "INVALID_PLAN",
            })
        );
    }
}
