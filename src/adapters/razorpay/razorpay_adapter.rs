//! Razorpay payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Razorpay Orders API.
//!
//! # Security
//!
//! - Key secret held in `secrecy::SecretString`, exposed only for basic auth
//!   and signature computation
//! - Payment signatures verified locally with HMAC-SHA256 and a constant-time
//!   comparison
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::from(&app_config.payment);
//! let adapter = RazorpayPaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::payment::verify_payment_signature;
use crate::ports::{
    CreateProviderOrderRequest, PaymentProvider, ProviderError, ProviderErrorCode, ProviderOrder,
};

use super::api_types::{RazorpayOrderRequest, RazorpayOrderResponse};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    key_id: String,
    key_secret: SecretString,
    api_base_url: String,
    timeout: Duration,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&PaymentConfig> for RazorpayConfig {
    fn from(config: &PaymentConfig) -> Self {
        Self {
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.provider_timeout(),
        }
    }
}

/// Razorpay payment provider adapter.
pub struct RazorpayPaymentAdapter {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayPaymentAdapter {
    /// Create an adapter whose HTTP client enforces the configured timeout.
    pub fn new(config: RazorpayConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl PaymentProvider for RazorpayPaymentAdapter {
    async fn create_order(
        &self,
        request: CreateProviderOrderRequest,
    ) -> Result<ProviderOrder, ProviderError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);
        let body = RazorpayOrderRequest {
            amount: request.amount_minor,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        let order = parse_order_response(status, &text, request.amount_minor).map_err(|e| {
            tracing::warn!(
                http_status = status.as_u16(),
                code = %e.code,
                provider_code = e.provider_code.as_deref().unwrap_or(""),
                receipt = %request.receipt,
                "Razorpay create_order failed"
            );
            e
        })?;

        tracing::debug!(
            provider_order_id = %order.id,
            receipt = %request.receipt,
            "Razorpay order created"
        );
        Ok(order)
    }

    fn verify_payment(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        signature: &str,
    ) -> bool {
        verify_payment_signature(
            provider_order_id,
            provider_payment_id,
            signature,
            self.config.key_secret.expose_secret(),
        )
    }
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(format!("Razorpay did not respond in time: {}", err))
    } else {
        ProviderError::network(err.to_string())
    }
}

/// Interprets a `POST /v1/orders` response.
fn parse_order_response(
    status: StatusCode,
    body: &str,
    requested_amount: u64,
) -> Result<ProviderOrder, ProviderError> {
    let parsed: RazorpayOrderResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!(
            "unparseable Razorpay response (HTTP {}): {}",
            status.as_u16(),
            e
        ))
    })?;

    match parsed {
        RazorpayOrderResponse::Created(order) if status.is_success() => {
            if order.amount != requested_amount {
                return Err(ProviderError::invalid_response(format!(
                    "Razorpay order {} has amount {}, requested {}",
                    order.id, order.amount, requested_amount
                )));
            }
            Ok(ProviderOrder {
                id: order.id,
                amount_minor: order.amount,
                currency: order.currency,
                receipt: order.receipt,
                status: order.status,
            })
        }
        RazorpayOrderResponse::Created(_) => Err(ProviderError::invalid_response(format!(
            "order entity returned with HTTP {}",
            status.as_u16()
        ))),
        RazorpayOrderResponse::Failed(envelope) => {
            let code = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderErrorCode::AuthenticationError
                }
                StatusCode::TOO_MANY_REQUESTS => ProviderErrorCode::RateLimitExceeded,
                s if s.is_client_error() => ProviderErrorCode::BadRequest,
                s if s.is_server_error() => ProviderErrorCode::ProviderError,
                _ => ProviderErrorCode::Unknown,
            };
            let mut err = ProviderError::new(code, envelope.error.summary());
            if let Some(provider_code) = envelope.error.code {
                err = err.with_provider_code(provider_code);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::compute_payment_signature;
    use std::collections::HashMap;

    const CREATED: &str = r#"{"id":"order_1","entity":"order","amount":99900,"amount_paid":0,
        "amount_due":99900,"currency":"INR","receipt":"rcpt_1","status":"created","attempts":0,
        "created_at":1700000000}"#;

    // ══════════════════════════════════════════════════════════════
    // Response mapping
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn created_response_maps_to_provider_order() {
        let order = parse_order_response(StatusCode::OK, CREATED, 99_900).unwrap();
        assert_eq!(order.id, "order_1");
        assert_eq!(order.amount_minor, 99_900);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.status, "created");
    }

    #[test]
    fn amount_mismatch_is_invalid_response() {
        let err = parse_order_response(StatusCode::OK, CREATED, 199_900).unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::InvalidResponse);
    }

    #[test]
    fn unauthorized_maps_to_authentication_error() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Authentication failed"}}"#;
        let err = parse_order_response(StatusCode::UNAUTHORIZED, body, 99_900).unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::AuthenticationError);
        assert_eq!(err.provider_code.as_deref(), Some("BAD_REQUEST_ERROR"));
        assert_eq!(err.message, "Authentication failed");
    }

    #[test]
    fn bad_request_and_server_errors_are_distinguished() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"bad amount","field":"amount"}}"#;
        let err = parse_order_response(StatusCode::BAD_REQUEST, body, 1).unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::BadRequest);

        let body = r#"{"error":{"code":"SERVER_ERROR","description":"internal"}}"#;
        let err = parse_order_response(StatusCode::BAD_GATEWAY, body, 1).unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::ProviderError);
    }

    #[test]
    fn rate_limit_is_recognized() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Too many requests"}}"#;
        let err = parse_order_response(StatusCode::TOO_MANY_REQUESTS, body, 1).unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::RateLimitExceeded);
    }

    #[test]
    fn html_error_page_is_invalid_response() {
        let err =
            parse_order_response(StatusCode::BAD_GATEWAY, "<html>502</html>", 1).unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::InvalidResponse);
    }

    // ══════════════════════════════════════════════════════════════
    // Adapter
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_payment_uses_key_secret() {
        let adapter =
            RazorpayPaymentAdapter::new(RazorpayConfig::new("rzp_test_k", "key_secret")).unwrap();
        let sig = compute_payment_signature("order_1", "pay_1", "key_secret").unwrap();
        assert!(adapter.verify_payment("order_1", "pay_1", &sig));
        assert!(!adapter.verify_payment("order_1", "pay_2", &sig));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = RazorpayConfig::new("rzp_test_k", "s").with_base_url("http://localhost:9/");
        assert_eq!(config.api_base_url, "http://localhost:9");
    }

    #[tokio::test]
    async fn unreachable_provider_is_network_error() {
        let config = RazorpayConfig::new("rzp_test_k", "s")
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));
        let adapter = RazorpayPaymentAdapter::new(config).unwrap();

        let err = adapter
            .create_order(CreateProviderOrderRequest {
                amount_minor: 99_900,
                currency: "INR".to_string(),
                receipt: "rcpt_1".to_string(),
                notes: HashMap::new(),
            })
            .await
            .unwrap_err();

        assert!(err.code.is_transient(), "unexpected code {}", err.code);
    }
}
