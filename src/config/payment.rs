//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (rzp_test_... or rzp_live_...)
    pub key_id: String,

    /// Razorpay key secret, also the HMAC key for payment signatures
    pub key_secret: SecretString,

    /// Razorpay API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for outbound provider calls in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.key_id.starts_with("rzp_live_")
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_SECRET"));
        }
        if !self.key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }

        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidProviderUrl);
        }
        if *environment == Environment::Production && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::ProviderUrlMustBeHttps);
        }

        if self.provider_timeout_secs == 0 || self.provider_timeout_secs > 60 {
            return Err(ValidationError::InvalidProviderTimeout);
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key_id: &str, key_secret: &str) -> PaymentConfig {
        PaymentConfig {
            key_id: key_id.to_string(),
            key_secret: SecretString::new(key_secret.to_string()),
            api_base_url: default_api_base_url(),
            provider_timeout_secs: default_provider_timeout(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = config("rzp_test_abc", "secret");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = config("rzp_live_abc", "secret");
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_key_id() {
        assert_eq!(
            config("", "secret").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PAYMENT__KEY_ID"))
        );
    }

    #[test]
    fn test_validation_missing_secret() {
        assert_eq!(
            config("rzp_test_abc", "").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PAYMENT__KEY_SECRET"))
        );
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        assert_eq!(
            config("sk_test_abc", "secret").validate(&Environment::Development),
            Err(ValidationError::InvalidRazorpayKeyId)
        );
    }

    #[test]
    fn test_validation_plain_http_only_outside_production() {
        let mut config = config("rzp_test_abc", "secret");
        config.api_base_url = "http://localhost:9999".to_string();
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::ProviderUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = config("rzp_test_abc", "secret");
        config.provider_timeout_secs = 0;
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidProviderTimeout)
        );
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let config = config("rzp_test_abc", "super_secret_value");
        assert!(!format!("{:?}", config).contains("super_secret_value"));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config("rzp_test_abc123", "s3cr3t");
        assert!(config.validate(&Environment::Production).is_ok());
        assert_eq!(config.provider_timeout(), Duration::from_secs(10));
    }
}
