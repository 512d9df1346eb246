//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKeyId,

    #[error("Payment provider URL must use HTTPS in production")]
    ProviderUrlMustBeHttps,

    #[error("Invalid payment provider URL")]
    InvalidProviderUrl,

    #[error("Invalid payment provider timeout")]
    InvalidProviderTimeout,

    #[error("Provider timeout ({provider_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    ProviderTimeoutNotBelowRequestTimeout { provider_secs: u64, request_secs: u64 },

    #[error("Hashing thread limit must be between 1 and 64")]
    InvalidHashingThreads,
}
