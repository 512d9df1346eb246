//! Credential hasher port.
//!
//! Hashing is deliberately slow, so implementations run it off the async
//! executor.

use crate::domain::membership::PasswordHash;
use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashingError {
    #[error("hashing task failed: {0}")]
    Task(String),

    #[error("stored hash is malformed: {0}")]
    MalformedHash(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Port for one-way salted password hashing.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a password with a fresh salt.
    async fn hash(&self, password: SecretString) -> Result<PasswordHash, HashingError>;

    /// Check a password against a stored hash.
    ///
    /// `Ok(false)` is a wrong password; `Err` means the check could not run.
    async fn verify(&self, password: SecretString, hash: &PasswordHash)
        -> Result<bool, HashingError>;
}
