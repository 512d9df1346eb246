//! Argon2id implementation of `CredentialHasher`.
//!
//! Hashing runs on tokio's blocking pool. A semaphore caps how many hashes run
//! at once so a burst of sign-ups cannot spawn a blocking thread per request.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Semaphore;

use crate::domain::membership::PasswordHash;
use crate::ports::{CredentialHasher, HashingError};

#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    hashing_semaphore: Arc<Semaphore>,
}

impl Argon2CredentialHasher {
    pub fn new(max_hashing_threads: usize) -> Self {
        Self {
            hashing_semaphore: Arc::new(Semaphore::new(max_hashing_threads.max(1))),
        }
    }

    /// Runs `work` on the blocking pool while holding a semaphore permit.
    async fn run_blocking<T, F>(&self, work: F) -> Result<T, HashingError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .hashing_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| HashingError::Task(e.to_string()))?;

        // The permit moves into the task so it is held until the work finishes.
        let (_permit, result) = tokio::task::spawn_blocking(move || (permit, work()))
            .await
            .map_err(|e| HashingError::Task(e.to_string()))?;

        Ok(result)
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: SecretString) -> Result<PasswordHash, HashingError> {
        let phc = self
            .run_blocking(move || {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|hash| hash.to_string())
            })
            .await?
            .map_err(|e| HashingError::Hash(e.to_string()))?;

        Ok(PasswordHash::from_phc(phc))
    }

    async fn verify(
        &self,
        password: SecretString,
        hash: &PasswordHash,
    ) -> Result<bool, HashingError> {
        let phc = hash.as_phc().to_string();

        self.run_blocking(move || {
            let parsed = password_hash::PasswordHash::new(&phc)
                .map_err(|e| HashingError::MalformedHash(e.to_string()))?;

            match Argon2::default().verify_password(password.expose_secret().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(HashingError::Hash(e.to_string())),
            }
        })
        .await?
    }
}
