//! Credential hashing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Password hashing limits
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Maximum concurrent argon2 computations on the blocking pool
    #[serde(default = "default_max_hashing_threads")]
    pub max_hashing_threads: usize,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_hashing_threads == 0 || self.max_hashing_threads > 64 {
            return Err(ValidationError::InvalidHashingThreads);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_hashing_threads: default_max_hashing_threads(),
        }
    }
}

fn default_max_hashing_threads() -> usize {
    4
}
