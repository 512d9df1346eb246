//! In-Memory User Repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Email, ErrorCode};
use crate::domain::membership::User;
use crate::ports::UserRepository;

/// In-memory storage for users, keyed by email
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Email, User>>>,
    save_error: Arc<RwLock<Option<DomainError>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Fail the next `save` with this error (test setup)
    pub async fn fail_next_save(&self, error: DomainError) {
        *self.save_error.write().await = Some(error);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        if let Some(error) = self.save_error.write().await.take() {
            return Err(error);
        }

        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(DomainError::new(ErrorCode::UserExists, "User already exists")
                .with_detail("email", user.email.as_str()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains_key(email))
    }
}
