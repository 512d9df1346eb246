//! User repository port.

use crate::domain::foundation::{DomainError, Email};
use crate::domain::membership::User;
use async_trait::async_trait;

/// Repository port for User persistence.
///
/// Email uniqueness is enforced by the store, not only by callers checking
/// `exists_by_email` first.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `UserExists` (with an `email` detail) on duplicate email
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError>;
}
