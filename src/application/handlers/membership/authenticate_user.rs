//! AuthenticateUserHandler - Query handler for member sign-in.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::Email;
use crate::domain::membership::{ProvisioningError, PublicUser};
use crate::ports::{CredentialHasher, UserRepository};

/// Query to check a member's credentials.
#[derive(Debug, Clone)]
pub struct AuthenticateUserQuery {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct AuthenticateUserResult {
    pub user: PublicUser,
}

/// Handler for member sign-in.
///
/// Unknown emails and wrong passwords produce the same error. An unknown
/// email still pays for one hash so both cases take similar time.
pub struct AuthenticateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AuthenticateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(
        &self,
        query: AuthenticateUserQuery,
    ) -> Result<AuthenticateUserResult, ProvisioningError> {
        let Ok(email) = Email::parse(&query.email) else {
            return Err(ProvisioningError::InvalidCredentials);
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.hasher
                .hash(query.password)
                .await
                .map_err(|e| ProvisioningError::Hashing(e.to_string()))?;
            return Err(ProvisioningError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify(query.password, &user.password_hash)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Stored credential could not be checked");
                ProvisioningError::Hashing(e.to_string())
            })?;
        if !matches {
            tracing::debug!(user_id = %user.id, "Wrong password");
            return Err(ProvisioningError::InvalidCredentials);
        }

        if !user.is_active() {
            return Err(ProvisioningError::MembershipInactive);
        }

        Ok(AuthenticateUserResult {
            user: user.to_public(),
        })
    }
}
