//! HTTP handlers for member account endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use secrecy::SecretString;

use crate::adapters::http::error::{rejection_message, ErrorResponse};
use crate::application::handlers::membership::{
    AuthenticateUserHandler, AuthenticateUserQuery, ProvisionUserCommand, ProvisionUserHandler,
};
use crate::domain::membership::ProvisioningError;
use crate::ports::{CredentialHasher, OrderRepository, UserRepository};

use super::dto::{CreateUserRequest, LoginRequest, UserResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies shared by the member account endpoints.
#[derive(Clone)]
pub struct UserAppState {
    pub order_repository: Arc<dyn OrderRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub credential_hasher: Arc<dyn CredentialHasher>,
}

impl UserAppState {
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        user_repository: Arc<dyn UserRepository>,
        credential_hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            order_repository,
            user_repository,
            credential_hasher,
        }
    }

    pub fn provision_user_handler(&self) -> ProvisionUserHandler {
        ProvisionUserHandler::new(
            self.order_repository.clone(),
            self.user_repository.clone(),
            self.credential_hasher.clone(),
        )
    }

    pub fn authenticate_user_handler(&self) -> AuthenticateUserHandler {
        AuthenticateUserHandler::new(
            self.user_repository.clone(),
            self.credential_hasher.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /user/create - Provision a member from a paid order
pub async fn create_user(
    State(state): State<UserAppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, UserApiError> {
    let Json(request) = payload.map_err(UserApiError::from)?;

    let cmd = ProvisionUserCommand {
        email: request.email,
        password: SecretString::new(request.password),
        plan: request.plan,
        name: request.name,
        phone: request.phone,
        profile: request.profile.into(),
    };
    let result = state.provision_user_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            user: result.user,
        }),
    ))
}

/// POST /user/login - Check member credentials
pub async fn login(
    State(state): State<UserAppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, UserApiError> {
    let Json(request) = payload.map_err(UserApiError::from)?;

    let query = AuthenticateUserQuery {
        email: request.email,
        password: SecretString::new(request.password),
    };
    let result = state.authenticate_user_handler().handle(query).await?;

    Ok(Json(UserResponse {
        success: true,
        user: result.user,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts provisioning errors to HTTP responses.
#[derive(Debug)]
pub struct UserApiError(ProvisioningError);

impl UserApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ProvisioningError::ValidationFailed { .. } | ProvisioningError::NoValidPayment { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProvisioningError::UserExists(_) => StatusCode::CONFLICT,
            ProvisioningError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ProvisioningError::MembershipInactive => StatusCode::FORBIDDEN,
            ProvisioningError::Hashing(_) | ProvisioningError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ProvisioningError> for UserApiError {
    fn from(err: ProvisioningError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for UserApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ProvisioningError::validation("body", rejection_message(&rejection)))
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "User request failed");
        }

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.client_message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Plan;

    fn status_of(err: ProvisioningError) -> StatusCode {
        UserApiError::from(err).into_response().status()
    }

    #[test]
    fn maps_errors_to_statuses() {
        assert_eq!(
            status_of(ProvisioningError::no_valid_payment("a@b.co", Plan::Standard)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ProvisioningError::user_exists("a@b.co")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ProvisioningError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ProvisioningError::MembershipInactive),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ProvisioningError::Hashing("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
