//! Axum router configuration for member account endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_user, login, UserAppState};

/// Create the member account router.
///
/// # Routes
///
/// - `POST /create` - Provision a member from a paid order
/// - `POST /login` - Check member credentials
///
/// Mount at `/user`.
pub fn user_routes() -> Router<UserAppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/login", post(login))
}
