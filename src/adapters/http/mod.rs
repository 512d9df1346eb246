//! HTTP adapters - REST API implementations.
//!
//! Each module has its own router and state; `router` mounts them together
//! with the cross-cutting layers.

pub mod error;
pub mod payment;
pub mod user;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode};
use axum::{routing::get, BoxError, Json, Router};
use serde_json::{json, Value};
use tower::timeout::error::Elapsed;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::foundation::ErrorCode;

pub use error::ErrorResponse;
pub use payment::{payment_routes, PaymentApiError, PaymentAppState};
pub use user::{user_routes, UserApiError, UserAppState};

/// Builds the full application router.
///
/// # Routes
/// - `GET /health`
/// - `/payment/*` - see [`payment_routes`]
/// - `/user/*` - see [`user_routes`]
pub fn router(payment: PaymentAppState, user: UserAppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/payment", payment_routes().with_state(payment))
        .nest("/user", user_routes().with_state(user))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(server.request_timeout()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Turns a timed-out request into the standard error body.
async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ErrorResponse>) {
    if err.is::<Elapsed>() {
        tracing::warn!("Request timed out");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorResponse::new(
                ErrorCode::RequestTimeout.to_string(),
                "Request timed out",
            )),
        );
    }

    tracing::error!(error = %err, "Unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(
            ErrorCode::InternalError.to_string(),
            "Internal server error",
        )),
    )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
