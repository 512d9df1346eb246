//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_order, get_order, verify_payment, PaymentAppState};

/// Create the payment API router.
///
/// # Routes
///
/// - `POST /create` - Create a provider order for a plan
/// - `POST /verify` - Confirm a payment from the checkout callback
/// - `GET /orders/:provider_order_id` - Poll an order
///
/// Mount at `/payment`.
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/create", post(create_order))
        .route("/verify", post(verify_payment))
        .route("/orders/:provider_order_id", get(get_order))
}
