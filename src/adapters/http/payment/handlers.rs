//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, CreateOrderCommand, CreateOrderHandler,
    GetOrderHandler, GetOrderQuery,
};
use crate::domain::payment::OrderError;
use crate::ports::{OrderRepository, PaymentProvider};

use super::dto::{
    CreateOrderRequest, CreateOrderResponse, OrderResponse, OrderStatusResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::adapters::http::error::{rejection_message, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies shared by the payment endpoints.
#[derive(Clone)]
pub struct PaymentAppState {
    pub order_repository: Arc<dyn OrderRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
}

impl PaymentAppState {
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            order_repository,
            payment_provider,
        }
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.order_repository.clone(), self.payment_provider.clone())
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(self.order_repository.clone(), self.payment_provider.clone())
    }

    pub fn get_order_handler(&self) -> GetOrderHandler {
        GetOrderHandler::new(self.order_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payment/create - Create a provider order for a plan
pub async fn create_order(
    State(state): State<PaymentAppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let Json(request) = payload.map_err(PaymentApiError::from)?;

    let cmd = CreateOrderCommand {
        plan: request.plan,
        name: request.name,
        email: request.email,
        phone: request.phone,
    };
    let result = state.create_order_handler().handle(cmd).await?;

    let response = CreateOrderResponse {
        success: true,
        amount: result.amount,
        order: result.order.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /payment/verify - Confirm a payment from the checkout callback
pub async fn verify_payment(
    State(state): State<PaymentAppState>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let Json(request) = payload.map_err(PaymentApiError::from)?;

    let cmd = ConfirmPaymentCommand {
        provider_order_id: request.provider_order_id,
        provider_payment_id: request.provider_payment_id,
        signature: request.supplied_signature,
    };
    let result = state.confirm_payment_handler().handle(cmd).await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        payment: result.order.into(),
    }))
}

/// GET /payment/orders/{provider_order_id} - Poll an order
pub async fn get_order(
    State(state): State<PaymentAppState>,
    Path(provider_order_id): Path<String>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let result = state
        .get_order_handler()
        .handle(GetOrderQuery { provider_order_id })
        .await
        .map_err(PaymentApiError::lookup)?;

    Ok(Json(OrderStatusResponse {
        success: true,
        order: OrderResponse::without_contact(result.order),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
///
/// A missing order is a bad request on verification but a 404 on lookup.
#[derive(Debug)]
pub struct PaymentApiError {
    error: OrderError,
    not_found_status: StatusCode,
}

impl PaymentApiError {
    pub fn lookup(error: OrderError) -> Self {
        Self {
            error,
            not_found_status: StatusCode::NOT_FOUND,
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            OrderError::InvalidPlan(_)
            | OrderError::ValidationFailed { .. }
            | OrderError::InvalidSignature => StatusCode::BAD_REQUEST,
            OrderError::NotFound(_) => self.not_found_status,
            OrderError::AlreadyFinalized { .. } => StatusCode::CONFLICT,
            OrderError::Provider(_) | OrderError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<OrderError> for PaymentApiError {
    fn from(error: OrderError) -> Self {
        Self {
            error,
            not_found_status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for PaymentApiError {
    fn from(rejection: JsonRejection) -> Self {
        OrderError::validation("body", rejection_message(&rejection)).into()
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "Payment request failed");
        }

        let body = ErrorResponse::new(self.error.code().to_string(), self.error.client_message());
        (status, Json(body)).into_response()
    }
}
