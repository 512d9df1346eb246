//! Data Transfer Objects for payment HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, Timestamp};
use crate::domain::payment::{Order, OrderStatus, Plan};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a payment order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub plan: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Checkout callback data.
///
/// Accepts both the camelCase names and the provider's own field names.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(alias = "razorpay_payment_id")]
    pub provider_payment_id: String,
    #[serde(alias = "razorpay_order_id")]
    pub provider_order_id: String,
    #[serde(alias = "razorpay_signature")]
    pub supplied_signature: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Order as seen by clients.
///
/// `contact` is only present in the response to the buyer who created the
/// order; the unauthenticated status lookup leaves it out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub provider_order_id: String,
    pub plan: Plan,
    pub amount: u32,
    pub currency: String,
    pub receipt: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactResponse>,
    pub provider_payment_id: Option<String>,
    pub claimed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            claimed: order.user_id.is_some(),
            provider_order_id: order.provider_order_id,
            plan: order.plan,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
            status: order.status,
            contact: Some(ContactResponse {
                name: order.contact.name,
                email: order.contact.email.as_str().to_string(),
                phone: order.contact.phone,
            }),
            provider_payment_id: order.provider_payment_id,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl OrderResponse {
    /// Status view without the buyer's contact details.
    pub fn without_contact(order: Order) -> Self {
        Self {
            contact: None,
            ..Self::from(order)
        }
    }
}

/// `POST /payment/create` response.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: OrderResponse,
    pub amount: u32,
}

/// Confirmed payment summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub order_id: OrderId,
    pub provider_order_id: String,
    pub provider_payment_id: Option<String>,
    pub plan: Plan,
    pub amount: u32,
    pub currency: String,
    pub status: OrderStatus,
}

impl From<Order> for PaymentResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            provider_order_id: order.provider_order_id,
            provider_payment_id: order.provider_payment_id,
            plan: order.plan,
            amount: order.amount,
            currency: order.currency,
            status: order.status,
        }
    }
}

/// `POST /payment/verify` response.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub payment: PaymentResponse,
}

/// `GET /payment/orders/{id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct OrderStatusResponse {
    pub success: bool,
    pub order: OrderResponse,
}
