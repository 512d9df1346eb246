//! Payment handlers.
//!
//! ## Commands
//! - Creating a provider-backed order for a plan
//! - Confirming a payment from the provider's checkout callback
//!
//! ## Queries
//! - Get an order by provider order id
//! - List orders left pending too long

mod confirm_payment;
mod create_order;
mod get_order;
mod list_stale_orders;

// Commands
pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};

// Queries
pub use get_order::{GetOrderHandler, GetOrderQuery, GetOrderResult};
pub use list_stale_orders::{
    ListStaleOrdersHandler, ListStaleOrdersQuery, ListStaleOrdersResult,
};
