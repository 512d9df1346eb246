//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod membership;
pub mod payment;

pub use membership::{
    AuthenticateUserHandler, AuthenticateUserQuery, AuthenticateUserResult, ProvisionUserCommand,
    ProvisionUserHandler, ProvisionUserResult,
};
pub use payment::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult, CreateOrderCommand,
    CreateOrderHandler, CreateOrderResult, GetOrderHandler, GetOrderQuery, GetOrderResult,
    ListStaleOrdersHandler, ListStaleOrdersQuery, ListStaleOrdersResult,
};
