//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::{
    // Payment handlers
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult,
    CreateOrderCommand, CreateOrderHandler, CreateOrderResult,
    GetOrderHandler, GetOrderQuery, GetOrderResult,
    ListStaleOrdersHandler, ListStaleOrdersQuery, ListStaleOrdersResult,
    // Membership handlers
    AuthenticateUserHandler, AuthenticateUserQuery, AuthenticateUserResult,
    ProvisionUserCommand, ProvisionUserHandler, ProvisionUserResult,
};
