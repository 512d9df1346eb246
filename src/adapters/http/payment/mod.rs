//! Payment HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{PaymentApiError, PaymentAppState};
pub use routes::payment_routes;
