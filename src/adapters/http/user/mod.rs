//! Member account HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{UserApiError, UserAppState};
pub use routes::user_routes;
