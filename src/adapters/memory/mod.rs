//! In-memory adapters for tests and local development.

mod order_repository;
mod user_repository;

pub use order_repository::InMemoryOrderRepository;
pub use user_repository::InMemoryUserRepository;
