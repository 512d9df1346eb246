//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `DatabaseHandle` - Lazily opened, explicitly closed connection pool
//! - `PostgresOrderRepository` - Orders with conditional status/claim updates
//! - `PostgresUserRepository` - Member accounts, unique by email

mod database;
mod order_repository;
mod user_repository;

pub use database::DatabaseHandle;
pub use order_repository::PostgresOrderRepository;
pub use user_repository::PostgresUserRepository;
