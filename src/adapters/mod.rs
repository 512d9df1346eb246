//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Order and user repositories backed by PostgreSQL
//! - `memory` - In-memory repositories for tests and local runs
//! - `razorpay` - Payment provider client plus a configurable mock
//! - `crypto` - Argon2 credential hashing
//! - `http` - Axum routes, DTOs and error mapping

pub mod crypto;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;

pub use crypto::Argon2CredentialHasher;
pub use memory::{InMemoryOrderRepository, InMemoryUserRepository};
pub use postgres::{DatabaseHandle, PostgresOrderRepository, PostgresUserRepository};
pub use razorpay::{MockPaymentProvider, RazorpayConfig, RazorpayPaymentAdapter};
