//! Ports - interfaces between the application core and the outside world.
//!
//! Application handlers depend only on these traits. Adapters implement them
//! for PostgreSQL, Razorpay, argon2 and in-memory test doubles.

mod credential_hasher;
mod order_repository;
mod payment_provider;
mod user_repository;

pub use credential_hasher::{CredentialHasher, HashingError};
pub use order_repository::{OrderRepository, PaymentOutcome};
pub use payment_provider::{
    CreateProviderOrderRequest, PaymentProvider, ProviderError, ProviderErrorCode, ProviderOrder,
};
pub use user_repository::UserRepository;
