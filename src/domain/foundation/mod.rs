//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types used by the payment and membership domains.

mod email;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use email::Email;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
