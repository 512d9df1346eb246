//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, state machine, errors)
//! - `payment` - Orders, the pricing table and provider signature verification
//! - `membership` - Member accounts provisioned from paid orders

pub mod foundation;
pub mod membership;
pub mod payment;
