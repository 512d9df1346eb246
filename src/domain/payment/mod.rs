//! Payment domain - orders, pricing and provider signature checks.

mod errors;
mod order;
mod plan;
mod signature;
mod status;

pub use errors::OrderError;
pub use order::{Contact, Order};
pub use plan::{Plan, CURRENCY, MINOR_UNITS_PER_UNIT};
pub use signature::{compute_payment_signature, verify_payment_signature};
pub use status::OrderStatus;
