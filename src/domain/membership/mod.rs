//! Membership domain - member accounts provisioned from paid orders.

mod errors;
mod user;

pub use errors::ProvisioningError;
pub use user::{Membership, PasswordHash, Profile, PublicUser, User};
