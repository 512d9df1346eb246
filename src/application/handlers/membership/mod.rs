//! Membership handlers.
//!
//! ## Commands
//! - Provisioning a member account from a paid order
//!
//! ## Queries
//! - Authenticating a member

mod authenticate_user;
mod provision_user;

// Commands
pub use provision_user::{
    ProvisionUserCommand, ProvisionUserHandler, ProvisionUserResult, MAX_PASSWORD_LEN,
    MIN_PASSWORD_LEN,
};

// Queries
pub use authenticate_user::{
    AuthenticateUserHandler, AuthenticateUserQuery, AuthenticateUserResult,
};
