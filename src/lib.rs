//! Fitness Membership - Payment lifecycle service
//!
//! This crate implements checkout for membership plans: provider order
//! creation, payment signature verification and one-time provisioning of a
//! member account from a confirmed payment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
