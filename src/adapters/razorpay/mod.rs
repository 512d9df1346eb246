//! Razorpay payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Razorpay, including:
//! - Order creation through the Orders API
//! - Local payment signature verification
//!
//! # Configuration
//!
//! Required environment variables:
//! - `FITNESS__PAYMENT__KEY_ID`: Razorpay key id (rzp_test_... / rzp_live_...)
//! - `FITNESS__PAYMENT__KEY_SECRET`: Razorpay key secret

mod api_types;
mod mock_payment_provider;
mod razorpay_adapter;

pub use api_types::{RazorpayErrorBody, RazorpayOrder, RazorpayOrderResponse};
pub use mock_payment_provider::{MethodCall, MockPaymentProvider, MOCK_KEY_SECRET};
pub use razorpay_adapter::{RazorpayConfig, RazorpayPaymentAdapter};
