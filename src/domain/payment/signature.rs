//! Razorpay payment signature verification.
//!
//! After checkout the provider hands the client three values: its order id,
//! the payment id, and `HMAC-SHA256(key_secret, "<order_id>|<payment_id>")`
//! hex-encoded. The server recomputes the MAC with its own secret and
//! compares in constant time.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies a provider-supplied payment signature.
///
/// Returns `false` for any mismatch, including a signature that is not valid
/// hex or decodes to the wrong length. Has no side effects.
pub fn verify_payment_signature(
    provider_order_id: &str,
    provider_payment_id: &str,
    supplied_signature: &str,
    secret: &str,
) -> bool {
    let Ok(supplied) = hex::decode(supplied_signature.trim()) else {
        return false;
    };
    let Ok(expected) = payment_mac(provider_order_id, provider_payment_id, secret) else {
        return false;
    };
    constant_time_compare(&expected, &supplied)
}

/// Computes the lowercase hex signature the provider would issue.
///
/// Used by the mock provider and by tests to produce valid fixtures.
pub fn compute_payment_signature(
    provider_order_id: &str,
    provider_payment_id: &str,
    secret: &str,
) -> Result<String, InvalidLength> {
    payment_mac(provider_order_id, provider_payment_id, secret).map(hex::encode)
}

fn payment_mac(
    provider_order_id: &str,
    provider_payment_id: &str,
    secret: &str,
) -> Result<Vec<u8>, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(provider_order_id.as_bytes());
    mac.update(b"|");
    mac.update(provider_payment_id.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
