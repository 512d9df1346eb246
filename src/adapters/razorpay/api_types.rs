//! Razorpay Orders API wire types.
//!
//! Only the fields this service reads are modeled. Razorpay answers every
//! call with either the created entity or an `{"error": {...}}` envelope, so
//! responses deserialize into an untagged union.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /v1/orders`.
#[derive(Debug, Serialize)]
pub struct RazorpayOrderRequest<'a> {
    /// Amount in paise.
    pub amount: u64,
    pub currency: &'a str,
    pub receipt: &'a str,
    #[serde(skip_serializing_if = "no_notes")]
    pub notes: &'a HashMap<String, String>,
}

fn no_notes(notes: &&HashMap<String, String>) -> bool {
    notes.is_empty()
}

/// Response of `POST /v1/orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RazorpayOrderResponse {
    Created(RazorpayOrder),
    Failed(RazorpayErrorEnvelope),
}

/// Order entity.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub status: String,

    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub amount_paid: Option<u64>,
    #[serde(default)]
    pub amount_due: Option<u64>,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorEnvelope {
    pub error: RazorpayErrorBody,
}

/// Error detail, e.g. `{"code": "BAD_REQUEST_ERROR", "description": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RazorpayErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl RazorpayErrorBody {
    pub fn summary(&self) -> String {
        match (&self.description, &self.field) {
            (Some(description), Some(field)) => format!("{} (field: {})", description, field),
            (Some(description), None) => description.clone(),
            (None, _) => self
                .code
                .clone()
                .unwrap_or_else(|| "unknown provider error".to_string()),
        }
    }
}
