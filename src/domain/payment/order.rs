//! Order aggregate - a payment intent for one membership plan.
//!
//! # Lifecycle
//!
//! ```text
//! create_pending ──► Pending ──confirm──► Success ──claim──► Success + user_id
//!                        │
//!                        └──fail──► Failed
//! ```
//!
//! Orders are never deleted. The amount is always derived from the plan.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Email, OrderId, StateMachine, Timestamp, UserId, ValidationError};

use super::plan::CURRENCY;
use super::{OrderStatus, Plan};

const MAX_NAME_LEN: usize = 100;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
}

impl Contact {
    /// Validates and normalizes checkout contact details.
    ///
    /// A blank phone is treated as absent.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        phone: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let name_len = name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(ValidationError::length_out_of_range("name", 1, MAX_NAME_LEN, name_len));
        }

        let email = Email::parse(email)?;

        let phone = match phone.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(validate_phone(raw)?),
        };

        Ok(Self {
            name: name.to_string(),
            email,
            phone,
        })
    }
}

fn validate_phone(raw: &str) -> Result<String, ValidationError> {
    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::invalid_format("phone", "unexpected characters"));
    }
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::length_out_of_range(
            "phone",
            MIN_PHONE_DIGITS,
            MAX_PHONE_DIGITS,
            digits,
        ));
    }
    Ok(raw.to_string())
}

/// Order aggregate.
///
/// # Invariants
///
/// - `amount == plan.price()`
/// - `provider_order_id` is set before the order is persisted
/// - `provider_payment_id` is set only when `status == Success`
/// - `user_id` is set at most once, and only on a `Success` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub contact: Contact,
    pub plan: Plan,

    /// Whole currency units.
    pub amount: u32,
    pub currency: String,
    pub receipt: String,

    pub provider_order_id: String,
    pub provider_payment_id: Option<String>,
    pub status: OrderStatus,

    /// Provisioning claim and back-link to the created user.
    pub user_id: Option<UserId>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Receipt sent to the provider for the order with this id.
    pub fn receipt_for(id: &OrderId) -> String {
        format!("rcpt_{}", id.as_uuid().simple())
    }

    /// Creates a pending order once the provider has issued its order id.
    pub fn create_pending(
        id: OrderId,
        contact: Contact,
        plan: Plan,
        provider_order_id: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            receipt: Self::receipt_for(&id),
            id,
            contact,
            plan,
            amount: plan.price(),
            currency: CURRENCY.to_string(),
            provider_order_id: provider_order_id.into(),
            provider_payment_id: None,
            status: OrderStatus::Pending,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the payment confirmed.
    pub fn confirm(&mut self, provider_payment_id: impl Into<String>) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(OrderStatus::Success)?;
        self.provider_payment_id = Some(provider_payment_id.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks the payment failed.
    pub fn fail(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(OrderStatus::Failed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Paid and not yet used to provision a user.
    pub fn is_claimable(&self) -> bool {
        self.status == OrderStatus::Success && self.user_id.is_none()
    }

    /// Records the provisioning claim.
    pub fn claim(&mut self, user_id: UserId) -> Result<(), ValidationError> {
        if !self.is_claimable() {
            return Err(ValidationError::invalid_format(
                "user_id",
                format!("order {} is not claimable", self.id),
            ));
        }
        self.user_id = Some(user_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Amount in the provider's minor units.
    pub fn amount_minor_units(&self) -> u64 {
        self.plan.price_minor_units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> Contact {
        Contact::new("Asha Kumar", "asha@example.com", Some("+91 98765 43210")).unwrap()
    }

    fn pending(plan: Plan) -> Order {
        Order::create_pending(OrderId::new(), contact(), plan, "order_Prov123")
    }

    // ══════════════════════════════════════════════════════════════
    // Contact
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn contact_trims_name_and_normalizes_email() {
        let c = Contact::new("  Asha ", "Asha@Example.com", None).unwrap();
        assert_eq!(c.name, "Asha");
        assert_eq!(c.email.as_str(), "asha@example.com");
        assert_eq!(c.phone, None);
    }

    #[test]
    fn contact_rejects_empty_name() {
        assert_eq!(
            Contact::new("   ", "a@b.co", None),
            Err(ValidationError::empty_field("name"))
        );
    }

    #[test]
    fn contact_rejects_bad_email() {
        let err = Contact::new("Asha", "not-an-email", None).unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn contact_blank_phone_is_absent() {
        let c = Contact::new("Asha", "a@b.co", Some("  ")).unwrap();
        assert_eq!(c.phone, None);
    }

    #[test]
    fn contact_rejects_short_or_garbled_phone() {
        assert_eq!(Contact::new("Asha", "a@b.co", Some("12345")).unwrap_err().field(), "phone");
        assert_eq!(Contact::new("Asha", "a@b.co", Some("call me")).unwrap_err().field(), "phone");
    }

    // ══════════════════════════════════════════════════════════════
    // Order lifecycle
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn create_pending_derives_amount_from_plan() {
        for plan in Plan::ALL {
            let order = pending(plan);
            assert_eq!(order.amount, plan.price());
            assert_eq!(order.currency, "INR");
            assert_eq!(order.status, OrderStatus::Pending);
            assert!(order.provider_payment_id.is_none());
            assert!(order.user_id.is_none());
        }
    }

    #[test]
    fn receipt_is_derived_from_order_id() {
        let order = pending(Plan::Standard);
        assert!(order.receipt.starts_with("rcpt_"));
        assert_eq!(order.receipt.len(), 37);
        assert_eq!(order.receipt, Order::receipt_for(&order.id));
    }

    #[test]
    fn confirm_sets_payment_id() {
        let mut order = pending(Plan::Ultimate);
        order.confirm("pay_1").unwrap();
        assert_eq!(order.status, OrderStatus::Success);
        assert_eq!(order.provider_payment_id.as_deref(), Some("pay_1"));
    }

    #[test]
    fn confirm_twice_fails() {
        let mut order = pending(Plan::Ultimate);
        order.confirm("pay_1").unwrap();
        assert!(order.confirm("pay_2").is_err());
        assert_eq!(order.provider_payment_id.as_deref(), Some("pay_1"));
    }

    #[test]
    fn failed_order_cannot_be_confirmed() {
        let mut order = pending(Plan::Standard);
        order.fail().unwrap();
        assert!(order.confirm("pay_1").is_err());
        assert_eq!(order.status, OrderStatus::Failed);
    }

    #[test]
    fn only_paid_unclaimed_orders_are_claimable() {
        let mut order = pending(Plan::Professional);
        assert!(!order.is_claimable());

        order.confirm("pay_1").unwrap();
        assert!(order.is_claimable());

        order.claim(UserId::new()).unwrap();
        assert!(!order.is_claimable());
        assert!(order.claim(UserId::new()).is_err());
    }

    #[test]
    fn amount_minor_units_matches_plan() {
        assert_eq!(pending(Plan::Ultimate).amount_minor_units(), 199_900);
    }
}
