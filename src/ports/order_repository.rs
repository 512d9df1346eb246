//! Order repository port.
//!
//! Persists Order aggregates. The two state changes after creation are
//! conditional writes so that concurrent requests cannot both win:
//!
//! - `complete_pending` only touches an order whose status is still `pending`
//! - `claim_for_user` only touches a `success` order whose `user_id` is unset
//!
//! Both report whether the write happened; a `false` means another request
//! got there first.

use crate::domain::foundation::{DomainError, Email, OrderId, Timestamp, UserId};
use crate::domain::payment::{Order, Plan};
use async_trait::async_trait;

/// Terminal outcome applied to a pending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded { provider_payment_id: String },
    Failed,
}

/// Repository port for Order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save a new order.
    ///
    /// # Errors
    ///
    /// - `OrderExists` if the id or provider order id is already stored
    /// - `DatabaseError` on persistence failure
    async fn save(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its id.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Find an order by the provider's order id.
    async fn find_by_provider_order_id(
        &self,
        provider_order_id: &str,
    ) -> Result<Option<Order>, DomainError>;

    /// Move a pending order to its terminal status.
    ///
    /// Returns `false` without writing if the order is no longer pending.
    async fn complete_pending(
        &self,
        id: &OrderId,
        outcome: PaymentOutcome,
    ) -> Result<bool, DomainError>;

    /// Paid, unclaimed orders for this contact email and plan, oldest first.
    async fn find_claimable(&self, email: &Email, plan: Plan) -> Result<Vec<Order>, DomainError>;

    /// Set `user_id` on a paid order that has none.
    ///
    /// Returns `false` without writing if the order is not claimable.
    async fn claim_for_user(&self, id: &OrderId, user_id: &UserId) -> Result<bool, DomainError>;

    /// Undo a claim held by `user_id` after account creation failed.
    async fn release_claim(&self, id: &OrderId, user_id: &UserId) -> Result<(), DomainError>;

    /// Orders still pending that were created before `older_than`.
    async fn find_stale_pending(&self, older_than: Timestamp) -> Result<Vec<Order>, DomainError>;
}
