//! In-Memory Order Repository
//!
//! Keeps orders in a map behind a tokio `RwLock`. Conditional updates check
//! and write under one write guard, matching the PostgreSQL adapter's
//! `UPDATE ... WHERE` semantics. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Email, ErrorCode, OrderId, Timestamp, UserId};
use crate::domain::payment::{Order, Plan};
use crate::ports::{OrderRepository, PaymentOutcome};

/// In-memory storage for orders
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Stores an order as-is, bypassing uniqueness checks (test setup)
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        let duplicate = orders.contains_key(&order.id)
            || orders
                .values()
                .any(|o| o.provider_order_id == order.provider_order_id);
        if duplicate {
            return Err(
                DomainError::new(ErrorCode::OrderExists, "Order already exists")
                    .with_detail("provider_order_id", order.provider_order_id.clone()),
            );
        }
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn find_by_provider_order_id(
        &self,
        provider_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .find(|o| o.provider_order_id == provider_order_id)
            .cloned())
    }

    async fn complete_pending(
        &self,
        id: &OrderId,
        outcome: PaymentOutcome,
    ) -> Result<bool, DomainError> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.get_mut(id) else {
            return Ok(false);
        };
        if !order.is_pending() {
            return Ok(false);
        }

        let applied = match outcome {
            PaymentOutcome::Succeeded {
                provider_payment_id,
            } => order.confirm(provider_payment_id),
            PaymentOutcome::Failed => order.fail(),
        };
        Ok(applied.is_ok())
    }

    async fn find_claimable(&self, email: &Email, plan: Plan) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;
        let mut claimable: Vec<Order> = orders
            .values()
            .filter(|o| o.contact.email == *email && o.plan == plan && o.is_claimable())
            .cloned()
            .collect();
        claimable.sort_by_key(|o| o.created_at);
        Ok(claimable)
    }

    async fn claim_for_user(&self, id: &OrderId, user_id: &UserId) -> Result<bool, DomainError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(id) {
            Some(order) => Ok(order.claim(*user_id).is_ok()),
            None => Ok(false),
        }
    }

    async fn release_claim(&self, id: &OrderId, user_id: &UserId) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        if let Some(order) = orders.get_mut(id) {
            if order.user_id == Some(*user_id) {
                order.user_id = None;
                order.updated_at = Timestamp::now();
            }
        }
        Ok(())
    }

    async fn find_stale_pending(&self, older_than: Timestamp) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;
        let mut stale: Vec<Order> = orders
            .values()
            .filter(|o| o.is_pending() && o.created_at.is_before(&older_than))
            .cloned()
            .collect();
        stale.sort_by_key(|o| o.created_at);
        Ok(stale)
    }
}
