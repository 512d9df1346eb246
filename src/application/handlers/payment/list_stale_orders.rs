//! ListStaleOrdersHandler - Query handler for orders stuck in `pending`.
//!
//! An order stays pending when the client never posts the checkout callback
//! (abandoned checkout, closed tab, network failure). These are surfaced for
//! reconciliation against the provider dashboard; nothing here mutates them.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{Order, OrderError};
use crate::ports::OrderRepository;

#[derive(Debug, Clone)]
pub struct ListStaleOrdersQuery {
    /// Orders created more than this many minutes ago are stale.
    pub older_than_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct ListStaleOrdersResult {
    /// Oldest first.
    pub orders: Vec<Order>,
}

pub struct ListStaleOrdersHandler {
    repository: Arc<dyn OrderRepository>,
}

impl ListStaleOrdersHandler {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListStaleOrdersQuery,
    ) -> Result<ListStaleOrdersResult, OrderError> {
        if query.older_than_minutes <= 0 {
            return Err(OrderError::validation(
                "older_than_minutes",
                "must be positive",
            ));
        }

        let threshold = Timestamp::now().minus_minutes(query.older_than_minutes);
        let orders = self.repository.find_stale_pending(threshold).await?;

        for order in &orders {
            tracing::warn!(
                order_id = %order.id,
                provider_order_id = %order.provider_order_id,
                created_at = %order.created_at.as_datetime(),
                "Order still pending"
            );
        }

        Ok(ListStaleOrdersResult { orders })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrderRepository;
    use crate::domain::foundation::OrderId;
    use crate::domain::payment::{Contact, Plan};

    fn order(provider_order_id: &str, age_minutes: i64) -> Order {
        let mut order = Order::create_pending(
            OrderId::new(),
            Contact::new("Asha", "asha@example.com", None).unwrap(),
            Plan::Standard,
            provider_order_id,
        );
        order.created_at = Timestamp::now().minus_minutes(age_minutes);
        order
    }

    #[tokio::test]
    async fn lists_only_old_pending_orders() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(order("order_old", 120)).await;
        repo.insert(order("order_fresh", 1)).await;

        let handler = ListStaleOrdersHandler::new(Arc::new(repo));
        let result = handler
            .handle(ListStaleOrdersQuery {
                older_than_minutes: 30,
            })
            .await
            .unwrap();

        assert_eq!(result.orders.len(), 1);
        assert_eq!(result.orders[0].provider_order_id, "order_old");
    }

    #[tokio::test]
    async fn non_positive_threshold_is_rejected() {
        let handler = ListStaleOrdersHandler::new(Arc::new(InMemoryOrderRepository::new()));
        let err = handler
            .handle(ListStaleOrdersQuery {
                older_than_minutes: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ValidationFailed { .. }));
    }
}
