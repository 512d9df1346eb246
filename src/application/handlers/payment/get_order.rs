//! GetOrderHandler - Query handler for polling an order after checkout.

use std::sync::Arc;

use crate::domain::payment::{Order, OrderError};
use crate::ports::OrderRepository;

#[derive(Debug, Clone)]
pub struct GetOrderQuery {
    pub provider_order_id: String,
}

#[derive(Debug, Clone)]
pub struct GetOrderResult {
    pub order: Order,
}

pub struct GetOrderHandler {
    repository: Arc<dyn OrderRepository>,
}

impl GetOrderHandler {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetOrderQuery) -> Result<GetOrderResult, OrderError> {
        let order = self
            .repository
            .find_by_provider_order_id(&query.provider_order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(&query.provider_order_id))?;

        Ok(GetOrderResult { order })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrderRepository;
    use crate::domain::foundation::OrderId;
    use crate::domain::payment::{Contact, Plan};

    #[tokio::test]
    async fn returns_stored_order() {
        let repo = InMemoryOrderRepository::new();
        let order = Order::create_pending(
            OrderId::new(),
            Contact::new("Asha", "asha@example.com", None).unwrap(),
            Plan::Professional,
            "order_42",
        );
        repo.save(&order).await.unwrap();

        let handler = GetOrderHandler::new(Arc::new(repo));
        let result = handler
            .handle(GetOrderQuery {
                provider_order_id: "order_42".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result.order, order);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let handler = GetOrderHandler::new(Arc::new(InMemoryOrderRepository::new()));
        let err = handler
            .handle(GetOrderQuery {
                provider_order_id: "order_nope".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::not_found("order_nope"));
    }
}
