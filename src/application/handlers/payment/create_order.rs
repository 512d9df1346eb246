//! CreateOrderHandler - Command handler for starting a membership checkout.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{Contact, Order, OrderError, Plan, CURRENCY};
use crate::ports::{CreateProviderOrderRequest, OrderRepository, PaymentProvider};

/// Command to create a payment order for a plan.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub plan: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Result of successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: Order,
    /// Whole currency units charged for the plan.
    pub amount: u32,
}

/// Handler for creating payment orders.
///
/// The provider order is created first; the pending order is persisted only
/// once the provider has returned its id. A provider failure leaves nothing
/// behind and is never retried.
pub struct CreateOrderHandler {
    repository: Arc<dyn OrderRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateOrderHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, OrderError> {
        // 1. Validate input; the amount comes from the plan only
        let plan: Plan = cmd
            .plan
            .parse()
            .map_err(|_| OrderError::invalid_plan(cmd.plan.trim()))?;
        let contact = Contact::new(&cmd.name, &cmd.email, cmd.phone.as_deref())?;

        // 2. Create the provider order
        let id = OrderId::new();
        let request = CreateProviderOrderRequest {
            amount_minor: plan.price_minor_units(),
            currency: CURRENCY.to_string(),
            receipt: Order::receipt_for(&id),
            notes: HashMap::from([
                ("plan".to_string(), plan.as_str().to_string()),
                ("email".to_string(), contact.email.as_str().to_string()),
            ]),
        };

        let provider_order = self
            .payment_provider
            .create_order(request)
            .await
            .map_err(|e| {
                tracing::error!(order_id = %id, plan = %plan, error = %e, "Provider order creation failed");
                OrderError::provider(e.to_string())
            })?;

        // 3. Persist the pending order
        let order = Order::create_pending(id, contact, plan, provider_order.id);
        self.repository.save(&order).await.map_err(|e| {
            tracing::error!(
                order_id = %order.id,
                provider_order_id = %order.provider_order_id,
                error = %e,
                "Failed to persist pending order"
            );
            OrderError::from(e)
        })?;

        tracing::info!(
            order_id = %order.id,
            provider_order_id = %order.provider_order_id,
            plan = %plan,
            amount = order.amount,
            "Order created"
        );

        Ok(CreateOrderResult {
            amount: order.amount,
            order,
        })
    }
}
