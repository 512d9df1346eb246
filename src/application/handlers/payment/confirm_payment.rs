//! ConfirmPaymentHandler - Command handler for checkout completion callbacks.
//!
//! The client posts the provider's order id, payment id and signature after
//! checkout. A valid signature moves the order to `success`; an invalid one
//! moves it to `failed`. Either transition happens at most once.

use std::sync::Arc;

use crate::domain::payment::{Order, OrderError};
use crate::ports::{OrderRepository, PaymentOutcome, PaymentProvider};

/// Command to confirm a payment.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub provider_order_id: String,
    pub provider_payment_id: String,
    pub signature: String,
}

/// Result of a confirmed payment.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentResult {
    pub order: Order,
}

pub struct ConfirmPaymentHandler {
    repository: Arc<dyn OrderRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl ConfirmPaymentHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmPaymentCommand,
    ) -> Result<ConfirmPaymentResult, OrderError> {
        if cmd.provider_order_id.trim().is_empty() {
            return Err(OrderError::validation("providerOrderId", "is required"));
        }
        if cmd.provider_payment_id.trim().is_empty() {
            return Err(OrderError::validation("providerPaymentId", "is required"));
        }

        // 1. Find the order
        let order = self
            .repository
            .find_by_provider_order_id(&cmd.provider_order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(&cmd.provider_order_id))?;

        // 2. Terminal orders are left untouched
        if !order.is_pending() {
            tracing::warn!(
                order_id = %order.id,
                provider_order_id = %order.provider_order_id,
                status = %order.status,
                "Confirmation for finalized order ignored"
            );
            return Err(OrderError::already_finalized(
                &order.provider_order_id,
                order.status,
            ));
        }

        // 3. Verify the signature
        let valid = self.payment_provider.verify_payment(
            &cmd.provider_order_id,
            &cmd.provider_payment_id,
            &cmd.signature,
        );

        if !valid {
            let failed = self
                .repository
                .complete_pending(&order.id, PaymentOutcome::Failed)
                .await?;
            tracing::warn!(
                order_id = %order.id,
                provider_order_id = %order.provider_order_id,
                marked_failed = failed,
                "Payment signature mismatch"
            );
            return Err(OrderError::InvalidSignature);
        }

        // 4. Conditional pending -> success
        let won = self
            .repository
            .complete_pending(
                &order.id,
                PaymentOutcome::Succeeded {
                    provider_payment_id: cmd.provider_payment_id.clone(),
                },
            )
            .await?;

        let current = self
            .repository
            .find_by_id(&order.id)
            .await?
            .ok_or_else(|| OrderError::not_found(&order.provider_order_id))?;

        if !won {
            tracing::warn!(
                order_id = %order.id,
                status = %current.status,
                "Lost confirmation race"
            );
            return Err(OrderError::already_finalized(
                &current.provider_order_id,
                current.status,
            ));
        }

        tracing::info!(
            order_id = %current.id,
            provider_order_id = %current.provider_order_id,
            provider_payment_id = %cmd.provider_payment_id,
            "Payment confirmed"
        );

        Ok(ConfirmPaymentResult { order: current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrderRepository;
    use crate::adapters::razorpay::MockPaymentProvider;
    use crate::domain::foundation::OrderId;
    use crate::domain::payment::{Contact, OrderStatus, Plan};

    struct Fixture {
        handler: ConfirmPaymentHandler,
        repo: InMemoryOrderRepository,
        provider: MockPaymentProvider,
        order: Order,
    }

    async fn fixture() -> Fixture {
        let repo = InMemoryOrderRepository::new();
        let provider = MockPaymentProvider::new();
        let order = Order::create_pending(
            OrderId::new(),
            Contact::new("Asha", "asha@example.com", None).unwrap(),
            Plan::Standard,
            "order_mock_1",
        );
        repo.save(&order).await.unwrap();

        Fixture {
            handler: ConfirmPaymentHandler::new(Arc::new(repo.clone()), Arc::new(provider.clone())),
            repo,
            provider,
            order,
        }
    }

    fn command(f: &Fixture, payment_id: &str) -> ConfirmPaymentCommand {
        ConfirmPaymentCommand {
            provider_order_id: f.order.provider_order_id.clone(),
            provider_payment_id: payment_id.to_string(),
            signature: f.provider.sign(&f.order.provider_order_id, payment_id),
        }
    }

    #[tokio::test]
    async fn valid_signature_marks_order_success() {
        let f = fixture().await;
        let result = f.handler.handle(command(&f, "pay_1")).await.unwrap();

        assert_eq!(result.order.status, OrderStatus::Success);
        assert_eq!(result.order.provider_payment_id.as_deref(), Some("pay_1"));
        assert!(result.order.is_claimable());
    }

    #[tokio::test]
    async fn invalid_signature_marks_order_failed() {
        let f = fixture().await;
        let mut cmd = command(&f, "pay_1");
        cmd.signature = f.provider.sign(&f.order.provider_order_id, "pay_other");

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, OrderError::InvalidSignature);

        let stored = f.repo.find_by_id(&f.order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Failed);
        assert!(stored.provider_payment_id.is_none());
    }

    #[tokio::test]
    async fn second_confirmation_is_already_finalized() {
        let f = fixture().await;
        f.handler.handle(command(&f, "pay_1")).await.unwrap();

        let err = f.handler.handle(command(&f, "pay_1")).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::already_finalized("order_mock_1", OrderStatus::Success)
        );

        let stored = f.repo.find_by_id(&f.order.id).await.unwrap().unwrap();
        assert_eq!(stored.provider_payment_id.as_deref(), Some("pay_1"));
    }

    #[tokio::test]
    async fn failed_order_cannot_be_confirmed_later() {
        let f = fixture().await;
        let mut bad = command(&f, "pay_1");
        bad.signature = "00".repeat(32);
        assert!(f.handler.handle(bad).await.is_err());

        let err = f.handler.handle(command(&f, "pay_1")).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::already_finalized("order_mock_1", OrderStatus::Failed)
        );
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let f = fixture().await;
        let mut cmd = command(&f, "pay_1");
        cmd.provider_order_id = "order_missing".to_string();

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, OrderError::not_found("order_missing"));
        assert_eq!(f.provider.call_count("verify_payment"), 0);
    }

    #[tokio::test]
    async fn missing_payment_id_is_validation_error() {
        let f = fixture().await;
        let cmd = ConfirmPaymentCommand {
            provider_order_id: f.order.provider_order_id.clone(),
            provider_payment_id: " ".to_string(),
            signature: "ab".to_string(),
        };
        assert!(matches!(
            f.handler.handle(cmd).await.unwrap_err(),
            OrderError::ValidationFailed { .. }
        ));
    }

    #[tokio::test]
    async fn concurrent_confirmations_transition_once() {
        let f = fixture().await;
        let handler = Arc::new(f.handler);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = handler.clone();
                let cmd = ConfirmPaymentCommand {
                    provider_order_id: f.order.provider_order_id.clone(),
                    provider_payment_id: "pay_1".to_string(),
                    signature: f.provider.sign(&f.order.provider_order_id, "pay_1"),
                };
                tokio::spawn(async move { handler.handle(cmd).await })
            })
            .collect();

        let mut successes = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(matches!(e, OrderError::AlreadyFinalized { .. })),
            }
        }
        assert_eq!(successes, 1);
    }
}
