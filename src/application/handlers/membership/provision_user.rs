//! ProvisionUserHandler - Command handler for creating a member account from a paid order.
//!
//! Each successful order provisions at most one user. The order is claimed
//! with a conditional write before the user is stored; if storing the user
//! fails, the claim is released so the payment can be used again.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{Email, UserId};
use crate::domain::membership::{Profile, ProvisioningError, PublicUser, User};
use crate::domain::payment::{Order, Plan};
use crate::ports::{CredentialHasher, OrderRepository, UserRepository};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Command to provision a member account.
#[derive(Debug, Clone)]
pub struct ProvisionUserCommand {
    pub email: String,
    pub password: SecretString,
    pub plan: String,
    /// Defaults to the name given at checkout.
    pub name: Option<String>,
    /// Defaults to the phone given at checkout.
    pub phone: Option<String>,
    pub profile: Profile,
}

/// Result of successful provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionUserResult {
    pub user: PublicUser,
    pub order: Order,
}

pub struct ProvisionUserHandler {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl ProvisionUserHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            orders,
            users,
            hasher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProvisionUserCommand,
    ) -> Result<ProvisionUserResult, ProvisioningError> {
        // 1. Validate input
        let email = Email::parse(&cmd.email)?;
        let plan: Plan = cmd.plan.parse()?;
        validate_password(&cmd.password)?;
        cmd.profile.validate()?;

        // 2. Reject existing accounts
        if self.users.exists_by_email(&email).await? {
            return Err(ProvisioningError::user_exists(email.as_str()));
        }

        // 3. There must be a paid, unclaimed order for this email and plan
        let candidates = self.orders.find_claimable(&email, plan).await?;
        if candidates.is_empty() {
            return Err(ProvisioningError::no_valid_payment(email.as_str(), plan));
        }

        // 4. Hash before claiming so a hashing failure never holds a claim
        let password_hash = self
            .hasher
            .hash(cmd.password)
            .await
            .map_err(|e| ProvisioningError::Hashing(e.to_string()))?;

        // 5. Claim the oldest order still available
        let user_id = UserId::new();
        let mut claimed = None;
        for candidate in candidates {
            if self.orders.claim_for_user(&candidate.id, &user_id).await? {
                claimed = Some(candidate);
                break;
            }
            tracing::debug!(order_id = %candidate.id, "Order claimed concurrently, trying next");
        }
        let Some(mut order) = claimed else {
            tracing::warn!(email = %email.as_str(), plan = %plan, "Lost every provisioning claim");
            return Err(ProvisioningError::no_valid_payment(email.as_str(), plan));
        };

        // 6. Store the user, releasing the claim on failure
        let name = cmd
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| order.contact.name.clone());
        let phone = cmd
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .or_else(|| order.contact.phone.clone());

        let user = User::provision(
            user_id,
            email,
            name,
            phone,
            cmd.profile,
            plan,
            password_hash,
        );

        if let Err(e) = self.users.save(&user).await {
            tracing::error!(
                user_id = %user_id,
                order_id = %order.id,
                error = %e,
                "Failed to store user, releasing order claim"
            );
            if let Err(release_err) = self.orders.release_claim(&order.id, &user_id).await {
                tracing::error!(
                    order_id = %order.id,
                    error = %release_err,
                    "Failed to release order claim"
                );
            }
            return Err(e.into());
        }

        order.user_id = Some(user_id);
        tracing::info!(
            user_id = %user_id,
            order_id = %order.id,
            plan = %plan,
            "User provisioned"
        );

        Ok(ProvisionUserResult {
            user: user.to_public(),
            order,
        })
    }
}

fn validate_password(password: &SecretString) -> Result<(), ProvisioningError> {
    let len = password.expose_secret().chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(ProvisioningError::validation(
            "password",
            format!(
                "must be between {} and {} characters",
                MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crypto::Argon2CredentialHasher;
    use crate::adapters::memory::{InMemoryOrderRepository, InMemoryUserRepository};
    use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
    use crate::domain::payment::Contact;
    use crate::ports::PaymentOutcome;

    struct Fixture {
        handler: Arc<ProvisionUserHandler>,
        orders: InMemoryOrderRepository,
        users: InMemoryUserRepository,
    }

    fn fixture() -> Fixture {
        let orders = InMemoryOrderRepository::new();
        let users = InMemoryUserRepository::new();
        let handler = ProvisionUserHandler::new(
            Arc::new(orders.clone()),
            Arc::new(users.clone()),
            Arc::new(Argon2CredentialHasher::new(2)),
        );
        Fixture {
            handler: Arc::new(handler),
            orders,
            users,
        }
    }

    async fn paid_order(orders: &InMemoryOrderRepository, email: &str, plan: Plan) -> Order {
        let order = Order::create_pending(
            OrderId::new(),
            Contact::new("Asha Kumar", email, Some("+91 98765 43210")).unwrap(),
            plan,
            format!("order_{}", OrderId::new().as_uuid().simple()),
        );
        orders.save(&order).await.unwrap();
        orders
            .complete_pending(
                &order.id,
                PaymentOutcome::Succeeded {
                    provider_payment_id: "pay_1".to_string(),
                },
            )
            .await
            .unwrap();
        orders.find_by_id(&order.id).await.unwrap().unwrap()
    }

    fn command(email: &str, plan: &str) -> ProvisionUserCommand {
        ProvisionUserCommand {
            email: email.to_string(),
            password: SecretString::new("hunter2hunter2".to_string()),
            plan: plan.to_string(),
            name: None,
            phone: None,
            profile: Profile {
                age: Some(29),
                goal: Some("Run a half marathon".to_string()),
                ..Profile::default()
            },
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Cases
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn provisions_active_member_and_links_order() {
        let f = fixture();
        let order = paid_order(&f.orders, "asha@example.com", Plan::Ultimate).await;

        let result = f
            .handler
            .handle(command("asha@example.com", "ULTIMATE"))
            .await
            .unwrap();

        assert!(result.user.membership.active);
        assert_eq!(result.user.membership.plan, Plan::Ultimate);
        assert_eq!(result.user.name, "Asha Kumar");
        assert_eq!(result.user.phone.as_deref(), Some("+91 98765 43210"));

        let stored = f.orders.find_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, Some(result.user.id));
        assert_eq!(result.order.user_id, Some(result.user.id));
    }

    #[tokio::test]
    async fn explicit_name_overrides_checkout_contact() {
        let f = fixture();
        paid_order(&f.orders, "asha@example.com", Plan::Standard).await;

        let mut cmd = command("asha@example.com", "standard");
        cmd.name = Some("A. Kumar".to_string());
        let result = f.handler.handle(cmd).await.unwrap();
        assert_eq!(result.user.name, "A. Kumar");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Cases
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn second_provisioning_is_user_exists() {
        let f = fixture();
        paid_order(&f.orders, "asha@example.com", Plan::Standard).await;
        paid_order(&f.orders, "asha@example.com", Plan::Standard).await;

        f.handler
            .handle(command("asha@example.com", "STANDARD"))
            .await
            .unwrap();
        let err = f
            .handler
            .handle(command("asha@example.com", "STANDARD"))
            .await
            .unwrap_err();
        assert_eq!(err, ProvisioningError::user_exists("asha@example.com"));
    }

    #[tokio::test]
    async fn no_paid_order_is_no_valid_payment() {
        let f = fixture();
        paid_order(&f.orders, "asha@example.com", Plan::Standard).await;

        let err = f
            .handler
            .handle(command("asha@example.com", "PROFESSIONAL"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProvisioningError::no_valid_payment("asha@example.com", Plan::Professional)
        );
        assert_eq!(f.users.count().await, 0);
    }

    #[tokio::test]
    async fn pending_order_is_not_enough() {
        let f = fixture();
        let order = Order::create_pending(
            OrderId::new(),
            Contact::new("Asha", "asha@example.com", None).unwrap(),
            Plan::Standard,
            "order_pending",
        );
        f.orders.save(&order).await.unwrap();

        let err = f
            .handler
            .handle(command("asha@example.com", "STANDARD"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisioningError::NoValidPayment { .. }));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let f = fixture();
        let mut cmd = command("asha@example.com", "STANDARD");
        cmd.password = SecretString::new("short".to_string());

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, ProvisioningError::ValidationFailed { ref field, .. } if field == "password"));
    }

    #[tokio::test]
    async fn implausible_profile_is_rejected() {
        let f = fixture();
        let mut cmd = command("asha@example.com", "STANDARD");
        cmd.profile.age = Some(4);

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, ProvisioningError::ValidationFailed { ref field, .. } if field == "age"));
    }

    #[tokio::test]
    async fn failed_user_save_releases_claim() {
        let f = fixture();
        let order = paid_order(&f.orders, "asha@example.com", Plan::Standard).await;
        f.users
            .fail_next_save(DomainError::new(ErrorCode::DatabaseError, "disk full"))
            .await;

        let err = f
            .handler
            .handle(command("asha@example.com", "STANDARD"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisioningError::Infrastructure(_)));

        let stored = f.orders.find_by_id(&order.id).await.unwrap().unwrap();
        assert!(stored.is_claimable());

        // the released order can still be used
        assert!(f
            .handler
            .handle(command("asha@example.com", "STANDARD"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn concurrent_provisioning_creates_exactly_one_user() {
        let f = fixture();
        let order = paid_order(&f.orders, "asha@example.com", Plan::Standard).await;

        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let handler = f.handler.clone();
                tokio::spawn(async move {
                    handler.handle(command("asha@example.com", "STANDARD")).await
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(
                    e,
                    ProvisioningError::UserExists(_) | ProvisioningError::NoValidPayment { .. }
                )),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(f.users.count().await, 1);
        let stored = f.orders.find_by_id(&order.id).await.unwrap().unwrap();
        assert!(stored.user_id.is_some());
    }
}
