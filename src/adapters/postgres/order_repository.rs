//! PostgreSQL implementation of OrderRepository.
//!
//! Status changes and provisioning claims are single conditional `UPDATE`s;
//! `rows_affected` tells the caller whether it won.

use crate::domain::foundation::{
    DomainError, Email, ErrorCode, OrderId, Timestamp, UserId,
};
use crate::domain::payment::{Contact, Order, OrderStatus, Plan};
use crate::ports::{OrderRepository, PaymentOutcome};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const ORDER_COLUMNS: &str = r#"
    id, contact_name, contact_email, contact_phone, plan, amount, currency, receipt,
    provider_order_id, provider_payment_id, status, user_id, created_at, updated_at
"#;

/// PostgreSQL implementation of the OrderRepository port.
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    contact_name: String,
    contact_email: String,
    contact_phone: Option<String>,
    plan: String,
    amount: i64,
    currency: String,
    receipt: String,
    provider_order_id: String,
    provider_payment_id: Option<String>,
    status: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let plan: Plan = row
            .plan
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid plan value: {}", e)))?;
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid status value: {}", e)))?;
        let email = Email::parse(&row.contact_email)
            .map_err(|e| DomainError::database(format!("Invalid contact email: {}", e)))?;
        let amount = u32::try_from(row.amount)
            .map_err(|_| DomainError::database(format!("Invalid amount: {}", row.amount)))?;

        Ok(Order {
            id: OrderId::from_uuid(row.id),
            contact: Contact {
                name: row.contact_name,
                email,
                phone: row.contact_phone,
            },
            plan,
            amount,
            currency: row.currency,
            receipt: row.receipt,
            provider_order_id: row.provider_order_id,
            provider_payment_id: row.provider_payment_id,
            status,
            user_id: row.user_id.map(UserId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn query_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, contact_name, contact_email, contact_phone, plan, amount, currency, receipt,
                provider_order_id, provider_payment_id, status, user_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.contact.name)
        .bind(order.contact.email.as_str())
        .bind(&order.contact.phone)
        .bind(order.plan.as_str())
        .bind(i64::from(order.amount))
        .bind(&order.currency)
        .bind(&order.receipt)
        .bind(&order.provider_order_id)
        .bind(&order.provider_payment_id)
        .bind(order.status.as_str())
        .bind(order.user_id.map(|u| *u.as_uuid()))
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if matches!(
                    db_err.constraint(),
                    Some("orders_provider_order_id_key") | Some("orders_pkey")
                ) {
                    return DomainError::new(ErrorCode::OrderExists, "Order already exists")
                        .with_detail("provider_order_id", order.provider_order_id.clone());
                }
            }
            query_error("Failed to save order", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let sql = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch order", e))?;

        row.map(Order::try_from).transpose()
    }

    async fn find_by_provider_order_id(
        &self,
        provider_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        let sql = format!(
            "SELECT {} FROM orders WHERE provider_order_id = $1",
            ORDER_COLUMNS
        );
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(provider_order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch order", e))?;

        row.map(Order::try_from).transpose()
    }

    async fn complete_pending(
        &self,
        id: &OrderId,
        outcome: PaymentOutcome,
    ) -> Result<bool, DomainError> {
        let (status, payment_id) = match outcome {
            PaymentOutcome::Succeeded {
                provider_payment_id,
            } => (OrderStatus::Success, Some(provider_payment_id)),
            PaymentOutcome::Failed => (OrderStatus::Failed, None),
        };

        let result = sqlx::query(
            r#"
            UPDATE orders
               SET status = $2, provider_payment_id = $3, updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(payment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to complete order", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_claimable(&self, email: &Email, plan: Plan) -> Result<Vec<Order>, DomainError> {
        let sql = format!(
            r#"SELECT {} FROM orders
                WHERE contact_email = $1 AND plan = $2
                  AND status = 'success' AND user_id IS NULL
                ORDER BY created_at ASC"#,
            ORDER_COLUMNS
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(email.as_str())
            .bind(plan.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch claimable orders", e))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn claim_for_user(&self, id: &OrderId, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
               SET user_id = $2, updated_at = NOW()
             WHERE id = $1 AND status = 'success' AND user_id IS NULL
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to claim order", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_claim(&self, id: &OrderId, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE orders
               SET user_id = NULL, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to release order claim", e))?;

        Ok(())
    }

    async fn find_stale_pending(&self, older_than: Timestamp) -> Result<Vec<Order>, DomainError> {
        let sql = format!(
            r#"SELECT {} FROM orders
                WHERE status = 'pending' AND created_at < $1
                ORDER BY created_at ASC"#,
            ORDER_COLUMNS
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(older_than.as_datetime())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch stale orders", e))?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
