//! PostgreSQL implementation of UserRepository.

use crate::domain::foundation::{DomainError, Email, ErrorCode, Timestamp, UserId};
use crate::domain::membership::{Membership, PasswordHash, Profile, User};
use crate::domain::payment::Plan;
use crate::ports::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    phone: Option<String>,
    profile: Json<Profile>,
    plan: String,
    start_date: DateTime<Utc>,
    active: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let plan: Plan = row
            .plan
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid plan value: {}", e)))?;
        let email = Email::parse(&row.email)
            .map_err(|e| DomainError::database(format!("Invalid email: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email,
            name: row.name,
            phone: row.phone,
            profile: row.profile.0,
            membership: Membership {
                plan,
                start_date: Timestamp::from_datetime(row.start_date),
                active: row.active,
            },
            password_hash: PasswordHash::from_phc(row.password_hash),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, phone, profile, plan, start_date, active, password_hash, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.phone)
        .bind(Json(&user.profile))
        .bind(user.membership.plan.as_str())
        .bind(user.membership.start_date.as_datetime())
        .bind(user.membership.active)
        .bind(user.password_hash.as_phc())
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return DomainError::new(ErrorCode::UserExists, "User already exists")
                        .with_detail("email", user.email.as_str());
                }
            }
            DomainError::database(format!("Failed to save user: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, name, phone, profile, plan, start_date, active, password_hash, created_at
              FROM users
             WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to check user: {}", e)))?;

        Ok(exists)
    }
}
