//! Shared PostgreSQL connection pool.
//!
//! `DatabaseHandle` is created once in `main` and passed to whoever needs a
//! pool. The pool itself is opened on first use and reused afterwards, and is
//! closed explicitly during graceful shutdown.

use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Lazily initialized, explicitly closed database pool.
pub struct DatabaseHandle {
    config: DatabaseConfig,
    pool: OnceCell<PgPool>,
}

impl DatabaseHandle {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Returns the pool, connecting on the first call.
    ///
    /// Concurrent first callers share a single connection attempt. A failed
    /// attempt leaves the handle uninitialized so a later call can retry.
    pub async fn pool(&self) -> Result<&PgPool, DomainError> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!(
                    max_connections = self.config.max_connections,
                    "Connecting to PostgreSQL"
                );
                self.config
                    .pool_options()
                    .connect(&self.config.url)
                    .await
                    .map_err(|e| DomainError::database(format!("Failed to connect: {}", e)))
            })
            .await
    }

    /// Applies the embedded migrations.
    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| DomainError::database(format!("Migration failed: {}", e)))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Closes the pool if it was ever opened. Safe to call more than once.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}
