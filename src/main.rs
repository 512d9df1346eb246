//! Fitness membership server binary.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fitness_membership::adapters::http::{router, PaymentAppState, UserAppState};
use fitness_membership::adapters::{
    Argon2CredentialHasher, DatabaseHandle, PostgresOrderRepository, PostgresUserRepository,
    RazorpayConfig, RazorpayPaymentAdapter,
};
use fitness_membership::application::{ListStaleOrdersHandler, ListStaleOrdersQuery};
use fitness_membership::config::AppConfig;
use fitness_membership::ports::OrderRepository;

/// Pending orders older than this are reported for reconciliation.
const STALE_ORDER_MINUTES: i64 = 30;
const STALE_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        live_payments = config.payment.is_live_mode(),
        "Starting fitness membership service"
    );

    let database = DatabaseHandle::new(config.database.clone());
    if config.database.run_migrations {
        database.run_migrations().await?;
    }
    let pool = database.pool().await?.clone();

    let orders: Arc<dyn OrderRepository> = Arc::new(PostgresOrderRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserRepository::new(pool));
    let provider = Arc::new(RazorpayPaymentAdapter::new(RazorpayConfig::from(
        &config.payment,
    ))?);
    let hasher = Arc::new(Argon2CredentialHasher::new(config.auth.max_hashing_threads));

    let sweep = tokio::spawn(report_stale_orders(ListStaleOrdersHandler::new(
        orders.clone(),
    )));

    let app = router(
        PaymentAppState::new(orders.clone(), provider),
        UserAppState::new(orders, users, hasher),
        &config.server,
    );

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    sweep.abort();
    database.close().await;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.compact().init();
    }
}

async fn report_stale_orders(handler: ListStaleOrdersHandler) {
    let mut interval = tokio::time::interval(STALE_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let query = ListStaleOrdersQuery {
            older_than_minutes: STALE_ORDER_MINUTES,
        };
        match handler.handle(query).await {
            Ok(result) if !result.orders.is_empty() => {
                info!(count = result.orders.len(), "Stale pending orders found");
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Stale order sweep failed"),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
