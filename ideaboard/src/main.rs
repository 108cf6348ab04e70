//! Ideaboard backend host entry point.
//!
//! Initializes configuration and the connection pool, applies the embedded
//! schema migrations, then holds the process open until the shutdown signal
//! and drains the pool.

use dotenv::dotenv;
use ideaboard::{AppError, Dependencies};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ideaboard=info,ideaboard_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!(
        service_version = env!("CARGO_PKG_VERSION"),
        "Starting ideaboard backend"
    );

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    ideaboard_repository::MIGRATOR.run(&deps.pool).await?;
    info!("Database migrations applied");

    // The enclosing API layer drives the services; this host owns only the
    // process lifecycle: stay up until the shutdown signal, then drain.
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received: draining connection pool");
    deps.pool.close().await;
    info!("Connection pool drained");

    Ok(())
}
