//! Table browser server - Main entry point.
//!
//! Mounts the table browser behind admin tokens on a standalone Axum server.

use axum::{response::Redirect, routing::get, Router};
use axum_table_browser::{TableBrowserLayer, TokenAuthorizer};
use clap::Parser;
use sqlx::postgres::PgPool;
use sqlx::sqlite::SqlitePool;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod demo;

use config::{Config, StoreKind};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer().with_target(true)).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config);

    let store = match config.validate() {
        Ok(store) => store,
        Err(message) => {
            error!("{message}");
            return Err(message.into());
        }
    };
    let authorizer = TokenAuthorizer::from_tokens(config.admin_tokens.clone())?;

    info!(
        store = %store,
        admin_tokens = authorizer.token_count(),
        "Starting table browser server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Route registration happens here and nowhere else
    let browser_router = match store {
        StoreKind::Sqlite => {
            let pool = SqlitePool::connect(&config.database_url).await?;
            if config.seed_demo {
                demo::seed(&pool).await?;
            }
            TableBrowserLayer::sqlite(config.base_path.clone(), pool, authorizer).into_router()
        }
        StoreKind::Postgres => {
            let pool = PgPool::connect(&config.database_url).await?;
            TableBrowserLayer::postgres(config.base_path.clone(), pool, authorizer).into_router()
        }
    };

    let base_path = config.base_path.clone();
    let app = Router::new()
        .route("/", get(move || async move { Redirect::to(&base_path) }))
        .merge(browser_router)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        address = %config.bind_addr(),
        base_path = %config.base_path,
        "Table browser available at http://{}{}",
        config.bind_addr(),
        config.base_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(error = %error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
