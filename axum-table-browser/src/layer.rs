//! TableBrowserLayer - Main Axum integration layer
//!
//! This module provides the entry point for mounting the table browser
//! into an Axum application.

use crate::auth::{require_admin, AdminAuthorizer};
use crate::browser::TableBrowser;
use crate::database::traits::DatabaseProvider;
use axum::{middleware, Router};
use std::sync::Arc;

#[cfg(feature = "sqlite")]
use crate::database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
use crate::database::postgres::PostgresProvider;

use crate::api::create_api_router;
use crate::frontend::create_frontend_router;

/// Main layer for integrating the table browser into an Axum application
///
/// # Example
///
/// ```rust,no_run
/// use axum::Router;
/// use axum_table_browser::{TableBrowserLayer, TokenAuthorizer};
/// use sqlx::SqlitePool;
///
/// # async fn example() {
/// let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
/// let authorizer = TokenAuthorizer::from_tokens(vec!["change-me".to_string()]).unwrap();
/// let browser = TableBrowserLayer::sqlite("/table-browser", pool, authorizer);
/// let app = Router::new().merge(browser.into_router());
/// # }
/// ```
pub struct TableBrowserLayer<DB: DatabaseProvider> {
    base_path: String,
    browser: TableBrowser<DB>,
    authorizer: Arc<dyn AdminAuthorizer>,
}

impl<DB: DatabaseProvider> TableBrowserLayer<DB> {
    /// Create a new table browser at the given base path
    ///
    /// # Arguments
    ///
    /// * `base_path` - The URL path where the browser will be mounted (e.g., "/table-browser")
    /// * `database` - The database provider implementation
    /// * `authorizer` - Decides which requests come from administrators
    pub fn new(
        base_path: impl Into<String>,
        database: DB,
        authorizer: impl AdminAuthorizer,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            browser: TableBrowser::new(database),
            authorizer: Arc::new(authorizer),
        }
    }

    /// Convert into an Axum Router that can be merged
    ///
    /// The returned router includes:
    /// - Admin page at `{base_path}`
    /// - Embedded assets at `{base_path}/assets/*`
    /// - API endpoints at `{base_path}/api/*`
    ///
    /// Every route requires the authorizer's approval.
    pub fn into_router(self) -> Router {
        let api_router = create_api_router(self.browser.clone());
        let frontend_router = create_frontend_router(self.base_path.clone(), self.browser);

        // Note: Axum 0.8 uses {param} syntax instead of :param
        Router::new()
            .nest(&format!("{}/api", self.base_path), api_router)
            .nest(&self.base_path, frontend_router)
            .layer(middleware::from_fn_with_state(self.authorizer, require_admin))
    }
}

#[cfg(feature = "sqlite")]
impl TableBrowserLayer<SqliteProvider> {
    /// Create a new table browser for SQLite
    ///
    /// # Arguments
    ///
    /// * `base_path` - The URL path where the browser will be mounted
    /// * `pool` - The SQLite connection pool
    /// * `authorizer` - Decides which requests come from administrators
    pub fn sqlite(
        base_path: impl Into<String>,
        pool: sqlx::SqlitePool,
        authorizer: impl AdminAuthorizer,
    ) -> Self {
        Self::new(base_path, SqliteProvider::new(pool), authorizer)
    }
}

#[cfg(feature = "postgres")]
impl TableBrowserLayer<PostgresProvider> {
    /// Create a new table browser for PostgreSQL
    ///
    /// # Arguments
    ///
    /// * `base_path` - The URL path where the browser will be mounted
    /// * `pool` - The PostgreSQL connection pool
    /// * `authorizer` - Decides which requests come from administrators
    pub fn postgres(
        base_path: impl Into<String>,
        pool: sqlx::PgPool,
        authorizer: impl AdminAuthorizer,
    ) -> Self {
        Self::new(base_path, PostgresProvider::new(pool), authorizer)
    }
}
