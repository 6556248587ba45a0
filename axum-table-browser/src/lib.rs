//! # axum-table-browser
//!
//! An admin-only browser for SQL tables, mounted as an Axum router.
//!
//! ## Features
//!
//! - Table picker fed by live schema discovery
//! - Fixed-size pages of rows with numbered pagination
//! - Search across every column with highlighted matches
//! - Support for SQLite and PostgreSQL
//!
//! ## Security
//!
//! Every route sits behind an [`AdminAuthorizer`]. Table and column names are
//! checked against the names the store reports before they reach a query, and
//! are quoted by the provider; all values are bound as parameters.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use axum_table_browser::{TableBrowserLayer, TokenAuthorizer};
//! use sqlx::SqlitePool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = SqlitePool::connect("sqlite::memory:")
//!         .await
//!         .unwrap();
//!
//!     let authorizer = TokenAuthorizer::from_tokens(vec!["change-me".to_string()]).unwrap();
//!     let app = Router::new()
//!         .route("/", get(|| async { "Hello, World!" }))
//!         .merge(TableBrowserLayer::sqlite("/table-browser", pool, authorizer).into_router());
//!
//!     // Serve the application...
//! }
//! ```

// Public modules
pub mod api;
pub mod auth;
pub mod browser;
pub mod database;
pub mod frontend;
pub mod layer;
pub mod render;
pub mod schema;

// Public exports
pub use auth::{AdminAuthorizer, TokenAuthorizer};
pub use browser::TableBrowser;
pub use layer::TableBrowserLayer;
pub use schema::{PageResult, Row, SearchFilter, PAGE_SIZE};

// Re-export database providers
pub use database::traits::{DatabaseError, DatabaseProvider};

#[cfg(feature = "sqlite")]
pub use database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
pub use database::postgres::PostgresProvider;

// Error type
use thiserror::Error;

/// Failure of a browse or search request
///
/// Every variant is reported back to the caller as a plain message; none of
/// them is fatal to the process.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Table name is required")]
    MissingTableName,

    #[error("Search term is required")]
    MissingSearchTerm,

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The requested page holds no rows; a reported condition, not a fault
    #[error("No rows (searching: {searching})")]
    NoData { searching: bool },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl BrowseError {
    /// Message shown to the administrator
    ///
    /// Store failures collapse to a generic message so driver text (table
    /// layout, SQL fragments) never reaches the page.
    pub fn user_message(&self) -> String {
        match self {
            BrowseError::Unauthorized
            | BrowseError::MissingTableName
            | BrowseError::MissingSearchTerm => self.to_string(),
            BrowseError::UnknownTable(_) => "Table not found".to_string(),
            BrowseError::NoData { searching: true } => {
                "No results found for your search".to_string()
            }
            BrowseError::NoData { searching: false } => {
                "No data found or table is empty".to_string()
            }
            BrowseError::InvalidRequest(_) => "Invalid request".to_string(),
            BrowseError::Store(_) => "Error loading data".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_not_leaked() {
        let error = BrowseError::from(DatabaseError::Query(
            "no such column: secret_hash".to_string(),
        ));
        assert_eq!(error.user_message(), "Error loading data");
    }

    #[test]
    fn test_no_data_messages() {
        assert_eq!(
            BrowseError::NoData { searching: false }.user_message(),
            "No data found or table is empty"
        );
        assert_eq!(
            BrowseError::NoData { searching: true }.user_message(),
            "No results found for your search"
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(BrowseError::MissingTableName.user_message(), "Table name is required");
        assert_eq!(BrowseError::MissingSearchTerm.user_message(), "Search term is required");
        assert_eq!(BrowseError::Unauthorized.user_message(), "Unauthorized access");
    }
}
