//! Database provider trait
//!
//! This trait defines the interface that all store implementations must provide.

use crate::schema::{Row, SearchFilter};
use async_trait::async_trait;
use thiserror::Error;

/// Database provider trait for table discovery and paged row access
///
/// Implementations receive table and column names that were already checked
/// against [`DatabaseProvider::list_tables`] and [`DatabaseProvider::list_columns`]
/// and are responsible for quoting them. Every value (patterns, limits,
/// offsets) must be bound as a parameter.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + 'static {
    /// List all browsable table names, sorted by name
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError>;

    /// List the column names of a table in declaration order
    ///
    /// # Arguments
    ///
    /// * `table` - Name of the table
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError>;

    /// Fetch one window of rows, optionally restricted by a search filter
    ///
    /// # Arguments
    ///
    /// * `table` - Name of the table
    /// * `filter` - Optional disjunctive `LIKE` filter across columns
    /// * `limit` - Maximum rows to return
    /// * `offset` - Rows to skip
    async fn fetch_rows(
        &self,
        table: &str,
        filter: Option<&SearchFilter>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Row>, DatabaseError>;

    /// Count rows of a table, with the same filter semantics as `fetch_rows`
    async fn count_rows(&self, table: &str, filter: Option<&SearchFilter>) -> Result<u64, DatabaseError>;
}

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Generic database error
    #[error("Database error: {0}")]
    Query(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::Query(error.to_string())
    }
}
