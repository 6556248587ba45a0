//! Table browsing service
//!
//! Validates requests, resolves table names against the live schema and
//! turns provider results into [`PageResult`]s. Holds no state besides the
//! provider handle.

use std::sync::Arc;

use crate::database::traits::DatabaseProvider;
use crate::schema::{normalize_page, page_offset, PageResult, SearchFilter, PAGE_SIZE};
use crate::{BrowseError, Result};

/// Service behind the three browse operations
pub struct TableBrowser<DB: DatabaseProvider> {
    database: Arc<DB>,
}

impl<DB: DatabaseProvider> Clone for TableBrowser<DB> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
        }
    }
}

impl<DB: DatabaseProvider> TableBrowser<DB> {
    pub fn new(database: DB) -> Self {
        Self::from_arc(Arc::new(database))
    }

    pub fn from_arc(database: Arc<DB>) -> Self {
        Self { database }
    }

    /// Enumerate the tables an administrator can pick from
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        Ok(self.database.list_tables().await?)
    }

    /// Fetch one page of a table
    ///
    /// # Arguments
    ///
    /// * `table` - Table name as sent by the client
    /// * `page` - Requested page; anything below 1 is treated as 1
    pub async fn fetch_page(&self, table: &str, page: i64) -> Result<PageResult> {
        let table = table.trim();
        if table.is_empty() {
            return Err(BrowseError::MissingTableName);
        }

        let table = self.resolve_table(table).await?;
        let page = normalize_page(page);
        let offset = page_offset(page);

        let rows = self
            .database
            .fetch_rows(&table, None, PAGE_SIZE, offset)
            .await?;
        if rows.is_empty() {
            return Err(BrowseError::NoData { searching: false });
        }

        let total_count = self.database.count_rows(&table, None).await?;
        tracing::debug!(table = %table, page, total_count, "Fetched table page");

        Ok(PageResult {
            table,
            rows,
            total_count,
            page,
            page_size: PAGE_SIZE,
            term: None,
        })
    }

    /// Fetch one page of rows containing `term` in any column
    ///
    /// # Arguments
    ///
    /// * `table` - Table name as sent by the client
    /// * `term` - Search substring, matched literally and case-insensitively
    /// * `page` - Requested page; anything below 1 is treated as 1
    pub async fn search_page(&self, table: &str, term: &str, page: i64) -> Result<PageResult> {
        let table = table.trim();
        if table.is_empty() {
            return Err(BrowseError::MissingTableName);
        }
        let term = term.trim();
        if term.is_empty() {
            return Err(BrowseError::MissingSearchTerm);
        }

        let table = self.resolve_table(table).await?;
        let columns = self.database.list_columns(&table).await?;
        if columns.is_empty() {
            // Nothing to match against
            return Err(BrowseError::NoData { searching: true });
        }

        let filter = SearchFilter {
            columns,
            term: term.to_string(),
        };
        let page = normalize_page(page);
        let offset = page_offset(page);

        let rows = self
            .database
            .fetch_rows(&table, Some(&filter), PAGE_SIZE, offset)
            .await?;
        if rows.is_empty() {
            return Err(BrowseError::NoData { searching: true });
        }

        let total_count = self.database.count_rows(&table, Some(&filter)).await?;
        tracing::debug!(table = %table, page, total_count, "Fetched search page");

        Ok(PageResult {
            table,
            rows,
            total_count,
            page,
            page_size: PAGE_SIZE,
            term: Some(filter.term),
        })
    }

    /// Map a client-supplied name onto a table the store actually has
    async fn resolve_table(&self, requested: &str) -> Result<String> {
        let tables = self.database.list_tables().await?;
        tables
            .into_iter()
            .find(|table| table == requested)
            .ok_or_else(|| BrowseError::UnknownTable(requested.to_string()))
    }
}
