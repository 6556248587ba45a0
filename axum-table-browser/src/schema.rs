//! Request, row and page types
//!
//! Everything here is transient: built for one request and dropped after
//! the response is rendered.

use serde::{Deserialize, Serialize};

/// Number of rows shown per page
pub const PAGE_SIZE: u64 = 10;

/// One result row as an ordered list of `(column, display value)` pairs
///
/// Order is the column order reported by the store and drives rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell; SQL `NULL` should be passed as an empty string
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(column, _)| column.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, value)| value.as_str())
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C: Into<String>, V: Into<String>> FromIterator<(C, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

/// Disjunctive search across every listed column
///
/// A row matches when any column contains `term` as a literal substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Column names, already validated against the table
    pub columns: Vec<String>,

    /// Raw user term; providers escape it before binding
    pub term: String,
}

/// One rendered page of a table or of a search over it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Table the rows came from
    pub table: String,

    /// Rows on this page, never more than `page_size`
    pub rows: Vec<Row>,

    /// Total rows in the table (or matching the search)
    pub total_count: u64,

    /// 1-based page number
    pub page: u64,

    pub page_size: u64,

    /// Search term, if this page is a search result
    pub term: Option<String>,
}

impl PageResult {
    /// `ceil(total_count / page_size)`
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    /// 1-based index of the first row on this page
    pub fn first_row_number(&self) -> u64 {
        (self.page - 1) * self.page_size + 1
    }

    /// 1-based index of the last row on this page
    pub fn last_row_number(&self) -> u64 {
        (self.page * self.page_size).min(self.total_count)
    }
}

/// Clamp a client-supplied page number to a valid 1-based page
pub fn normalize_page(page: i64) -> u64 {
    page.max(1) as u64
}

/// Row offset of a 1-based page, saturating at the largest bindable value
pub fn page_offset(page: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(PAGE_SIZE)
        .min(i64::MAX as u64)
}

fn default_page() -> i64 {
    1
}

/// Body of `POST /api/page`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchPageRequest {
    /// Table to browse; an empty value is reported as missing
    #[serde(default)]
    pub table: String,

    /// Requested page; values below 1 are treated as 1
    #[serde(default = "default_page")]
    pub page: i64,
}

/// Body of `POST /api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPageRequest {
    #[serde(default)]
    pub table: String,

    /// Substring searched for in every column
    #[serde(default)]
    pub term: String,

    #[serde(default = "default_page")]
    pub page: i64,
}

/// Response envelope shared by every API endpoint
///
/// On success `data` carries the payload (an HTML fragment or the table
/// list); on failure it carries a plain user-facing message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data }
    }
}

impl ApiResponse<String> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_result(total_count: u64, page: u64) -> PageResult {
        PageResult {
            table: "users".to_string(),
            rows: Vec::new(),
            total_count,
            page,
            page_size: PAGE_SIZE,
            term: None,
        }
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(page_result(0, 1).total_pages(), 0);
        assert_eq!(page_result(10, 1).total_pages(), 1);
        assert_eq!(page_result(11, 1).total_pages(), 2);
        assert_eq!(page_result(25, 1).total_pages(), 3);
    }

    #[test]
    fn test_row_numbers_on_last_partial_page() {
        let result = page_result(25, 3);
        assert_eq!(result.first_row_number(), 21);
        assert_eq!(result.last_row_number(), 25);
    }

    #[test]
    fn test_normalize_page_clamps_to_one() {
        assert_eq!(normalize_page(-5), 1);
        assert_eq!(normalize_page(0), 1);
        assert_eq!(normalize_page(1), 1);
        assert_eq!(normalize_page(7), 7);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(3), 20);
        assert_eq!(page_offset(u64::MAX), i64::MAX as u64);
    }

    #[test]
    fn test_row_keeps_column_order() {
        let row: Row = [("id", "1"), ("name", "Alice"), ("email", "a@b.com")]
            .into_iter()
            .collect();
        assert_eq!(row.columns().collect::<Vec<_>>(), ["id", "name", "email"]);
        assert_eq!(row.get("email"), Some("a@b.com"));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_requests_default_missing_fields() {
        let request: FetchPageRequest = serde_json::from_str(r#"{"table":"users"}"#).unwrap();
        assert_eq!(request.page, 1);

        let request: SearchPageRequest = serde_json::from_str(r#"{"page":-2}"#).unwrap();
        assert!(request.table.is_empty());
        assert!(request.term.is_empty());
        assert_eq!(request.page, -2);
    }

    #[test]
    fn test_failure_envelope_serialization() {
        let body = serde_json::to_value(ApiResponse::failure("Table name is required")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "data": "Table name is required"})
        );
    }
}
