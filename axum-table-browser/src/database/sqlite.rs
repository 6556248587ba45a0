//! SQLite database provider implementation

use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::database::contains_pattern;
use crate::schema::{Row, SearchFilter};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};

/// SQLite database provider
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Create a new SQLite provider
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Quote an identifier (table or column name) to prevent SQL injection
    ///
    /// SQLite uses double quotes for identifiers. This function escapes any
    /// double quotes in the identifier by doubling them.
    fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Select list reading REAL values through SQLite's own text conversion
    ///
    /// `LIKE` compares against that same text, so `1.0` is shown as `1.0`
    /// rather than Rust's `1`.
    fn build_select_list(columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| {
                let quoted = Self::quote_identifier(column);
                format!("CASE WHEN typeof({quoted}) = 'real' THEN CAST({quoted} AS TEXT) ELSE {quoted} END AS {quoted}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Convert a SQLite row into display strings, one per column
    fn row_to_display(row: &SqliteRow) -> Result<Row, DatabaseError> {
        let mut display_row = Row::new();

        for (index, column) in row.columns().iter().enumerate() {
            let value = Self::extract_column_value(row, index)?;
            display_row.push(column.name(), value);
        }

        Ok(display_row)
    }

    /// Extract a column value as display text
    ///
    /// SQLite is dynamically typed, so the storage class of the value itself
    /// decides how it is read, not the declared column type.
    fn extract_column_value(row: &SqliteRow, index: usize) -> Result<String, DatabaseError> {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(String::new());
        }
        let storage_class = raw.type_info().name().to_string();

        match storage_class.as_str() {
            "INTEGER" => {
                if let Ok(value) = row.try_get::<i64, _>(index) {
                    return Ok(value.to_string());
                }
            }
            "REAL" => {
                if let Ok(value) = row.try_get::<f64, _>(index) {
                    return Ok(value.to_string());
                }
            }
            "BLOB" => {
                if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
                    return Ok(blob_to_display(value));
                }
            }
            _ => {
                if let Ok(value) = row.try_get::<String, _>(index) {
                    return Ok(value);
                }
            }
        }

        // Fallback: try common types in order
        if let Ok(value) = row.try_get::<String, _>(index) {
            return Ok(value);
        }
        if let Ok(value) = row.try_get::<i64, _>(index) {
            return Ok(value.to_string());
        }
        if let Ok(value) = row.try_get::<f64, _>(index) {
            return Ok(value.to_string());
        }
        if let Ok(value) = row.try_get::<bool, _>(index) {
            return Ok(value.to_string());
        }
        if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
            return Ok(blob_to_display(value));
        }

        tracing::debug!(storage_class = %storage_class, index, "Unreadable SQLite value shown as empty");
        Ok(String::new())
    }

    /// Build a WHERE clause matching the term in any column
    ///
    /// Returns the clause (with leading space) and the values to bind, one per
    /// column. An absent filter yields an empty clause; a filter over no
    /// columns matches nothing.
    fn build_where_clause(filter: Option<&SearchFilter>) -> (String, Vec<String>) {
        let Some(filter) = filter else {
            return (String::new(), Vec::new());
        };
        if filter.columns.is_empty() {
            return (" WHERE 0".to_string(), Vec::new());
        }

        let pattern = contains_pattern(&filter.term);
        let conditions: Vec<String> = filter
            .columns
            .iter()
            .map(|column| format!("{} LIKE ? ESCAPE '\\'", Self::quote_identifier(column)))
            .collect();
        let values = vec![pattern; conditions.len()];

        (format!(" WHERE {}", conditions.join(" OR ")), values)
    }
}

#[async_trait]
impl DatabaseProvider for SqliteProvider {
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let query = "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

        let tables: Vec<String> = sqlx::query_scalar(query).fetch_all(&self.pool).await?;

        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError> {
        // PRAGMA table_info returns: cid, name, type, notnull, dflt_value, pk
        let table_info_query = format!("PRAGMA table_info({})", Self::quote_identifier(table));
        let column_rows = sqlx::query(&table_info_query).fetch_all(&self.pool).await?;

        let mut columns = Vec::with_capacity(column_rows.len());
        for row in column_rows {
            let name: String = row.try_get("name")?;
            columns.push(name);
        }

        Ok(columns)
    }

    async fn fetch_rows(
        &self,
        table: &str,
        filter: Option<&SearchFilter>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Row>, DatabaseError> {
        let columns = self.list_columns(table).await?;
        if columns.is_empty() {
            return Ok(Vec::new());
        }
        let (where_clause, filter_values) = Self::build_where_clause(filter);

        let select_query = format!(
            "SELECT {} FROM {}{} LIMIT ? OFFSET ?",
            Self::build_select_list(&columns),
            Self::quote_identifier(table),
            where_clause
        );

        let mut sql_query = sqlx::query(&select_query);
        for value in &filter_values {
            sql_query = sql_query.bind(value);
        }
        sql_query = sql_query.bind(limit as i64).bind(offset as i64);

        let rows = sql_query.fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_display).collect()
    }

    async fn count_rows(&self, table: &str, filter: Option<&SearchFilter>) -> Result<u64, DatabaseError> {
        let (where_clause, filter_values) = Self::build_where_clause(filter);

        let count_query = format!(
            "SELECT COUNT(*) FROM {}{}",
            Self::quote_identifier(table),
            where_clause
        );

        let mut sql_query = sqlx::query_scalar::<_, i64>(&count_query);
        for value in &filter_values {
            sql_query = sql_query.bind(value);
        }

        let count: i64 = sql_query.fetch_one(&self.pool).await?;

        Ok(count as u64)
    }
}

/// Show binary values as text when they are valid UTF-8
fn blob_to_display(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => format!("[BLOB: {} bytes]", error.as_bytes().len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(SqliteProvider::quote_identifier("users"), "\"users\"");
        assert_eq!(
            SqliteProvider::quote_identifier("table\"name"),
            "\"table\"\"name\""
        );
    }

    #[test]
    fn test_build_where_clause() {
        let filter = SearchFilter {
            columns: vec!["name".to_string(), "email".to_string()],
            term: "50%".to_string(),
        };

        let (clause, values) = SqliteProvider::build_where_clause(Some(&filter));
        assert_eq!(
            clause,
            " WHERE \"name\" LIKE ? ESCAPE '\\' OR \"email\" LIKE ? ESCAPE '\\'"
        );
        assert_eq!(values, vec!["%50\\%%".to_string(), "%50\\%%".to_string()]);
    }

    #[test]
    fn test_build_where_clause_without_filter() {
        let (clause, values) = SqliteProvider::build_where_clause(None);
        assert!(clause.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn test_build_where_clause_without_columns_matches_nothing() {
        let filter = SearchFilter {
            columns: Vec::new(),
            term: "zzz".to_string(),
        };

        let (clause, values) = SqliteProvider::build_where_clause(Some(&filter));
        assert_eq!(clause, " WHERE 0");
        assert!(values.is_empty());
    }

    #[test]
    fn test_build_select_list_reads_real_as_text() {
        let columns = vec!["price".to_string()];
        assert_eq!(
            SqliteProvider::build_select_list(&columns),
            "CASE WHEN typeof(\"price\") = 'real' THEN CAST(\"price\" AS TEXT) ELSE \"price\" END AS \"price\""
        );
    }

    async fn provider_with(statements: &[&str]) -> SqliteProvider {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        for statement in statements {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }
        SqliteProvider::new(pool)
    }

    #[tokio::test]
    async fn test_filter_without_columns_returns_no_rows() {
        let provider = provider_with(&[
            "CREATE TABLE t (name TEXT)",
            "INSERT INTO t (name) VALUES ('a'), ('b')",
        ])
        .await;
        let filter = SearchFilter {
            columns: Vec::new(),
            term: "zzz".to_string(),
        };

        let rows = provider.fetch_rows("t", Some(&filter), 10, 0).await.unwrap();
        let count = provider.count_rows("t", Some(&filter)).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(count, 0);

        assert_eq!(provider.count_rows("t", None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_real_values_display_as_matched_text() {
        let provider = provider_with(&[
            "CREATE TABLE p (id INTEGER, price REAL, label TEXT)",
            "INSERT INTO p (id, price, label) VALUES (1, 1.0, 'one'), (2, 1e20, NULL)",
        ])
        .await;
        let filter = SearchFilter {
            columns: provider.list_columns("p").await.unwrap(),
            term: "1.0".to_string(),
        };

        let rows = provider.fetch_rows("p", Some(&filter), 10, 0).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some("1"));
        assert_eq!(rows[0].get("price"), Some("1.0"));
        assert_eq!(rows[1].get("price"), Some("1.0e+20"));
        assert_eq!(rows[1].get("label"), Some(""));
    }

    #[test]
    fn test_blob_to_display() {
        assert_eq!(blob_to_display(b"plain".to_vec()), "plain");
        assert_eq!(blob_to_display(vec![0xff, 0xfe, 0x00]), "[BLOB: 3 bytes]");
    }
}
