//! PostgreSQL database provider implementation

use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::database::contains_pattern;
use crate::schema::{Row, SearchFilter};
use async_trait::async_trait;
use sqlx::{postgres::PgRow, Column, PgPool, Row as _};

/// PostgreSQL database provider
///
/// Browses base tables of the `public` schema. Every column is selected as
/// `column::text`, so all PostgreSQL types share one display conversion.
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Create a new PostgreSQL provider
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Quote an identifier to prevent SQL injection
    fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Select list casting every column to text under its own name
    fn build_select_list(columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| {
                let quoted = Self::quote_identifier(column);
                format!("{quoted}::text AS {quoted}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Paged SELECT with LIMIT and OFFSET bound at `limit_index` and the next
    ///
    /// `CREATE TABLE t()` is legal in PostgreSQL and has nothing to select,
    /// so no columns yields `None`.
    fn build_page_query(table: &str, columns: &[String], where_clause: &str, limit_index: usize) -> Option<String> {
        if columns.is_empty() {
            return None;
        }

        Some(format!(
            "SELECT {} FROM {}{} LIMIT ${} OFFSET ${}",
            Self::build_select_list(columns),
            Self::quote_identifier(table),
            where_clause,
            limit_index,
            limit_index + 1
        ))
    }

    /// Convert a PostgreSQL row of text columns to display strings
    fn row_to_display(row: &PgRow) -> Result<Row, DatabaseError> {
        let mut display_row = Row::new();

        for (index, column) in row.columns().iter().enumerate() {
            let value: Option<String> = row.try_get(index)?;
            display_row.push(column.name(), value.unwrap_or_default());
        }

        Ok(display_row)
    }

    /// Build a WHERE clause matching the term in any column
    ///
    /// Placeholders are numbered from `parameter_offset`. `ILIKE` keeps the
    /// search case-insensitive like the SQLite provider. A filter over no
    /// columns matches nothing.
    fn build_where_clause(filter: Option<&SearchFilter>, parameter_offset: usize) -> (String, Vec<String>) {
        let Some(filter) = filter else {
            return (String::new(), vec![]);
        };
        if filter.columns.is_empty() {
            return (" WHERE FALSE".to_string(), vec![]);
        }

        let pattern = contains_pattern(&filter.term);
        let conditions: Vec<String> = filter
            .columns
            .iter()
            .enumerate()
            .map(|(position, column)| {
                format!(
                    "{}::text ILIKE ${} ESCAPE '\\'",
                    Self::quote_identifier(column),
                    parameter_offset + position
                )
            })
            .collect();
        let values = vec![pattern; conditions.len()];

        (format!(" WHERE {}", conditions.join(" OR ")), values)
    }
}

#[async_trait]
impl DatabaseProvider for PostgresProvider {
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let query = r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = 'public'
              AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let tables: Vec<String> = sqlx::query_scalar(query).fetch_all(&self.pool).await?;

        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError> {
        let column_query = r#"
            SELECT column_name::text
            FROM information_schema.columns
            WHERE table_schema = 'public'
              AND table_name = $1
            ORDER BY ordinal_position
        "#;

        let columns: Vec<String> = sqlx::query_scalar(column_query)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        Ok(columns)
    }

    async fn fetch_rows(
        &self,
        table: &str,
        filter: Option<&SearchFilter>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Row>, DatabaseError> {
        let columns = match filter {
            Some(filter) => filter.columns.clone(),
            None => self.list_columns(table).await?,
        };
        let (where_clause, filter_values) = Self::build_where_clause(filter, 1);
        let Some(sql) = Self::build_page_query(table, &columns, &where_clause, filter_values.len() + 1) else {
            return Ok(Vec::new());
        };

        let mut query_builder = sqlx::query(&sql);
        for value in &filter_values {
            query_builder = query_builder.bind(value);
        }
        query_builder = query_builder.bind(limit as i64).bind(offset as i64);

        let rows = query_builder.fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_display).collect()
    }

    async fn count_rows(&self, table: &str, filter: Option<&SearchFilter>) -> Result<u64, DatabaseError> {
        let (where_clause, filter_values) = Self::build_where_clause(filter, 1);

        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            Self::quote_identifier(table),
            where_clause
        );

        let mut query_builder = sqlx::query_scalar::<_, i64>(&sql);
        for value in &filter_values {
            query_builder = query_builder.bind(value);
        }

        let count = query_builder.fetch_one(&self.pool).await?;

        Ok(count as u64)
    }
}
