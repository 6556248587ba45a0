//! Configuration handling for the table browser server.
//!
//! Every option is available as a command line flag and as an environment
//! variable.

use clap::Parser;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:table-browser.db?mode=rwc";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_PATH: &str = "/table-browser";

/// Store backend selected from the database URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Postgres,
}

impl StoreKind {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else {
            None
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "table-browser-server",
    about = "Admin-only web browser for SQL tables",
    version
)]
pub struct Config {
    /// Database to browse (sqlite:... or postgres://...)
    #[arg(
        long,
        value_name = "URL",
        default_value = DEFAULT_DATABASE_URL,
        env = "TABLE_BROWSER_DATABASE_URL"
    )]
    pub database_url: String,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST, env = "TABLE_BROWSER_HOST")]
    pub host: String,

    /// Port to bind to
    #[arg(long, default_value_t = DEFAULT_PORT, env = "TABLE_BROWSER_PORT")]
    pub port: u16,

    /// URL path the browser is mounted under
    #[arg(long, default_value = DEFAULT_BASE_PATH, env = "TABLE_BROWSER_BASE_PATH")]
    pub base_path: String,

    /// Admin tokens accepted as Bearer token or `table_browser_token` cookie.
    /// Can be specified multiple times or as comma-separated values.
    #[arg(
        long = "admin-token",
        value_name = "TOKEN",
        env = "TABLE_BROWSER_ADMIN_TOKENS",
        value_delimiter = ','
    )]
    pub admin_tokens: Vec<String>,

    /// Create and fill demo tables when they are empty (SQLite only)
    #[arg(long, env = "TABLE_BROWSER_SEED_DEMO")]
    pub seed_demo: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "TABLE_BROWSER_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "TABLE_BROWSER_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Check the configuration and return the selected store
    pub fn validate(&self) -> Result<StoreKind, String> {
        if self.admin_tokens.is_empty() {
            return Err(
                "At least one admin token is required (--admin-token or TABLE_BROWSER_ADMIN_TOKENS)"
                    .to_string(),
            );
        }
        if self.admin_tokens.iter().any(|token| token.trim().is_empty()) {
            return Err("Admin tokens must not be empty".to_string());
        }

        if !self.base_path.starts_with('/') || self.base_path.len() < 2 || self.base_path.ends_with('/') {
            return Err(format!(
                "Base path '{}' must start with '/' and must not end with '/'",
                self.base_path
            ));
        }

        let store = StoreKind::from_url(&self.database_url).ok_or_else(|| {
            "Unsupported database URL: expected sqlite:... or postgres://...".to_string()
        })?;

        if self.seed_demo && store != StoreKind::Sqlite {
            return Err("--seed-demo is only supported for SQLite".to_string());
        }

        Ok(store)
    }

    /// Socket address to bind, e.g. `127.0.0.1:3000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(arguments: &[&str]) -> Config {
        let mut full = vec!["table-browser-server"];
        full.extend_from_slice(arguments);
        Config::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--admin-token", "secret"]);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.base_path, DEFAULT_BASE_PATH);
        assert_eq!(config.validate(), Ok(StoreKind::Sqlite));
    }

    #[test]
    fn test_default_database_lives_in_working_directory() {
        // mode=rwc creates the file but never its parent directories
        let path = DEFAULT_DATABASE_URL
            .trim_start_matches("sqlite:")
            .split('?')
            .next()
            .unwrap();
        assert_eq!(path, "table-browser.db");
        assert!(DEFAULT_DATABASE_URL.ends_with("?mode=rwc"));
    }

    #[test]
    fn test_comma_separated_tokens() {
        let config = parse(&["--admin-token", "one,two"]);
        assert_eq!(config.admin_tokens, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_tokens_are_required() {
        let config = parse(&[]);
        assert!(config.validate().unwrap_err().contains("admin token"));
    }

    #[test]
    fn test_base_path_shape() {
        for base_path in ["browser", "/", "/browser/"] {
            let config = parse(&["--admin-token", "secret", "--base-path", base_path]);
            assert!(config.validate().is_err(), "accepted {base_path}");
        }
    }

    #[test]
    fn test_store_kind_from_url() {
        assert_eq!(StoreKind::from_url("sqlite::memory:"), Some(StoreKind::Sqlite));
        assert_eq!(StoreKind::from_url("postgres://localhost/app"), Some(StoreKind::Postgres));
        assert_eq!(StoreKind::from_url("postgresql://localhost/app"), Some(StoreKind::Postgres));
        assert_eq!(StoreKind::from_url("mysql://localhost/app"), None);
    }

    #[test]
    fn test_seed_demo_requires_sqlite() {
        let config = parse(&[
            "--admin-token",
            "secret",
            "--database-url",
            "postgres://localhost/app",
            "--seed-demo",
        ]);
        assert!(config.validate().is_err());
    }
}
