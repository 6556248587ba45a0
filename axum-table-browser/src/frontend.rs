//! Admin page and asset serving
//!
//! The admin page is rendered on the server with the current table list. A
//! small embedded script drives the API and swaps rendered fragments into
//! the page.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use html_escape::{encode_double_quoted_attribute, encode_safe};
use include_dir::{include_dir, Dir};
use std::sync::Arc;

use crate::browser::TableBrowser;
use crate::database::traits::DatabaseProvider;
use crate::render::render_table_options;

// Embed the assets directory at compile time
static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// State for the admin page (base path for asset and API URLs)
pub struct FrontendState<DB: DatabaseProvider> {
    pub base_path: Arc<String>,
    pub browser: TableBrowser<DB>,
}

impl<DB: DatabaseProvider> Clone for FrontendState<DB> {
    fn clone(&self) -> Self {
        Self {
            base_path: self.base_path.clone(),
            browser: self.browser.clone(),
        }
    }
}

impl<DB: DatabaseProvider> FrontendState<DB> {
    /// Create a new frontend state with the given base path
    pub fn new(base_path: String, browser: TableBrowser<DB>) -> Self {
        Self {
            base_path: Arc::new(base_path),
            browser,
        }
    }
}

/// Create a router for the admin page and its assets
///
/// This returns a Router that serves:
/// - GET / -> admin page with the table picker
/// - GET /assets/* -> embedded script and stylesheet
///
/// # Arguments
///
/// * `base_path` - The base URL path where the browser is mounted (e.g., "/table-browser")
/// * `browser` - Service used to list tables for the picker
pub fn create_frontend_router<DB: DatabaseProvider>(
    base_path: String,
    browser: TableBrowser<DB>,
) -> Router {
    let state = FrontendState::new(base_path, browser);

    // Note: Axum 0.8 uses {*wildcard} syntax for wildcard captures
    Router::new()
        .route("/", get(serve_admin_page::<DB>))
        .route("/assets/{*path}", get(serve_static_asset))
        .with_state(state)
}

/// Serve the admin page
///
/// The table list is read live on every load. A store failure still renders
/// the page, with the picker empty and a generic message in the result area.
async fn serve_admin_page<DB: DatabaseProvider>(State(state): State<FrontendState<DB>>) -> Response {
    let (options, notice) = match state.browser.list_tables().await {
        Ok(tables) => (render_table_options(&tables), String::new()),
        Err(error) => {
            tracing::error!(error = %error, "Failed to list tables for admin page");
            (
                String::new(),
                format!("<p class=\"error\">{}</p>", encode_safe(&error.user_message())),
            )
        }
    };

    let page = render_admin_page(&state.base_path, &options, &notice);

    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(page),
    )
        .into_response()
}

fn render_admin_page(base_path: &str, options: &str, notice: &str) -> String {
    let base = encode_double_quoted_attribute(base_path);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Table Browser</title>
    <link rel="stylesheet" href="{base}/assets/table-browser.css">
</head>
<body>
    <div class="wrap" id="table-browser" data-api="{base}/api">
        <h1>Table Browser</h1>
        <div class="browser-controls">
            <div class="control-group">
                <label for="db-tables">Select a Table:</label>
                <select id="db-tables">
                    <option value="">-- Select a Table --</option>
                    {options}
                </select>
            </div>
            <div class="control-group search-group" hidden>
                <label for="table-search">Search:</label>
                <input type="text" id="table-search" placeholder="Enter search term...">
                <button type="button" id="search-button" class="button">Search</button>
                <button type="button" id="clear-search" class="button">Clear</button>
            </div>
        </div>
        <div id="table-data">{notice}</div>
    </div>
    <script src="{base}/assets/table-browser.js"></script>
</body>
</html>
"#
    )
}

/// Serve embedded assets with proper MIME types
async fn serve_static_asset(Path(path): Path<String>) -> Response {
    match ASSETS.get_file(&path) {
        Some(file) => {
            let mime_type = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();

            (
                [
                    (header::CONTENT_TYPE, mime_type),
                    (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
                ],
                file.contents(),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Asset not found: {}", path),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_are_embedded() {
        assert!(ASSETS.get_file("table-browser.js").is_some());
        assert!(ASSETS.get_file("table-browser.css").is_some());
    }

    #[test]
    fn test_mime_type_guessing() {
        let javascript_mime = mime_guess::from_path("table-browser.js").first_or_octet_stream();
        assert_eq!(javascript_mime.as_ref(), "text/javascript");

        let css_mime = mime_guess::from_path("table-browser.css").first_or_octet_stream();
        assert_eq!(css_mime.as_ref(), "text/css");
    }

    #[test]
    fn test_admin_page_wires_base_path() {
        let page = render_admin_page("/table-browser", "<option value=\"users\">users</option>", "");
        assert!(page.contains("data-api=\"/table-browser/api\""));
        assert!(page.contains("src=\"/table-browser/assets/table-browser.js\""));
        assert!(page.contains("<option value=\"users\">users</option>"));
    }
}
