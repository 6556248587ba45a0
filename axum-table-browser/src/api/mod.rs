//! JSON API endpoints
//!
//! This module contains the handlers behind the table picker, page fetching
//! and search. Every response uses the [`ApiResponse`] envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};

use crate::browser::TableBrowser;
use crate::database::traits::DatabaseProvider;
use crate::schema::ApiResponse;
use crate::BrowseError;

pub mod rows;
pub mod tables;

// Re-export handlers for convenience
pub use rows::{fetch_page_handler, search_page_handler};
pub use tables::list_tables_handler;

/// Create the API router with all endpoints
///
/// # Arguments
///
/// * `browser` - Table browser service shared by all handlers
///
/// # Returns
///
/// An Axum Router with `/tables`, `/page` and `/search` configured
pub fn create_api_router<DB: DatabaseProvider>(browser: TableBrowser<DB>) -> Router {
    Router::new()
        .route("/tables", get(list_tables_handler::<DB>))
        .route("/page", post(fetch_page_handler::<DB>))
        .route("/search", post(search_page_handler::<DB>))
        .with_state(browser)
}

impl BrowseError {
    /// HTTP status reported alongside the failure envelope
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrowseError::Unauthorized => StatusCode::UNAUTHORIZED,
            BrowseError::MissingTableName
            | BrowseError::MissingSearchTerm
            | BrowseError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BrowseError::UnknownTable(_) => StatusCode::NOT_FOUND,
            BrowseError::NoData { .. } => StatusCode::OK,
            BrowseError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BrowseError {
    fn into_response(self) -> Response {
        if let BrowseError::Store(error) = &self {
            tracing::error!(error = %error, "Table browser store failure");
        }

        (
            self.status_code(),
            Json(ApiResponse::failure(self.user_message())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::traits::DatabaseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(BrowseError::MissingTableName.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BrowseError::UnknownTable("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BrowseError::NoData { searching: false }.status_code(), StatusCode::OK);
        assert_eq!(
            BrowseError::Store(DatabaseError::Query("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
