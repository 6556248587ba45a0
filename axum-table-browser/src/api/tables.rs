//! Table listing endpoint

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};

use crate::browser::TableBrowser;
use crate::database::traits::DatabaseProvider;
use crate::schema::ApiResponse;

/// Handler for GET /api/tables
///
/// Returns every table name the administrator can browse.
///
/// Response:
/// ```json
/// { "success": true, "data": ["orders", "products", "users"] }
/// ```
pub async fn list_tables_handler<DB: DatabaseProvider>(
    State(browser): State<TableBrowser<DB>>,
) -> Response {
    match browser.list_tables().await {
        Ok(tables) => Json(ApiResponse::success(tables)).into_response(),
        Err(error) => error.into_response(),
    }
}
