//! Page and search endpoints returning rendered HTML fragments

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
};

use crate::browser::TableBrowser;
use crate::database::traits::DatabaseProvider;
use crate::render::render_fragment;
use crate::schema::{ApiResponse, FetchPageRequest, SearchPageRequest};
use crate::{BrowseError, PageResult};

/// Handler for POST /api/page
///
/// Request body:
/// ```json
/// { "table": "users", "page": 3 }
/// ```
///
/// Response: the rendered summary, table and pagination as one HTML string
/// in `data`, or a failure envelope such as
/// `{"success": false, "data": "No data found or table is empty"}`.
pub async fn fetch_page_handler<DB: DatabaseProvider>(
    State(browser): State<TableBrowser<DB>>,
    payload: Result<Json<FetchPageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection),
    };

    fragment_response(browser.fetch_page(&request.table, request.page).await)
}

/// Handler for POST /api/search
///
/// Request body:
/// ```json
/// { "table": "users", "term": "a@b.com", "page": 1 }
/// ```
///
/// Matches are wrapped in `<mark>` in the returned fragment.
pub async fn search_page_handler<DB: DatabaseProvider>(
    State(browser): State<TableBrowser<DB>>,
    payload: Result<Json<SearchPageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection),
    };

    fragment_response(
        browser
            .search_page(&request.table, &request.term, request.page)
            .await,
    )
}

fn fragment_response(result: Result<PageResult, BrowseError>) -> Response {
    match result {
        Ok(page) => Json(ApiResponse::success(render_fragment(&page))).into_response(),
        Err(error) => {
            tracing::debug!(error = %error, "Table browser request failed");
            error.into_response()
        }
    }
}

fn invalid_request(rejection: JsonRejection) -> Response {
    tracing::debug!(rejection = %rejection.body_text(), "Rejected malformed request body");
    BrowseError::InvalidRequest(rejection.body_text()).into_response()
}
