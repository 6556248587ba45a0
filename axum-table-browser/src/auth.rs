//! Administrator authorization for every table browser route

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::collections::HashSet;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::schema::ApiResponse;
use crate::BrowseError;

/// Cookie checked by [`TokenAuthorizer`] when no bearer token is sent
pub const TOKEN_COOKIE: &str = "table_browser_token";

/// Decides whether a request comes from an administrator
///
/// Host applications implement this on top of their own session system.
pub trait AdminAuthorizer: Send + Sync + 'static {
    fn is_admin(&self, headers: &HeaderMap) -> bool;
}

/// Authorizer backed by a fixed set of admin tokens
///
/// A token is accepted from `Authorization: Bearer <token>` or from the
/// [`TOKEN_COOKIE`] cookie. With no tokens configured nobody is authorized.
#[derive(Debug, Clone, Default)]
pub struct TokenAuthorizer {
    tokens: HashSet<String>,
}

impl TokenAuthorizer {
    /// Create an authorizer from a list of tokens, rejecting blank entries
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self, String> {
        let mut valid_tokens = HashSet::new();
        for token in tokens {
            let trimmed = token.trim().to_string();
            if trimmed.is_empty() {
                return Err("Empty admin token in configuration".to_string());
            }
            valid_tokens.insert(trimmed);
        }
        Ok(Self { tokens: valid_tokens })
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn verify(&self, provided: &str) -> bool {
        let mut found = false;
        for expected in &self.tokens {
            if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
                found = true;
            }
        }
        found
    }
}

impl AdminAuthorizer for TokenAuthorizer {
    fn is_admin(&self, headers: &HeaderMap) -> bool {
        match extract_token(headers) {
            Some(token) => {
                let accepted = self.verify(token);
                if !accepted {
                    warn!(token_prefix = %mask_token(token), "Rejected admin token");
                }
                accepted
            }
            None => false,
        }
    }
}

/// Middleware rejecting every request the authorizer does not accept
pub async fn require_admin(
    State(authorizer): State<Arc<dyn AdminAuthorizer>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if authorizer.is_admin(request.headers()) {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized table browser request");
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::failure(BrowseError::Unauthorized.user_message())),
    )
        .into_response()
}

/// Bearer token first, then the token cookie
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let token = value.to_str().ok()?.strip_prefix("Bearer ")?.trim();
        return (!token.is_empty()).then_some(token);
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

fn mask_token(token: &str) -> String {
    match token.get(..3) {
        Some(prefix) if token.len() > 3 => format!("{prefix}***"),
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn authorizer() -> TokenAuthorizer {
        TokenAuthorizer::from_tokens(vec!["secret-token".to_string()]).unwrap()
    }

    #[test]
    fn test_bearer_token_accepted() {
        let headers = headers(header::AUTHORIZATION, "Bearer secret-token");
        assert!(authorizer().is_admin(&headers));
    }

    #[test]
    fn test_cookie_token_accepted() {
        let headers = headers(header::COOKIE, "theme=dark; table_browser_token=secret-token");
        assert!(authorizer().is_admin(&headers));
    }

    #[test]
    fn test_wrong_or_missing_token_rejected() {
        assert!(!authorizer().is_admin(&HeaderMap::new()));
        assert!(!authorizer().is_admin(&headers(header::AUTHORIZATION, "Bearer secret")));
        assert!(!authorizer().is_admin(&headers(header::AUTHORIZATION, "Basic secret-token")));
        assert!(!authorizer().is_admin(&headers(header::COOKIE, "table_browser_token=")));
    }

    #[test]
    fn test_empty_token_set_authorizes_nobody() {
        let authorizer = TokenAuthorizer::default();
        assert!(!authorizer.is_admin(&headers(header::AUTHORIZATION, "Bearer anything")));
    }

    #[test]
    fn test_blank_tokens_are_rejected() {
        assert!(TokenAuthorizer::from_tokens(vec!["  ".to_string()]).is_err());
        let authorizer = TokenAuthorizer::from_tokens(vec![" a ".to_string(), "a".to_string()]).unwrap();
        assert_eq!(authorizer.token_count(), 1);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("secret"), "sec***");
    }
}
