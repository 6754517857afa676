//! Error responses.
//!
//! JSON routes answer `{"ok": false, "error": "..."}`; the HTML route wraps the
//! same error in a small document. Status mapping:
//! - invalid input → 400
//! - database not configured → 500
//! - database fetch failed → 500

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::firebase::FirebaseError;
use crate::history::PathError;
use crate::render::render_error_page;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Upstream(#[from] FirebaseError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPath(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as an HTML document instead of JSON.
    pub fn into_html(self) -> HtmlError {
        HtmlError(self)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "ok": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// `ApiError` rendered for the WebView.
#[derive(Debug)]
pub struct HtmlError(pub ApiError);

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        (self.0.status(), Html(render_error_page(&self.0.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(PathError::Missing).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidQuery("duplicate field `path`".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unavailable("no db".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(FirebaseError::Decode("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(PathError::Missing).to_string(),
            "invalid path: missing path"
        );
        assert_eq!(
            ApiError::from(FirebaseError::Status { status: 404, body: "nope".into() }).to_string(),
            "Database returned 404: nope"
        );
    }
}
