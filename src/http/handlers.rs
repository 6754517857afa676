//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::history::{validate_path, DbPath, HistoryNode};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::render::{parse_flag, render_page, ViewOptions};

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub path: Option<String>,
    pub title: Option<String>,
    pub sub: Option<String>,
    pub unit: Option<String>,
    #[serde(rename = "amountKey")]
    pub amount_key: Option<String>,
    pub compact: Option<String>,
}

impl ViewQuery {
    /// Overlay the non-empty query values onto `base`.
    pub fn apply(&self, mut base: ViewOptions) -> ViewOptions {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                *target = v.to_string();
            }
        }

        set(&mut base.title, &self.title);
        set(&mut base.sub, &self.sub);
        set(&mut base.unit, &self.unit);
        set(&mut base.amount_key, &self.amount_key);
        if let Some(flag) = &self.compact {
            base.compact = parse_flag(flag);
        }
        base
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub ok: bool,
    pub path: String,
    pub count: usize,
    pub items: Vec<HistoryNode>,
}

/// `GET /`
pub async fn root() -> &'static str {
    "Bridge base OK"
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn load(state: &AppState, raw_path: Option<&str>) -> Result<(DbPath, Vec<HistoryNode>), ApiError> {
    let path = validate_path(raw_path.unwrap_or_default())?;
    let reader = state.reader()?;
    let nodes = reader.read(&path).await?;
    Ok((path, nodes))
}

fn log_failure(route: &'static str, headers: &HeaderMap, err: &ApiError) {
    if err.status().is_server_error() {
        tracing::error!(request_id = %request_id(headers), route, error = %err, "Request failed");
    } else {
        tracing::debug!(request_id = %request_id(headers), route, error = %err, "Rejected request");
    }
}

/// `GET /history?path=...`
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let start = Instant::now();

    let result = match query {
        Ok(Query(query)) => load(&state, query.path.as_deref()).await,
        Err(rejection) => Err(rejection.into()),
    };

    let response = match result {
        Ok((path, items)) => {
            tracing::info!(
                request_id = %request_id(&headers),
                path = %path,
                count = items.len(),
                "History served"
            );
            Json(HistoryResponse {
                ok: true,
                path: path.to_string(),
                count: items.len(),
                items,
            })
            .into_response()
        }
        Err(e) => {
            log_failure("history", &headers, &e);
            e.into_response()
        }
    };

    metrics::record_request("history", response.status().as_u16(), start);
    response
}

/// `GET /view?path=...&title=&sub=&unit=&amountKey=&compact=`
pub async fn view(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> Response {
    let start = Instant::now();

    let result = match query {
        Ok(Query(query)) => load(&state, query.path.as_deref())
            .await
            .map(|(path, nodes)| (path, nodes, query)),
        Err(rejection) => Err(rejection.into()),
    };

    let response = match result {
        Ok((path, nodes, query)) => {
            let opts = query.apply(ViewOptions::from_defaults(&state.view_defaults));
            tracing::info!(
                request_id = %request_id(&headers),
                path = %path,
                count = nodes.len(),
                compact = opts.compact,
                "View rendered"
            );
            Html(render_page(path.as_str(), &nodes, &opts)).into_response()
        }
        Err(e) => {
            log_failure("view", &headers, &e);
            e.into_html().into_response()
        }
    };

    metrics::record_request("view", response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_query_overrides() {
        let query = ViewQuery {
            title: Some("Pagos".into()),
            sub: Some("  ".into()),
            unit: Some("USD".into()),
            amount_key: Some("monto".into()),
            compact: Some("1".into()),
            ..ViewQuery::default()
        };
        let opts = query.apply(ViewOptions::default());
        assert_eq!(opts.title, "Pagos");
        assert_eq!(opts.sub, "");
        assert_eq!(opts.unit, "USD");
        assert_eq!(opts.amount_key, "monto");
        assert!(opts.compact);
    }

    #[test]
    fn test_view_query_keeps_defaults() {
        let opts = ViewQuery::default().apply(ViewOptions::default());
        assert_eq!(opts, ViewOptions::default());
    }
}
