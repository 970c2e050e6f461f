// src/api.rs
//! HTTP surface: the three list endpoints, health, and the shared CORS policy.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics::counter;
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::listing::{sort_newest_first, Limit};
use crate::metrics::Metrics;
use crate::records::{map_rows, retain_valid, Achievement, NewsItem, Project, SheetRecord};
use crate::sheets::{GoogleSheetsClient, SheetSource};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sheets: Arc<dyn SheetSource>,
}

impl AppState {
    pub fn new(config: AppConfig, sheets: Arc<dyn SheetSource>) -> Self {
        Self {
            config: Arc::new(config),
            sheets,
        }
    }

    /// State backed by the real spreadsheet service at `config.sheets_base_url`.
    pub fn from_config(config: AppConfig) -> Self {
        let client = GoogleSheetsClient::new(config.sheets_base_url.clone());
        Self::new(config, Arc::new(client))
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/achievements", get(list_achievements))
        .route("/api/news", get(list_news))
        .route("/api/projects", get(list_projects))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

/// [`router`] plus `/metrics` when the config enables it and a recorder is installed.
pub fn router_with_metrics(state: AppState, metrics: Option<&Metrics>) -> Router {
    let expose = state.config.expose_metrics;
    let app = router(state);
    match metrics {
        Some(m) if expose => app.merge(m.router()),
        _ => app,
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let msg = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };
    error!(error = %msg, "request handler panicked");
    ApiError::Unexpected(msg).into_response()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        warn!("no allowed origins configured; responses carry no CORS headers");
        return CorsLayer::new();
    }

    let allow = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring origin that is not a valid header value");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(allow)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

async fn list_achievements(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    respond::<Achievement>(&state, q.get("limit").map(String::as_str)).await
}

async fn list_news(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    respond::<NewsItem>(&state, q.get("limit").map(String::as_str)).await
}

// Projects are always returned in full; `?limit=` is not read.
async fn list_projects(State(state): State<AppState>) -> Response {
    respond::<Project>(&state, None).await
}

async fn respond<R: SheetRecord>(state: &AppState, raw_limit: Option<&str>) -> Response {
    let result = match Limit::parse(raw_limit) {
        Ok(limit) => list_records::<R>(state, limit).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(data) => {
            counter!("list_requests_total", "kind" => R::KIND, "outcome" => "ok").increment(1);
            Json(ListResponse {
                success: true,
                data,
            })
            .into_response()
        }
        Err(e) => {
            counter!("list_requests_total", "kind" => R::KIND, "outcome" => "error")
                .increment(1);
            error!(kind = R::KIND, error = %e, "list request failed");
            e.into_response()
        }
    }
}

/// Fetch, map, filter, sort and limit one collection.
///
/// Credentials are checked before any upstream call. `limit` is ignored for kinds that
/// are not limitable.
pub async fn list_records<R: SheetRecord>(state: &AppState, limit: Limit) -> ApiResult<Vec<R>> {
    let creds = state.config.credentials()?;
    let rows = state
        .sheets
        .fetch_values(&creds, R::RANGE)
        .await?
        .into_rows();

    if rows.is_empty() {
        info!(kind = R::KIND, source = state.sheets.name(), "no rows in range");
        return Ok(Vec::new());
    }

    let mapped = map_rows::<R>(&rows);
    let kept = retain_valid(mapped);
    let dropped = rows.len() - kept.len();
    if dropped > 0 {
        counter!("records_dropped_total", "kind" => R::KIND).increment(dropped as u64);
    }

    let sorted = sort_newest_first(kept);
    let out = if R::LIMITABLE {
        limit.apply(sorted)
    } else {
        sorted
    };

    info!(
        kind = R::KIND,
        rows = rows.len(),
        dropped,
        returned = out.len(),
        "list served"
    );
    Ok(out)
}
