//! HTTP request handlers for the ingest and query API.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use logdock_core::{BrowseParams, LogRecord, NewLogRecord, SearchParams};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
}

/// Response for the year-browse endpoint: the matching records plus the
/// echoed raw date-range parameters for display.
#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    /// Records satisfying the filter, in store order.
    pub records: Vec<LogRecord>,
    /// The raw `start_date` year parameter, echoed back.
    pub start_date: Option<String>,
    /// The raw `end_date` year parameter, echoed back.
    pub end_date: Option<String>,
}

/// Handle GET /api/health - health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Handle POST /api/logdata - ingest one log record.
///
/// Persists the record (and its optional metadata) atomically and
/// returns the created representation with its assigned identity.
pub async fn ingest_record(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLogRecord>,
) -> ApiResult<(StatusCode, Json<LogRecord>)> {
    let id = state.store().insert(payload)?;
    info!(id = id.0, "record ingested");

    let record = state
        .store()
        .get(id)
        .ok_or_else(|| ApiError::Internal(format!("record {} vanished after insert", id.0)))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handle GET /api/query_search - precise-mode query.
///
/// All filter parsing happens before the store is touched; a malformed
/// date or regex rejects the request with 400 and no partial results.
pub async fn search_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<LogRecord>>> {
    let spec = params.to_filter()?;
    let mut records = state.store().search(&spec)?;
    records.truncate(state.config().max_results);
    Ok(Json(records))
}

/// Handle GET /api/logs - year-shorthand query.
///
/// Echoes the raw date-range parameters alongside the results so a
/// client can redisplay the active range.
pub async fn browse_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> ApiResult<Json<BrowseResponse>> {
    let spec = params.to_filter()?;
    let mut records = state.store().search(&spec)?;
    records.truncate(state.config().max_results);

    Ok(Json(BrowseResponse {
        records,
        start_date: params.start_date,
        end_date: params.end_date,
    }))
}
