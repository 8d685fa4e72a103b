// crates/server/src/routes/logs.rs
//! Log endpoints: the filtered/paginated table view and the form
//! submit/edit/delete cycle.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use branchlog_core::{
    chart_data, log_table, run_query, survey_rating_visible, validate_log, ChartData,
    EditingTarget, LogDraft, LogQuery, LogRecord, LogTableView,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for GET /api/logs: the visible table, its pager, and the chart
/// series derived from the whole filtered set — one payload per redraw, the
/// table and charts always agree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsResponse {
    #[serde(flatten)]
    pub table: LogTableView,
    pub charts: ChartData,
    pub filtered_total: usize,
}

/// Edit-entry payload for GET /api/logs/{id}: every stored field by its form
/// name, plus whether the survey-rating control is revealed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDetail {
    #[serde(flatten)]
    pub record: LogRecord,
    pub survey_rating_visible: bool,
}

/// GET /api/logs?status=&channel=&branch=&page=
///
/// Empty filter params mean "no constraint". A filter change restarts at
/// page 1 (send the new filter without a page value); a stale page is
/// clamped into `[1, totalPages]`.
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<LogsResponse>> {
    let logs = state.db.list_logs().await?;
    let outcome = run_query(&logs, &query);

    Ok(Json(LogsResponse {
        table: log_table(&outcome),
        charts: chart_data(&outcome.filtered),
        filtered_total: outcome.filtered.len(),
    }))
}

/// GET /api/logs/{id} - Load one record into the edit form.
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<LogDetail>> {
    let record = state
        .db
        .get_log(id)
        .await?
        .ok_or(ApiError::LogNotFound(id))?;
    let survey_rating_visible = survey_rating_visible(&record.survey_completed);

    Ok(Json(LogDetail {
        record,
        survey_rating_visible,
    }))
}

/// Validate and persist one form submission. The editing target is an
/// explicit value (create vs. merge-update of an id), not a hidden flag on
/// the form.
async fn save_log(
    state: &AppState,
    target: EditingTarget,
    draft: LogDraft,
) -> ApiResult<LogRecord> {
    validate_log(&draft)?;

    match target {
        EditingTarget::New => {
            let id = state.db.insert_log(&draft).await?;
            Ok(draft.into_record(id))
        }
        EditingTarget::Log(id) => {
            if !state.db.update_log(id, &draft).await? {
                return Err(ApiError::LogNotFound(id));
            }
            Ok(draft.into_record(id))
        }
    }
}

/// POST /api/logs - Create a record with a store-assigned id.
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<LogDraft>,
) -> ApiResult<(StatusCode, Json<LogRecord>)> {
    let record = save_log(&state, EditingTarget::New, draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/logs/{id} - Merge the submitted fields into an existing record.
pub async fn update_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<LogDraft>,
) -> ApiResult<Json<LogRecord>> {
    let record = save_log(&state, EditingTarget::Log(id), draft).await?;
    Ok(Json(record))
}

/// DELETE /api/logs/{id} - Delete by id; a missing id is a no-op (the
/// confirm prompt lives client-side).
pub async fn delete_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.delete_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the log routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logs", get(list_logs).post(create_log))
        .route(
            "/logs/{id}",
            get(get_log).put(update_log).delete(delete_log),
        )
}
