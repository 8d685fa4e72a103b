// crates/server/src/routes/branches.rs
//! Branch lookup-table endpoints: the unpaginated table view, the name list
//! that feeds the log form's branch datalist, upsert, and delete.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use branchlog_core::{branch_table, Branch, BranchTableView};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/branches - The branch table, one row per branch.
pub async fn list_branches(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BranchTableView>> {
    let branches = state.db.list_branches().await?;
    Ok(Json(branch_table(branches)))
}

/// GET /api/branches/names - Branch display names for the log form lookup.
pub async fn branch_names(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let names = state
        .db
        .list_branches()
        .await?
        .into_iter()
        .map(|b| b.name)
        .collect();
    Ok(Json(names))
}

/// GET /api/branches/{code} - Load one branch into the edit form.
pub async fn get_branch(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<Branch>> {
    let branch = state
        .db
        .get_branch(&code)
        .await?
        .ok_or(ApiError::BranchNotFound(code))?;
    Ok(Json(branch))
}

/// PUT /api/branches - Full upsert keyed by `code`; an existing code is
/// silently overwritten. No validation beyond the required fields.
pub async fn put_branch(
    State(state): State<Arc<AppState>>,
    Json(branch): Json<Branch>,
) -> ApiResult<Json<Branch>> {
    state.db.put_branch(&branch).await?;
    Ok(Json(branch))
}

/// DELETE /api/branches/{code} - Delete by code. No cascade: logs
/// referencing the branch by name keep their value.
pub async fn delete_branch(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.delete_branch(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the branch routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/branches", get(list_branches).put(put_branch))
        .route("/branches/names", get(branch_names))
        .route("/branches/{code}", get(get_branch).delete(delete_branch))
}
