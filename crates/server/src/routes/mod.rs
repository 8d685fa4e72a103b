//! API route handlers for the branchlog server.

pub mod branches;
pub mod export;
pub mod health;
pub mod import;
pub mod logs;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET /api/logs - Filtered, paginated table view with pager and charts
/// - POST /api/logs - Create a log record (store-assigned id)
/// - GET /api/logs/{id} - Edit-entry payload for one record
/// - PUT /api/logs/{id} - Merge-update one record
/// - DELETE /api/logs/{id} - Delete one record
/// - GET /api/branches - Branch table (no pagination)
/// - GET /api/branches/names - Branch names for the log form lookup
/// - GET /api/branches/{code} - Edit-entry payload for one branch
/// - PUT /api/branches - Upsert a branch by code
/// - DELETE /api/branches/{code} - Delete a branch (no cascade)
/// - GET /api/export/logs.xlsx - All logs as a one-sheet workbook
/// - GET /api/export/logs.pdf - PDF snapshot of the visible table
/// - POST /api/import/logs - Bulk-upsert logs from a spreadsheet
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", logs::router())
        .nest("/api", branches::router())
        .nest("/api", export::router())
        .nest("/api", import::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchlog_db::Database;

    #[tokio::test]
    async fn api_routes_creation() {
        let db = Database::new_in_memory().await.expect("in-memory DB");
        let state = AppState::new(db);
        let _router = api_routes(state);
    }
}
