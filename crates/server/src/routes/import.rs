// crates/server/src/routes/import.rs
//! Spreadsheet import: bulk-upsert log records from an uploaded workbook.

use std::io::Cursor;
use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use calamine::{Data, Reader, Xlsx};
use serde::Serialize;

use branchlog_core::LogDraft;
use branchlog_db::ImportedLog;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for POST /api/import/logs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Rows upserted into the store.
    pub imported: usize,
    /// Rows skipped because no recognizable field survived parsing.
    pub skipped: usize,
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Spreadsheets store numerics as floats; an integral cost or id
        // comes back without a trailing ".0".
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Map one data row through the header row onto record fields. Unknown
/// columns are ignored; a row yielding no recognizable value is skipped.
fn parse_row(headers: &[String], row: &[Data]) -> Option<ImportedLog> {
    let mut id = None;
    let mut draft = LogDraft::default();
    let mut matched = false;

    for (header, cell) in headers.iter().zip(row) {
        let value = cell_text(cell);
        if value.is_empty() {
            continue;
        }
        match header.as_str() {
            "id" => id = value.parse::<i64>().ok(),
            "branchName" => {
                draft.branch_name = value;
                matched = true;
            }
            "dateOfRequest" => {
                draft.date_of_request = value;
                matched = true;
            }
            "dateOfDelivery" => {
                draft.date_of_delivery = value;
                matched = true;
            }
            "materialCreated" => {
                draft.material_created = value;
                matched = true;
            }
            "channelOfRequest" => {
                draft.channel_of_request = value;
                matched = true;
            }
            "status" => {
                draft.status = value;
                matched = true;
            }
            "surveyCompleted" => {
                draft.survey_completed = value;
                matched = true;
            }
            "cost" => {
                draft.cost = value;
                matched = true;
            }
            "surveyRating" => {
                draft.survey_rating = value;
                matched = true;
            }
            _ => {}
        }
    }

    (matched || id.is_some()).then_some(ImportedLog { id, draft })
}

/// Decode the first sheet into importable rows plus a skipped-row count.
fn parse_workbook(bytes: &[u8]) -> Result<(Vec<ImportedLog>, usize), ApiError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ApiError::InvalidImport(format!("unreadable workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ApiError::InvalidImport("workbook has no sheets".to_string()))?
        .map_err(|e| ApiError::InvalidImport(format!("unreadable first sheet: {e}")))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok((Vec::new(), 0));
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let mut parsed = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        match parse_row(&headers, row) {
            Some(log) => parsed.push(log),
            None => skipped += 1,
        }
    }
    Ok((parsed, skipped))
}

/// POST /api/import/logs - Body is the uploaded spreadsheet's bytes.
///
/// Rows carrying an `id` replace that id (a collision with an unrelated
/// record overwrites it); rows without one insert as new records. Zero
/// parsed rows mutate nothing.
pub async fn import_logs(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ImportResponse>> {
    // No file selected: silent no-op.
    if body.is_empty() {
        return Ok(Json(ImportResponse {
            imported: 0,
            skipped: 0,
        }));
    }

    let (rows, skipped) = parse_workbook(&body)?;
    let imported = state.db.bulk_put_logs(&rows).await?;
    if imported > 0 {
        tracing::info!(imported, skipped, "Imported log records from spreadsheet");
    }

    Ok(Json(ImportResponse { imported, skipped }))
}

/// Create the import routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/import/logs", post(import_logs))
}
