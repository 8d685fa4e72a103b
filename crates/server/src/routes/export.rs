// crates/server/src/routes/export.rs
//! Spreadsheet and PDF export endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_xlsxwriter::{Workbook, XlsxError};

use branchlog_core::{log_table, run_query, LogQuery, LogRecord, LogTableView};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Exported column order; doubles as the sheet's header row. Names are the
/// record field names, so an exported file imports back unchanged.
pub(crate) const EXPORT_COLUMNS: [&str; 10] = [
    "id",
    "branchName",
    "dateOfRequest",
    "dateOfDelivery",
    "materialCreated",
    "channelOfRequest",
    "status",
    "surveyCompleted",
    "cost",
    "surveyRating",
];

/// Serialize all logs into one workbook with a single sheet named "Logs".
pub(crate) fn build_workbook(logs: &[LogRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Logs")?;

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (i, log) in logs.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, log.id as f64)?;
        sheet.write_string(row, 1, &log.branch_name)?;
        sheet.write_string(row, 2, &log.date_of_request)?;
        sheet.write_string(row, 3, &log.date_of_delivery)?;
        sheet.write_string(row, 4, &log.material_created)?;
        sheet.write_string(row, 5, &log.channel_of_request)?;
        sheet.write_string(row, 6, &log.status)?;
        sheet.write_string(row, 7, &log.survey_completed)?;
        sheet.write_string(row, 8, &log.cost)?;
        sheet.write_string(row, 9, &log.survey_rating)?;
    }

    workbook.save_to_buffer()
}

// Landscape A4.
const PAGE_WIDTH_MM: f64 = 297.0;
const PAGE_HEIGHT_MM: f64 = 210.0;
const MARGIN_MM: f64 = 10.0;

/// Display headers of the visible table, in column order.
const TABLE_HEADERS: [&str; 10] = [
    "#", "Branch", "Request", "Delivery", "Material", "Channel", "Status", "Survey", "Cost",
    "Rating",
];

fn pdf_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::Internal(format!("PDF render failed: {e}"))
}

/// Draw the visible table (header + current page rows, or the placeholder
/// row) onto one landscape page, columns sharing the printable width.
fn build_pdf(view: &LogTableView) -> ApiResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "OfflineLogs",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let header_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;
    let layer = doc.get_page(page).get_layer(layer);

    let col_width = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / TABLE_HEADERS.len() as f64;
    let column_x = |i: usize| Mm((MARGIN_MM + i as f64 * col_width) as f32);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - 6.0;

    for (i, title) in TABLE_HEADERS.iter().enumerate() {
        layer.use_text(*title, 10.0, column_x(i), Mm(y as f32), &header_font);
    }
    y -= 7.0;

    if let Some(placeholder) = view.placeholder {
        layer.use_text(placeholder, 9.0, column_x(0), Mm(y as f32), &font);
    }
    for row in &view.rows {
        let record = &row.record;
        let cells = [
            row.row_number.to_string(),
            record.branch_name.clone(),
            record.date_of_request.clone(),
            record.date_of_delivery.clone(),
            record.material_created.clone(),
            record.channel_of_request.clone(),
            record.status.clone(),
            record.survey_completed.clone(),
            record.cost.clone(),
            record.survey_rating.clone(),
        ];
        for (i, cell) in cells.iter().enumerate() {
            layer.use_text(cell.as_str(), 9.0, column_x(i), Mm(y as f32), &font);
        }
        y -= 6.0;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn attachment(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// GET /api/export/logs.xlsx - Every log record, bypassing filters.
pub async fn export_xlsx(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let logs = state.db.list_logs().await?;
    let bytes = build_workbook(&logs)
        .map_err(|e| ApiError::Internal(format!("Spreadsheet encode failed: {e}")))?;

    Ok(attachment(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "OfflineLogs.xlsx",
        bytes,
    ))
}

/// GET /api/export/logs.pdf?status=&channel=&branch=&page=
///
/// Snapshots the currently visible table — the same filter and page the
/// list endpoint would show — not the full dataset.
pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Response> {
    let logs = state.db.list_logs().await?;
    let outcome = run_query(&logs, &query);
    let bytes = build_pdf(&log_table(&outcome))?;

    Ok(attachment("application/pdf", "OfflineLogs.pdf", bytes))
}

/// Create the export routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export/logs.xlsx", get(export_xlsx))
        .route("/export/logs.pdf", get(export_pdf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{do_get_raw, do_post, test_app};
    use axum::http::StatusCode;
    use calamine::{Reader, Xlsx};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Cursor;

    #[tokio::test]
    async fn xlsx_export_names_the_sheet_and_file() {
        let app = test_app().await;
        do_post(
            app.clone(),
            "/api/logs",
            json!({
                "branchName": "Armadale",
                "dateOfRequest": "2024-05-01",
                "dateOfDelivery": "2024-05-10",
                "status": "Pending",
                "cost": "42.00",
            }),
        )
        .await;

        let (status, headers, bytes) = do_get_raw(app, "/api/export/logs.xlsx").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"OfflineLogs.xlsx\""
        );

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("readable workbook");
        assert_eq!(workbook.sheet_names(), vec!["Logs"]);
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], EXPORT_COLUMNS);
        assert_eq!(rows[1][1], "Armadale");
        assert_eq!(rows[1][8], "42.00");
    }

    #[tokio::test]
    async fn xlsx_export_of_empty_store_has_header_only() {
        let app = test_app().await;
        let (status, _, bytes) = do_get_raw(app, "/api/export/logs.xlsx").await;
        assert_eq!(status, StatusCode::OK);

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("readable workbook");
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.rows().count(), 1);
    }

    #[tokio::test]
    async fn pdf_export_snapshots_the_visible_page() {
        let app = test_app().await;
        for i in 0..12 {
            do_post(
                app.clone(),
                "/api/logs",
                json!({
                    "branchName": format!("Branch {i}"),
                    "dateOfRequest": "2024-05-01",
                    "dateOfDelivery": "2024-05-10",
                }),
            )
            .await;
        }

        let (status, headers, bytes) = do_get_raw(app, "/api/export/logs.pdf?page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"OfflineLogs.pdf\""
        );
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn pdf_export_of_empty_table_still_renders() {
        let app = test_app().await;
        let (status, _, bytes) = do_get_raw(app, "/api/export/logs.pdf").await;
        assert_eq!(status, StatusCode::OK);
        assert!(bytes.starts_with(b"%PDF"));
    }
}
