// crates/core/src/view.rs
//! Table view shapes for the log page and the branch list.

use serde::Serialize;

use crate::query::{QueryOutcome, ITEMS_PER_PAGE};
use crate::types::{Branch, LogRecord};

pub const NO_RECORDS_PLACEHOLDER: &str = "No records";
pub const NO_BRANCHES_PLACEHOLDER: &str = "No branches";

/// One rendered table row: the record plus its running 1-based row number,
/// which continues across pages. The embedded `id` keys the row's
/// edit/delete actions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRow {
    pub row_number: usize,
    #[serde(flatten)]
    pub record: LogRecord,
}

/// Pager state for the table footer: shown as `current / total`, with prev
/// disabled on the first page and next disabled on the last.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// The visible log table. Zero matching records yield an empty row list and
/// the `No records` placeholder instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTableView {
    pub rows: Vec<LogRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    pub page: PageInfo,
}

/// Build the table view for a resolved query outcome.
pub fn log_table(outcome: &QueryOutcome) -> LogTableView {
    let offset = (outcome.current_page - 1) * ITEMS_PER_PAGE;
    let rows: Vec<LogRow> = outcome
        .page_logs
        .iter()
        .enumerate()
        .map(|(i, record)| LogRow {
            row_number: offset + i + 1,
            record: record.clone(),
        })
        .collect();

    let placeholder = rows.is_empty().then_some(NO_RECORDS_PLACEHOLDER);

    LogTableView {
        rows,
        placeholder,
        page: PageInfo {
            current_page: outcome.current_page,
            total_pages: outcome.total_pages,
            has_prev: outcome.current_page > 1,
            has_next: outcome.current_page < outcome.total_pages,
        },
    }
}

/// The branch table: one row per branch, no pagination. Edit/delete actions
/// key on `code`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchTableView {
    pub rows: Vec<Branch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

pub fn branch_table(branches: Vec<Branch>) -> BranchTableView {
    let placeholder = branches.is_empty().then_some(NO_BRANCHES_PLACEHOLDER);
    BranchTableView {
        rows: branches,
        placeholder,
    }
}
