// crates/core/src/query.rs
//! Filtering and pagination over the full `logs` list.
//!
//! The filter/page state travels as an explicit [`LogQuery`] value (query
//! params in, outcome out) rather than shared mutable state, so the engine
//! is a pure function of its inputs.

use serde::Deserialize;

use crate::types::LogRecord;

/// Fixed page size of the log table.
pub const ITEMS_PER_PAGE: usize = 10;

/// Filter + page state for the log table.
///
/// An empty filter string means "no constraint". `page` is 1-based; 0 (the
/// unset default) is treated as page 1. A filter change restarts at page 1 —
/// callers encode that by sending the new filter without a page value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogQuery {
    pub status: String,
    pub channel: String,
    pub branch: String,
    pub page: usize,
}

impl LogQuery {
    /// Keep a record iff every non-empty filter matches: status and channel
    /// by equality, branch by case-insensitive substring of the branch name.
    pub fn matches(&self, log: &LogRecord) -> bool {
        (self.status.is_empty() || log.status == self.status)
            && (self.channel.is_empty() || log.channel_of_request == self.channel)
            && (self.branch.is_empty()
                || log
                    .branch_name
                    .to_lowercase()
                    .contains(&self.branch.to_lowercase()))
    }
}

/// A resolved page over the filtered set.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// The `ITEMS_PER_PAGE`-sized window shown for `current_page`.
    pub page_logs: Vec<LogRecord>,
    /// The whole filtered set, pre-pagination. Feeds chart aggregation.
    pub filtered: Vec<LogRecord>,
    /// The requested page clamped into `[1, total_pages]`.
    pub current_page: usize,
    /// Never below 1, even for an empty filtered set.
    pub total_pages: usize,
}

/// Filter the full log list, clamp the requested page, slice the window.
pub fn run_query(logs: &[LogRecord], query: &LogQuery) -> QueryOutcome {
    let filtered: Vec<LogRecord> = logs.iter().filter(|l| query.matches(l)).cloned().collect();

    let total_pages = filtered.len().div_ceil(ITEMS_PER_PAGE).max(1);
    let current_page = query.page.max(1).min(total_pages);
    let start = (current_page - 1) * ITEMS_PER_PAGE;
    let page_logs: Vec<LogRecord> = filtered
        .iter()
        .skip(start)
        .take(ITEMS_PER_PAGE)
        .cloned()
        .collect();

    QueryOutcome {
        page_logs,
        filtered,
        current_page,
        total_pages,
    }
}
