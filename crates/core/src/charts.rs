// crates/core/src/charts.rs
//! Chart aggregation over the filtered log set.
//!
//! Produces label→count series for the two summary charts. Rendering (and
//! chart handle lifecycle) belongs to the client; this module only shapes
//! the data.

use serde::Serialize;

use crate::types::LogRecord;

/// How the client draws a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// Labels + values for one chart. Label order is first-seen order over the
/// filtered set, so redraws are stable for the same data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Both summary charts: request counts by status (pie) and by branch (bar).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub status: ChartSeries,
    pub branch: ChartSeries,
}

fn count_by<'a>(
    logs: &'a [LogRecord],
    kind: ChartKind,
    key: impl Fn(&'a LogRecord) -> &'a str,
) -> ChartSeries {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<u64> = Vec::new();
    for log in logs {
        let k = key(log);
        match labels.iter().position(|label| label == k) {
            Some(i) => values[i] += 1,
            None => {
                labels.push(k.to_string());
                values.push(1);
            }
        }
    }
    ChartSeries {
        kind,
        labels,
        values,
    }
}

/// Aggregate the *filtered* set (not just the visible page) into both chart
/// series.
pub fn chart_data(filtered: &[LogRecord]) -> ChartData {
    ChartData {
        status: count_by(filtered, ChartKind::Pie, |l| &l.status),
        branch: count_by(filtered, ChartKind::Bar, |l| &l.branch_name),
    }
}
