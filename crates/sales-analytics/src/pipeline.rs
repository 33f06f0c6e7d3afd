//! Filter and aggregation pipeline
//!
//! A pure function from (log, selection) to a derived view. Nothing here is
//! cached; callers recompute the view whenever the selection changes.

use serde::Serialize;
use tracing::debug;

use crate::aggregations::Aggregations;
use crate::filters::{DateWindow, FilterSelection};
use crate::metrics::Kpis;
use crate::model::{Transaction, TransactionLog};

/// Everything derived from one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView {
    pub window: DateWindow,
    pub previous_window: DateWindow,
    /// Matching records in log order
    pub records: Vec<Transaction>,
    /// Records in the previous window matching the same value filters
    pub previous_records: Vec<Transaction>,
    pub kpis: Kpis,
    pub aggregations: Aggregations,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matching records, newest first
    ///
    /// Records sharing a date keep their log order.
    pub fn detail_records(&self) -> Vec<Transaction> {
        let mut rows = self.records.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

/// Apply a selection to the log and compute KPIs and grouped tables
pub fn apply_filters(log: &TransactionLog, selection: &FilterSelection) -> FilteredView {
    let window = selection.window();
    let previous_window = selection.previous_window();

    let records: Vec<Transaction> = log.iter().filter(|r| selection.matches(r)).copied().collect();
    let previous_records: Vec<Transaction> = log
        .iter()
        .filter(|r| previous_window.contains(r.date) && selection.matches_values(r))
        .copied()
        .collect();

    let kpis = Kpis::compute(&records, &previous_records);
    let aggregations = Aggregations::compute(&records);

    debug!(
        start = %window.start(),
        end = %window.end(),
        matched = records.len(),
        previous = previous_records.len(),
        revenue = kpis.total_revenue,
        "applied filters"
    );

    FilteredView {
        window,
        previous_window,
        records,
        previous_records,
        kpis,
        aggregations,
    }
}
