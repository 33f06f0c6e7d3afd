//! Scalar KPIs for a filtered record set

use serde::Serialize;

use crate::model::Transaction;

/// Headline metrics for the selected period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub avg_transaction: f64,
    pub total_quantity: u64,
    pub previous_revenue: f64,
    /// Percent change vs. the previous period
    pub growth_rate: f64,
}

impl Kpis {
    pub fn compute(current: &[Transaction], previous: &[Transaction]) -> Self {
        let revenue = total_revenue(current);
        let total_transactions = current.len();
        let avg_transaction = if total_transactions > 0 {
            revenue / total_transactions as f64
        } else {
            0.0
        };
        let previous_revenue = total_revenue(previous);

        Self {
            total_revenue: revenue,
            total_transactions,
            avg_transaction,
            total_quantity: current.iter().map(|r| r.quantity as u64).sum(),
            previous_revenue,
            growth_rate: growth_rate(revenue, previous_revenue),
        }
    }
}

pub fn total_revenue(records: &[Transaction]) -> f64 {
    records.iter().map(|r| r.revenue).sum()
}

/// Period-over-period revenue change in percent
///
/// Zero when the previous period has no revenue, even if the current one does.
pub fn growth_rate(current_revenue: f64, previous_revenue: f64) -> f64 {
    if previous_revenue > 0.0 {
        (current_revenue - previous_revenue) / previous_revenue * 100.0
    } else {
        0.0
    }
}
