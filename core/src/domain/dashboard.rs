//! Dashboard summary calculations.
//!
//! Produces the three headline numbers of the dashboard (entries, expenses,
//! balance) together with the date of the latest transaction on each side.
//! The input is a snapshot: nothing here reads storage or caches results.

use chrono::{DateTime, Utc};
use shared::{DashboardSummary, Transaction};

/// Service that reduces a transaction list to its dashboard summary
#[derive(Clone)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Summarize a full transaction list.
    ///
    /// The list may arrive in any order; the last-activity dates are the
    /// maximum dates per side, not the last list elements. An empty side
    /// sums to zero and has no last date.
    pub fn summarize(&self, transactions: &[Transaction]) -> DashboardSummary {
        let mut summary = DashboardSummary::empty();

        for transaction in transactions {
            if transaction.kind.is_income() {
                summary.entries_total += transaction.amount;
                summary.last_entry_date = latest(summary.last_entry_date, transaction.date);
            } else {
                summary.expenses_total += transaction.amount;
                summary.last_expense_date = latest(summary.last_expense_date, transaction.date);
            }
        }

        summary.balance = summary.entries_total - summary.expenses_total;
        summary
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

fn latest(current: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match current {
        Some(existing) if existing >= candidate => Some(existing),
        _ => Some(candidate),
    }
}
