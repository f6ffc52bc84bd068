//! Monthly spending breakdown by category.
//!
//! Answers "where did the money go this month": filters a transaction
//! snapshot down to one calendar month of expenses and distributes the total
//! across the category registry. The selected month is the only piece of
//! shared state; the aggregation itself takes the month as an argument and
//! stays a pure function.

use log::warn;
use shared::{CategorySummary, MonthRef, Transaction};
use std::sync::{Arc, Mutex};

use crate::domain::categories::CategoryRegistry;

/// Service producing the per-category expense breakdown for one month
#[derive(Clone)]
pub struct SpendingService {
    /// Month the user is currently looking at, shared across clones
    selected_month: Arc<Mutex<MonthRef>>,
}

impl SpendingService {
    /// Create a service starting on the current local month
    pub fn new() -> Self {
        Self::with_month(MonthRef::current())
    }

    /// Create a service starting on an explicit month
    pub fn with_month(month: MonthRef) -> Self {
        Self {
            selected_month: Arc::new(Mutex::new(month)),
        }
    }

    /// The currently selected month
    pub fn current_month(&self) -> MonthRef {
        *self.selected_month.lock().unwrap()
    }

    /// Jump the selection to an explicit month
    pub fn set_month(&self, month: MonthRef) {
        *self.selected_month.lock().unwrap() = month;
    }

    /// Move the selection one month forward and return the new value
    pub fn next_month(&self) -> MonthRef {
        let mut selected = self.selected_month.lock().unwrap();
        *selected = selected.next();
        *selected
    }

    /// Move the selection one month back and return the new value
    pub fn previous_month(&self) -> MonthRef {
        let mut selected = self.selected_month.lock().unwrap();
        *selected = selected.previous();
        *selected
    }

    /// Break the currently selected month down by category
    pub fn summarize_selected(
        &self,
        transactions: &[Transaction],
        registry: &CategoryRegistry,
    ) -> Vec<CategorySummary> {
        self.summarize_month(transactions, &self.current_month(), registry)
    }

    /// Break one month's expenses down by category.
    ///
    /// Only expenses dated inside `month` count. Rows come out in registry
    /// order, and categories with no spending are omitted rather than shown
    /// as zero. Percentages stay precise here; integer rounding belongs to
    /// the formatting layer, and the rounded values are not reconciled to
    /// sum to 100.
    pub fn summarize_month(
        &self,
        transactions: &[Transaction],
        month: &MonthRef,
        registry: &CategoryRegistry,
    ) -> Vec<CategorySummary> {
        let expenses: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.kind.is_expense() && month.contains(&t.date))
            .collect();

        let month_total: f64 = expenses.iter().map(|t| t.amount).sum();
        if month_total == 0.0 {
            return Vec::new();
        }

        // Spending against a key the registry does not know still counts
        // toward the month total, it just gets no row of its own
        for expense in &expenses {
            if registry.get(&expense.category).is_none() {
                warn!(
                    "Transaction '{}' references unknown category '{}'",
                    expense.id, expense.category
                );
            }
        }

        let mut summaries = Vec::new();
        for category in registry.iter() {
            let category_sum: f64 = expenses
                .iter()
                .filter(|t| t.category == category.key)
                .map(|t| t.amount)
                .sum();

            if category_sum > 0.0 {
                summaries.push(CategorySummary {
                    key: category.key.clone(),
                    name: category.name.clone(),
                    color: category.color.clone(),
                    total: category_sum,
                    percent: category_sum / month_total * 100.0,
                });
            }
        }

        summaries
    }
}

impl Default for SpendingService {
    fn default() -> Self {
        Self::new()
    }
}
