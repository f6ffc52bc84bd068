//! Presentation formatting for the finances tracker.
//!
//! This module turns raw summaries and transactions into the exact strings
//! the user sees: currency amounts, percentages, dates, and the dashboard's
//! highlight cards. It handles locale and currency conventions so no consumer
//! ever formats a number by hand.
//!
//! ## Key Responsibilities
//!
//! - **Currency Formatting**: Grouped thousands and locale decimal separators
//! - **Date Formatting**: Month-day labels, short dates, and report headers
//! - **Card Assembly**: The three dashboard highlight cards with their captions
//! - **Row Assembly**: Transaction list rows and category report rows
//! - **Input Protection**: Refusing to render NaN or infinite amounts
//!
//! ## Design Principles
//!
//! - **Configuration Driven**: One `DisplayConfig` decides locale and currency
//! - **Pure Formatting**: Every function maps values to strings, nothing more
//! - **Fail Fast**: A non-finite amount is an error, never a `NaN` on screen

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    CategorySummary, DashboardHighlights, DashboardSummary, FormattedTransaction, HighlightCard,
    HistoryCard, MonthRef, Transaction,
};

use crate::domain::categories::CategoryRegistry;

/// Language the formatted output speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    PtBr, // "10 de abril", "10/01/23"
    EnUs, // "April 10", "01/10/23"
}

/// Currency convention for amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Brl, // "R$ 1.234,56"
    Usd, // "$1,234.56"
}

/// Configuration for display formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub locale: Locale,
    pub currency: Currency,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::PtBr,
            currency: Currency::Brl,
        }
    }
}

/// Why a value could not be formatted
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The amount is NaN or infinite and must never reach the screen
    #[error("amount is not a finite number: {value}")]
    InvalidAmount { value: f64 },
}

/// Display service that handles all user-facing formatting
#[derive(Clone)]
pub struct DisplayService {
    config: DisplayConfig,
}

impl DisplayService {
    /// Create a new DisplayService with the default configuration
    pub fn new() -> Self {
        Self {
            config: DisplayConfig::default(),
        }
    }

    /// Create a new DisplayService with custom configuration
    pub fn with_config(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// The active display configuration
    pub fn config(&self) -> DisplayConfig {
        self.config
    }

    /// Format an amount as currency.
    ///
    /// Thousands are grouped and two decimals are always shown, following the
    /// configured currency's convention. Negative amounts put the sign before
    /// the symbol (`-R$ 300,00`). Non-finite input is refused.
    pub fn format_currency(&self, amount: f64) -> Result<String, FormatError> {
        if !amount.is_finite() {
            return Err(FormatError::InvalidAmount { value: amount });
        }

        let cents = (amount.abs() * 100.0).round() as u64;
        let whole = cents / 100;
        let fraction = cents % 100;

        let (symbol, gap, thousands, decimal) = match self.config.currency {
            Currency::Brl => ("R$", " ", '.', ','),
            Currency::Usd => ("$", "", ',', '.'),
        };

        let sign = if amount < 0.0 { "-" } else { "" };
        let grouped = group_thousands(whole, thousands);

        Ok(format!(
            "{}{}{}{}{}{:02}",
            sign, symbol, gap, grouped, decimal, fraction
        ))
    }

    /// Format a percentage as a whole number, rounding halves away from zero
    pub fn format_percent(&self, percent: f64) -> Result<String, FormatError> {
        if !percent.is_finite() {
            return Err(FormatError::InvalidAmount { value: percent });
        }

        Ok(format!("{}%", percent.round() as i64))
    }

    /// Format a date as day-of-month plus full month name
    pub fn format_month_day(&self, date: &DateTime<Utc>) -> String {
        let day = date.day();
        let month = self.month_name(date.month());

        match self.config.locale {
            Locale::PtBr => format!("{} de {}", day, month),
            Locale::EnUs => format!("{} {}", month, day),
        }
    }

    /// Format a date as a two-digit short date in locale field order
    pub fn format_short_date(&self, date: &DateTime<Utc>) -> String {
        let day = date.day();
        let month = date.month();
        let year = date.year() % 100;

        match self.config.locale {
            Locale::PtBr => format!("{:02}/{:02}/{:02}", day, month, year),
            Locale::EnUs => format!("{:02}/{:02}/{:02}", month, day, year),
        }
    }

    /// Format a date as the month-plus-year report header
    pub fn format_month_year(&self, date: &DateTime<Utc>) -> String {
        format!("{}, {}", self.month_name(date.month()), date.year())
    }

    /// Format a month selection as the month-plus-year report header
    pub fn format_month_ref(&self, month: &MonthRef) -> String {
        format!("{}, {}", self.month_name(month.month), month.year)
    }

    /// Build the dashboard's three highlight cards.
    ///
    /// Each card pairs a formatted total with a caption about the latest
    /// activity on that side. Sides that never saw a transaction get the
    /// no-transactions indicator instead of a date; the total card describes
    /// the covered interval, which ends at the last expense.
    pub fn dashboard_highlights(
        &self,
        summary: &DashboardSummary,
    ) -> Result<DashboardHighlights, FormatError> {
        let entries_caption = match &summary.last_entry_date {
            Some(date) => self.last_entry_label(&self.format_month_day(date)),
            None => self.no_transactions_label().to_string(),
        };

        let expenses_caption = match &summary.last_expense_date {
            Some(date) => self.last_expense_label(&self.format_month_day(date)),
            None => self.no_transactions_label().to_string(),
        };

        let interval_caption = match &summary.last_expense_date {
            Some(date) => self.interval_label(&self.format_month_day(date)),
            None => self.no_transactions_label().to_string(),
        };

        Ok(DashboardHighlights {
            entries: HighlightCard {
                amount: self.format_currency(summary.entries_total)?,
                last_transaction: entries_caption,
            },
            expenses: HighlightCard {
                amount: self.format_currency(summary.expenses_total)?,
                last_transaction: expenses_caption,
            },
            total: HighlightCard {
                amount: self.format_currency(summary.balance)?,
                last_transaction: interval_caption,
            },
        })
    }

    /// Format a transaction list into display rows.
    ///
    /// Category keys resolve to their registry display name; an unknown key
    /// is shown as-is rather than dropped.
    pub fn format_transactions(
        &self,
        transactions: &[Transaction],
        registry: &CategoryRegistry,
    ) -> Result<Vec<FormattedTransaction>, FormatError> {
        transactions
            .iter()
            .map(|transaction| {
                Ok(FormattedTransaction {
                    id: transaction.id.clone(),
                    name: transaction.name.clone(),
                    amount: self.format_currency(transaction.amount)?,
                    kind: transaction.kind,
                    category: registry.display_name(&transaction.category).to_string(),
                    date: self.format_short_date(&transaction.date),
                })
            })
            .collect()
    }

    /// Format category summaries into report rows
    pub fn history_cards(
        &self,
        summaries: &[CategorySummary],
    ) -> Result<Vec<HistoryCard>, FormatError> {
        summaries
            .iter()
            .map(|summary| {
                Ok(HistoryCard {
                    key: summary.key.clone(),
                    name: summary.name.clone(),
                    color: summary.color.clone(),
                    total: self.format_currency(summary.total)?,
                    percent: self.format_percent(summary.percent)?,
                })
            })
            .collect()
    }

    /// Get human-readable month name
    fn month_name(&self, month: u32) -> &'static str {
        match self.config.locale {
            Locale::PtBr => match month {
                1 => "janeiro",
                2 => "fevereiro",
                3 => "março",
                4 => "abril",
                5 => "maio",
                6 => "junho",
                7 => "julho",
                8 => "agosto",
                9 => "setembro",
                10 => "outubro",
                11 => "novembro",
                12 => "dezembro",
                _ => "mês inválido",
            },
            Locale::EnUs => match month {
                1 => "January",
                2 => "February",
                3 => "March",
                4 => "April",
                5 => "May",
                6 => "June",
                7 => "July",
                8 => "August",
                9 => "September",
                10 => "October",
                11 => "November",
                12 => "December",
                _ => "Invalid Month",
            },
        }
    }

    fn no_transactions_label(&self) -> &'static str {
        match self.config.locale {
            Locale::PtBr => "Não há Transações",
            Locale::EnUs => "No transactions",
        }
    }

    fn last_entry_label(&self, month_day: &str) -> String {
        match self.config.locale {
            Locale::PtBr => format!("Última entrada dia {}", month_day),
            Locale::EnUs => format!("Last income on {}", month_day),
        }
    }

    fn last_expense_label(&self, month_day: &str) -> String {
        match self.config.locale {
            Locale::PtBr => format!("Última saída dia {}", month_day),
            Locale::EnUs => format!("Last expense on {}", month_day),
        }
    }

    fn interval_label(&self, month_day: &str) -> String {
        match self.config.locale {
            Locale::PtBr => format!("01 a {}", month_day),
            Locale::EnUs => format!("01 to {}", month_day),
        }
    }
}

impl Default for DisplayService {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a separator every three digits, counting from the right
fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    grouped
}
