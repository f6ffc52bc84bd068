use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A single persisted income/expense record.
///
/// Stored on disk as one element of the user's JSON array. Older records
/// carry `amount` as a numeric string (the submitted form value was saved
/// verbatim), so deserialization accepts both forms; new records are
/// written as plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Free-text label entered by the user
    pub name: String,
    /// Always positive; the direction comes from `kind`
    #[serde(deserialize_with = "amount_from_string_or_number")]
    pub amount: f64,
    /// Direction of the transaction, persisted as "positive"/"negative"
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Key into the category registry
    pub category: String,
    /// Creation timestamp (RFC 3339)
    pub date: DateTime<Utc>,
}

/// Direction of a transaction for aggregation and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in
    #[serde(rename = "positive")]
    Income,
    /// Money going out
    #[serde(rename = "negative")]
    Expense,
}

impl TransactionKind {
    pub fn is_income(self) -> bool {
        self == TransactionKind::Income
    }

    pub fn is_expense(self) -> bool {
        self == TransactionKind::Expense
    }

    /// Name used in the persisted JSON
    pub fn wire_name(self) -> &'static str {
        match self {
            TransactionKind::Income => "positive",
            TransactionKind::Expense => "negative",
        }
    }
}

impl Transaction {
    /// Generate a fresh record id (UUID v4)
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// True when the amount is finite and strictly positive, the only form
    /// aggregation accepts
    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}

/// Stored amounts are either numbers or numeric strings; accept both.
fn amount_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("amount is not numeric: '{}'", text))),
    }
}

/// One entry of the category registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    /// Display name shown in lists and report rows
    pub name: String,
    /// Hex color used by charts and list accents
    pub color: String,
}

/// A month/year pair selecting the category report window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
    /// 1 = January ... 12 = December
    pub month: u32,
    pub year: i32,
}

impl Default for MonthRef {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }
}

impl MonthRef {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// The current month on the local clock
    pub fn current() -> Self {
        Self::default()
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// True when the timestamp's UTC calendar date falls inside this month
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

/// Raw dashboard aggregates: totals per direction plus the newest date seen
/// in each partition.
///
/// A `None` date means the partition was empty; it must render as a
/// no-transactions indicator, never as a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub entries_total: f64,
    pub expenses_total: f64,
    /// `entries_total - expenses_total`, may be negative
    pub balance: f64,
    pub last_entry_date: Option<DateTime<Utc>>,
    pub last_expense_date: Option<DateTime<Utc>>,
}

impl DashboardSummary {
    /// The all-zero summary produced for an empty transaction list
    pub fn empty() -> Self {
        Self {
            entries_total: 0.0,
            expenses_total: 0.0,
            balance: 0.0,
            last_entry_date: None,
            last_expense_date: None,
        }
    }
}

/// One category's share of a month's expenses.
///
/// `percent` is the precise ratio times 100; integer rounding happens only
/// at the formatting boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub key: String,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub percent: f64,
}

/// One formatted dashboard card: amount string plus footer label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightCard {
    pub amount: String,
    pub last_transaction: String,
}

/// The dashboard's three cards: income, expenses, balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardHighlights {
    pub entries: HighlightCard,
    pub expenses: HighlightCard,
    pub total: HighlightCard,
}

/// A display-ready row of the dashboard's transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTransaction {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub kind: TransactionKind,
    /// Registry display name, or the raw key when the registry has no match
    pub category: String,
    pub date: String,
}

/// A display-ready row of the monthly category report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryCard {
    pub key: String,
    pub name: String,
    pub color: String,
    pub total: String,
    pub percent: String,
}

/// Raw input of the registration form.
///
/// `amount` stays a string until validation parses it; `kind` and
/// `category_key` are `None` until the user picks them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub amount: String,
    pub kind: Option<TransactionKind>,
    pub category_key: Option<String>,
}

impl RegisterForm {
    pub fn new(
        name: &str,
        amount: &str,
        kind: Option<TransactionKind>,
        category_key: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            amount: amount.to_string(),
            kind,
            category_key: category_key.map(|k| k.to_string()),
        }
    }
}

/// Why a registration form was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationError {
    NameRequired,
    AmountRequired,
    AmountNotNumeric,
    AmountNotPositive,
    KindNotSelected,
    CategoryNotSelected,
}
