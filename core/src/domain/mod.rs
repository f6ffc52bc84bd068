//! # Domain Module
//!
//! Contains all business logic for the finances tracker.
//!
//! This module encapsulates the core rules that define how transactions are
//! summarized, categorized, formatted, and registered. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **categories**: The typed category registry and its compiled-in default
//! - **dashboard**: Income/expense totals, balance, and last-activity dates
//! - **spending**: Per-category expense breakdown for a selected month
//! - **display**: Locale and currency aware formatting of every user-facing value
//! - **registration**: Form validation and creation of new transactions
//! - **transaction_service**: Loading and storing transactions through the storage layer
//!
//! ## Core Concepts
//!
//! - **Transaction**: A single financial event, either an entry (income) or an exit (expense)
//! - **Dashboard Summary**: The three headline numbers plus the dates that contextualize them
//! - **Category Summary**: How one month of spending distributes across the registry
//! - **Registry**: The ordered list of categories; its order is presentation order
//!
//! ## Business Rules
//!
//! - Amounts are strictly positive; direction comes from the transaction kind
//! - Balance is always entries minus expenses, never recomputed from a cache
//! - Category breakdowns consider expenses only, within a single calendar month
//! - Categories with no spending in the month are omitted, not shown as zero
//! - Per-category percentages are rounded independently and may not sum to 100
//!
//! ## Design Principles
//!
//! - **Pure Aggregation**: Summaries are plain functions over snapshots of data
//! - **Storage Agnostic**: Works with any storage implementation
//! - **UI Agnostic**: Formatting produces strings, never widgets
//! - **Configuration Driven**: Locale, currency, and categories are all injectable

pub mod categories;
pub mod dashboard;
pub mod display;
pub mod registration;
pub mod spending;
pub mod transaction_service;

// Re-export the main types that other modules need
pub use categories::CategoryRegistry;
pub use dashboard::DashboardService;
pub use display::{Currency, DisplayConfig, DisplayService, FormatError, Locale};
pub use registration::RegistrationService;
pub use spending::SpendingService;
pub use transaction_service::TransactionService;
