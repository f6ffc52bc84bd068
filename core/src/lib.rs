//! # GoFinances Core
//!
//! Contains all non-UI logic for the finances tracker.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic for summarizing, formatting, and registering transactions
//! - **Storage**: Data persistence mechanisms (JSON files today, anything else tomorrow)
//!
//! The core is designed to be UI-agnostic: a CLI, a desktop shell, or a web
//! frontend can all sit on top of it without modification.
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//! ```text
//! Consumer (gofin CLI, future UIs)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (JSON files, persistence)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Coordinate between domain logic and data persistence
//! - Provide a clean separation of concerns for maintainability
//!
//! Consumers follow a load-then-derive pipeline: fetch a user's transactions,
//! reduce them with the aggregation services, then hand the results to the
//! display service. Nothing is cached between calls; after storing a new
//! transaction the consumer simply loads and derives again.

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

pub use domain::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState<C: Connection = JsonConnection> {
    pub transaction_service: TransactionService<C>,
    pub registration_service: RegistrationService<C>,
    pub dashboard_service: DashboardService,
    pub spending_service: SpendingService,
    pub display_service: DisplayService,
    pub categories: CategoryRegistry,
}

/// Configuration accepted by [`initialize_core_with`]
#[derive(Debug, Clone, Default)]
pub struct CoreConfig {
    /// Base data directory; `None` means the default location under `$HOME`
    pub data_directory: Option<PathBuf>,
    /// Locale and currency used for every formatted value
    pub display: DisplayConfig,
    /// Category registry; the compiled-in default when not overridden
    pub categories: CategoryRegistry,
}

/// Initialize the core with all required services and default configuration
pub fn initialize_core() -> Result<AppState> {
    initialize_core_with(CoreConfig::default())
}

/// Initialize the core with explicit configuration
pub fn initialize_core_with(config: CoreConfig) -> Result<AppState> {
    info!("Setting up storage");
    let connection = match &config.data_directory {
        Some(directory) => JsonConnection::new(directory)?,
        None => JsonConnection::new_default()?,
    };
    let connection = Arc::new(connection);

    info!("Setting up domain model");
    let transaction_service = TransactionService::new(connection.clone());
    let registration_service =
        RegistrationService::new(transaction_service.clone(), config.display);
    let dashboard_service = DashboardService::new();
    let spending_service = SpendingService::new();
    let display_service = DisplayService::with_config(config.display);

    info!("Setting up application state");
    Ok(AppState {
        transaction_service,
        registration_service,
        dashboard_service,
        spending_service,
        display_service,
        categories: config.categories,
    })
}
