//! # Storage Module
//!
//! Handles all data persistence operations for the finances tracker.
//!
//! This module abstracts away the specific storage implementation details and provides
//! a consistent interface for persisting and retrieving transaction data. The
//! implementation can be swapped out (JSON files, SQLite, cloud storage, etc.)
//! without affecting the domain logic or the consumers above it.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving transactions for each user to disk
//! - **Data Retrieval**: Loading stored transactions back into memory
//! - **Storage Abstraction**: Providing a consistent API regardless of storage backend
//! - **Record Hygiene**: Skipping unreadable records instead of failing whole loads
//! - **Write Safety**: Ensuring files are replaced atomically, never partially written
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: One JSON array file per user, managed by [`JsonConnection`]
//! - **Future Flexibility**: The [`TransactionStore`] trait keeps backends replaceable

pub mod json;
pub mod traits;

// Re-export the main types that other modules need
pub use json::{JsonConnection, JsonTransactionRepository};
pub use traits::{Connection, StoreError, TransactionStore};
