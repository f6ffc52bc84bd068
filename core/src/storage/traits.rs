//! # Storage Traits
//!
//! Defines the abstract interface that all storage backends must implement.
//!
//! Domain services only ever talk to these traits, which keeps the business
//! logic independent of how transactions are actually kept on disk. Every
//! operation is scoped to a `user_id` so users never see each other's data.

use async_trait::async_trait;
use shared::Transaction;

/// Why a storage operation failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file or directory could not be reached.
    #[error("transaction store unavailable: {source}")]
    Unavailable {
        #[from]
        source: std::io::Error,
    },

    /// The stored data no longer parses as a transaction list.
    #[error("stored transaction data is corrupted: {source}")]
    Corrupted {
        #[from]
        source: serde_json::Error,
    },

    /// A transaction with this id is already stored.
    #[error("transaction '{id}' is already stored")]
    DuplicateId { id: String },
}

/// Interface for loading and appending one user's transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Load every transaction stored for the given user.
    ///
    /// A user that has never stored anything gets an empty list, not an error.
    /// Individual records that no longer parse are skipped with a warning, so
    /// one damaged entry cannot take the whole history down.
    async fn load_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError>;

    /// Append a transaction to the end of the user's stored list.
    ///
    /// Existing records are never reordered or rewritten, only added to.
    async fn append_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<(), StoreError>;
}

/// Trait for a connection that can create repositories
pub trait Connection: Send + Sync + Clone {
    /// The transaction repository type this connection provides
    type TransactionRepository: TransactionStore + Clone;

    /// Create a transaction repository using this connection
    fn create_transaction_repository(&self) -> Self::TransactionRepository;
}
