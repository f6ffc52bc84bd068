//! Transaction service domain logic for the finances tracker.
//!
//! Thin orchestration over the storage layer: loads a user's history and
//! appends new records, wrapping storage failures with context the caller
//! can show or log.

use anyhow::{Context, Result};
use log::error;
use shared::Transaction;
use std::sync::Arc;

use crate::storage::{Connection, TransactionStore};

/// Service that loads and stores transactions through the storage layer
#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
}

impl<C: Connection> TransactionService<C> {
    /// Create a new service backed by the given connection
    pub fn new(connection: Arc<C>) -> Self {
        let transaction_repository = connection.create_transaction_repository();
        Self {
            transaction_repository,
        }
    }

    /// Load the full transaction history for a user.
    ///
    /// A user with no stored history gets an empty list; a store failure is
    /// an error, never silently an empty list.
    pub async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository
            .load_transactions(user_id)
            .await
            .map_err(|e| {
                error!("Failed to load transactions for user '{}': {}", user_id, e);
                e
            })
            .with_context(|| format!("Failed to load transactions for user '{}'", user_id))
    }

    /// Append one transaction to a user's history
    pub async fn store_transaction(&self, user_id: &str, transaction: &Transaction) -> Result<()> {
        self.transaction_repository
            .append_transaction(user_id, transaction)
            .await
            .map_err(|e| {
                error!(
                    "Failed to store transaction '{}' for user '{}': {}",
                    transaction.id, user_id, e
                );
                e
            })
            .with_context(|| format!("Failed to store transaction for user '{}'", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonConnection;
    use chrono::{TimeZone, Utc};
    use shared::TransactionKind;
    use tempfile::TempDir;

    fn setup_test_service() -> (TransactionService<JsonConnection>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let connection =
            JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (TransactionService::new(Arc::new(connection)), temp_dir)
    }

    fn sample_transaction(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: "Mercado".to_string(),
            amount: 89.9,
            kind: TransactionKind::Expense,
            category: "food".to_string(),
            date: Utc.with_ymd_and_hms(2023, 4, 10, 15, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_for_new_user_is_empty() {
        let (service, _temp_dir) = setup_test_service();

        let transactions = service.list_transactions("nobody").await.unwrap();

        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn test_store_then_list() {
        let (service, _temp_dir) = setup_test_service();
        let tx = sample_transaction("tx-1");

        service.store_transaction("alice", &tx).await.unwrap();
        let transactions = service.list_transactions("alice").await.unwrap();

        assert_eq!(transactions, vec![tx]);
    }

    #[tokio::test]
    async fn test_store_rejects_duplicate_id() {
        let (service, _temp_dir) = setup_test_service();
        let tx = sample_transaction("tx-1");

        service.store_transaction("alice", &tx).await.unwrap();
        let result = service.store_transaction("alice", &tx).await;

        assert!(result.is_err());
    }
}
