//! JSON transaction repository.
//!
//! Reads and writes one `transactions.json` array per user. Loads are lenient:
//! a record that fails to parse, or parses with an unusable amount, is skipped
//! with a warning instead of failing the whole list. Writes go through a
//! temporary file and an atomic rename so a crash can never leave a half
//! written file behind.

use async_trait::async_trait;
use log::{info, warn};
use shared::Transaction;
use std::io::ErrorKind;

use super::connection::JsonConnection;
use crate::storage::traits::{StoreError, TransactionStore};

/// Repository for reading and appending stored transactions
#[derive(Clone)]
pub struct JsonTransactionRepository {
    connection: JsonConnection,
}

impl JsonTransactionRepository {
    /// Create a new repository bound to the given connection
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Read the raw JSON array for a user, without interpreting the elements.
    ///
    /// Appends work on these raw values so records this version does not
    /// understand stay on disk untouched.
    fn read_raw_records(&self, user_id: &str) -> Result<Vec<serde_json::Value>, StoreError> {
        let file_path = self.connection.transactions_file_path(user_id);

        let contents = match std::fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            // No file yet just means nothing was stored so far
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Unavailable { source: e }),
        };

        let records: Vec<serde_json::Value> = serde_json::from_str(&contents)?;

        Ok(records)
    }

    /// Write the raw JSON array back, replacing the previous file atomically
    fn write_raw_records(
        &self,
        user_id: &str,
        records: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        self.connection.ensure_user_directory(user_id)?;

        let file_path = self.connection.transactions_file_path(user_id);
        let temp_path = file_path.with_extension("tmp");

        let contents = serde_json::to_string_pretty(records)?;
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl TransactionStore for JsonTransactionRepository {
    async fn load_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError> {
        let records = self.read_raw_records(user_id)?;

        let total = records.len();
        let mut transactions = Vec::with_capacity(total);
        let mut skipped = 0usize;

        for record in records {
            match serde_json::from_value::<Transaction>(record) {
                Ok(transaction) if transaction.has_valid_amount() => {
                    transactions.push(transaction);
                }
                Ok(transaction) => {
                    skipped += 1;
                    warn!(
                        "Skipping transaction '{}' with unusable amount {}",
                        transaction.id, transaction.amount
                    );
                }
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping record that does not parse as a transaction: {}", e);
                }
            }
        }

        if skipped > 0 {
            warn!(
                "⚠️ Skipped {} of {} stored record(s) for user '{}'",
                skipped, total, user_id
            );
        }

        info!(
            "Loaded {} transaction(s) for user '{}'",
            transactions.len(),
            user_id
        );

        Ok(transactions)
    }

    async fn append_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<(), StoreError> {
        let mut records = self.read_raw_records(user_id)?;

        let already_stored = records
            .iter()
            .filter_map(|record| record.get("id").and_then(|id| id.as_str()))
            .any(|id| id == transaction.id);
        if already_stored {
            return Err(StoreError::DuplicateId {
                id: transaction.id.clone(),
            });
        }

        records.push(serde_json::to_value(transaction)?);
        self.write_raw_records(user_id, &records)?;

        info!(
            "✅ Stored transaction '{}' for user '{}' ({} record(s) total)",
            transaction.id,
            user_id,
            records.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::TransactionKind;
    use tempfile::TempDir;

    fn setup_test_repo() -> (JsonTransactionRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let connection =
            JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (JsonTransactionRepository::new(connection), temp_dir)
    }

    fn sample_transaction(id: &str, name: &str, amount: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            kind,
            category: "purchases".to_string(),
            date: Utc.with_ymd_and_hms(2023, 4, 10, 15, 0, 0).unwrap(),
        }
    }

    fn write_raw_file(repo: &JsonTransactionRepository, user_id: &str, contents: &str) {
        repo.connection
            .ensure_user_directory(user_id)
            .expect("Failed to create user directory");
        std::fs::write(repo.connection.transactions_file_path(user_id), contents)
            .expect("Failed to write test file");
    }

    #[tokio::test]
    async fn test_load_without_stored_data_returns_empty_list() {
        let (repo, _temp_dir) = setup_test_repo();

        let transactions = repo.load_transactions("new-user").await.unwrap();

        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();
        let tx = sample_transaction("tx-1", "Mercado", 89.9, TransactionKind::Expense);

        repo.append_transaction("alice", &tx).await.unwrap();
        let loaded = repo.load_transactions("alice").await.unwrap();

        assert_eq!(loaded, vec![tx]);
    }

    #[tokio::test]
    async fn test_append_keeps_insertion_order() {
        let (repo, _temp_dir) = setup_test_repo();
        let first = sample_transaction("tx-1", "Salário", 3000.0, TransactionKind::Income);
        let second = sample_transaction("tx-2", "Aluguel", 1200.0, TransactionKind::Expense);
        let third = sample_transaction("tx-3", "Cinema", 40.0, TransactionKind::Expense);

        repo.append_transaction("alice", &first).await.unwrap();
        repo.append_transaction("alice", &second).await.unwrap();
        repo.append_transaction("alice", &third).await.unwrap();

        let loaded = repo.load_transactions("alice").await.unwrap();
        let ids: Vec<&str> = loaded.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["tx-1", "tx-2", "tx-3"]);
    }

    #[tokio::test]
    async fn test_append_rejects_duplicate_id() {
        let (repo, _temp_dir) = setup_test_repo();
        let tx = sample_transaction("tx-1", "Mercado", 89.9, TransactionKind::Expense);

        repo.append_transaction("alice", &tx).await.unwrap();
        let err = repo.append_transaction("alice", &tx).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId { id } if id == "tx-1"));
        assert_eq!(repo.load_transactions("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_skips_malformed_records() {
        let (repo, _temp_dir) = setup_test_repo();
        write_raw_file(
            &repo,
            "alice",
            r#"[
                {
                    "id": "good-1",
                    "name": "Mercado",
                    "amount": 89.9,
                    "type": "negative",
                    "category": "food",
                    "date": "2023-04-10T15:00:00Z"
                },
                { "note": "left behind by some other tool" },
                42,
                {
                    "id": "good-2",
                    "name": "Salário",
                    "amount": "3000.00",
                    "type": "positive",
                    "category": "salary",
                    "date": "2023-04-05T09:00:00Z"
                }
            ]"#,
        );

        let loaded = repo.load_transactions("alice").await.unwrap();

        let ids: Vec<&str> = loaded.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["good-1", "good-2"]);
    }

    #[tokio::test]
    async fn test_load_skips_unusable_amounts() {
        let (repo, _temp_dir) = setup_test_repo();
        write_raw_file(
            &repo,
            "alice",
            r#"[
                {
                    "id": "zero",
                    "name": "Nada",
                    "amount": 0,
                    "type": "negative",
                    "category": "food",
                    "date": "2023-04-10T15:00:00Z"
                },
                {
                    "id": "negative",
                    "name": "Estorno torto",
                    "amount": -50.0,
                    "type": "negative",
                    "category": "food",
                    "date": "2023-04-11T15:00:00Z"
                },
                {
                    "id": "ok",
                    "name": "Padaria",
                    "amount": 12.5,
                    "type": "negative",
                    "category": "food",
                    "date": "2023-04-12T15:00:00Z"
                }
            ]"#,
        );

        let loaded = repo.load_transactions("alice").await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "ok");
    }

    #[tokio::test]
    async fn test_load_fails_when_whole_file_is_corrupted() {
        let (repo, _temp_dir) = setup_test_repo();
        write_raw_file(&repo, "alice", "{ this is not json");

        let err = repo.load_transactions("alice").await.unwrap_err();

        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[tokio::test]
    async fn test_append_preserves_unreadable_records_on_disk() {
        let (repo, _temp_dir) = setup_test_repo();
        write_raw_file(
            &repo,
            "alice",
            r#"[ { "note": "left behind by some other tool" } ]"#,
        );

        let tx = sample_transaction("tx-1", "Mercado", 89.9, TransactionKind::Expense);
        repo.append_transaction("alice", &tx).await.unwrap();

        let on_disk =
            std::fs::read_to_string(repo.connection.transactions_file_path("alice")).unwrap();
        assert!(on_disk.contains("left behind by some other tool"));
        assert!(on_disk.contains("tx-1"));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let (repo, _temp_dir) = setup_test_repo();
        let tx = sample_transaction("tx-1", "Mercado", 89.9, TransactionKind::Expense);

        repo.append_transaction("alice", &tx).await.unwrap();

        assert_eq!(repo.load_transactions("alice").await.unwrap().len(), 1);
        assert!(repo.load_transactions("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_string_amounts_load_as_numbers() {
        let (repo, _temp_dir) = setup_test_repo();
        write_raw_file(
            &repo,
            "alice",
            r#"[
                {
                    "id": "tx-1",
                    "name": "Notebook",
                    "amount": "2500.00",
                    "type": "negative",
                    "category": "purchases",
                    "date": "2023-04-10T15:00:00Z"
                }
            ]"#,
        );

        let loaded = repo.load_transactions("alice").await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount, 2500.0);
    }
}
