//! JSON connection management.
//!
//! The connection owns the base data directory and hands out the paths every
//! repository works with. Directory layout:
//!
//! ```text
//! <base>/
//!   <user_id>/
//!     transactions.json
//! ```

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::transaction_repository::JsonTransactionRepository;
use crate::storage::traits::Connection;

/// Name of the per-user file that holds the transaction list
const TRANSACTIONS_FILE: &str = "transactions.json";

/// JSON connection that manages the base directory for file storage
#[derive(Clone)]
pub struct JsonConnection {
    /// Base directory where all user data lives
    base_directory: Arc<Mutex<PathBuf>>,
}

impl JsonConnection {
    /// Create a new JSON connection with the specified base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();

        // Ensure the base directory exists
        std::fs::create_dir_all(&base_directory)?;

        info!("📁 Transaction data directory: {}", base_directory.display());

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_directory)),
        })
    }

    /// Create a new JSON connection with the default base directory.
    ///
    /// Lives under the user's Documents folder so the files are easy to find
    /// and back up.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let base_directory = PathBuf::from(home_dir).join("Documents").join("GoFinances");

        Self::new(base_directory)
    }

    /// Get the directory that holds one user's data
    pub fn user_directory(&self, user_id: &str) -> PathBuf {
        self.base_directory.lock().unwrap().join(user_id)
    }

    /// Get the path of one user's transactions file
    pub fn transactions_file_path(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join(TRANSACTIONS_FILE)
    }

    /// Make sure the user's directory exists before writing into it
    pub fn ensure_user_directory(&self, user_id: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(self.user_directory(user_id))
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.lock().unwrap().clone()
    }
}


impl Connection for JsonConnection {
    type TransactionRepository = JsonTransactionRepository;

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        JsonTransactionRepository::new(self.clone())
    }
}
