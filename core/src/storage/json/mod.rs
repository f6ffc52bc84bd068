//! JSON file storage backend.
//!
//! Each user gets their own directory under the base data directory, holding a
//! single `transactions.json` file with a JSON array of transaction records.
//! Files are human readable on purpose: the data belongs to the user and should
//! survive this application.

pub mod connection;
pub mod transaction_repository;

pub use connection::JsonConnection;
pub use transaction_repository::JsonTransactionRepository;
