//! Error types for snipdb.
//!
//! The error taxonomy is a closed set of tagged variants so callers can
//! branch exhaustively across module boundaries instead of comparing
//! against a shared sentinel value. Every store operation propagates one of
//! these to its immediate caller; the store never logs and swallows.

use std::io;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// All snipdb errors.
#[derive(Debug, Error)]
pub enum Error {
    /// No record exists for the requested identifier.
    ///
    /// Expected in normal operation; recoverable by the caller.
    #[error("snippet not found: {id}")]
    NotFound {
        /// The identifier that was looked up
        id: u64,
    },

    /// Stored bytes for an existing key do not decode to a valid record.
    ///
    /// Indicates on-disk damage or a format mismatch. Never retried.
    #[error("corrupted record: {0}")]
    Corrupted(String),

    /// A record could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O failure in the underlying engine.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Any other failure surfaced by the underlying engine.
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error reports data corruption.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Error::Corrupted(_))
    }

    /// Check if the whole operation is safe to retry.
    ///
    /// Write transactions are atomic, so an engine failure leaves no partial
    /// state behind and the caller may retry from scratch. Corruption and
    /// missing records do not change on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Storage(_))
    }
}

// Conversions from the engine's error types. The engine distinguishes
// open/transaction/table/commit failures; at the store boundary they
// collapse onto the taxonomy above, keeping I/O and corruption causes
// distinguishable.

impl From<redb::StorageError> for Error {
    fn from(e: redb::StorageError) -> Self {
        match e {
            redb::StorageError::Io(io_err) => Error::Io(io_err),
            redb::StorageError::Corrupted(msg) => Error::Corrupted(msg),
            other => Error::Storage(other.to_string()),
        }
    }
}

impl From<redb::DatabaseError> for Error {
    fn from(e: redb::DatabaseError) -> Self {
        match e {
            redb::DatabaseError::Storage(storage) => storage.into(),
            other => Error::Storage(other.to_string()),
        }
    }
}

impl From<redb::TransactionError> for Error {
    fn from(e: redb::TransactionError) -> Self {
        match e {
            redb::TransactionError::Storage(storage) => storage.into(),
            other => Error::Storage(other.to_string()),
        }
    }
}

impl From<redb::TableError> for Error {
    fn from(e: redb::TableError) -> Self {
        match e {
            redb::TableError::Storage(storage) => storage.into(),
            other => Error::Storage(other.to_string()),
        }
    }
}

impl From<redb::CommitError> for Error {
    fn from(e: redb::CommitError) -> Self {
        match e {
            redb::CommitError::Storage(storage) => storage.into(),
            other => Error::Storage(other.to_string()),
        }
    }
}
