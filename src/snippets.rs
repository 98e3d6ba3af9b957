//! Snippet store operations.
//!
//! ## Transaction discipline
//!
//! Every public operation is a complete unit of work against the engine:
//! reads open a snapshot-isolated read transaction, writes open the single
//! serialized write transaction. A second writer blocks until the first
//! commits or aborts, so the allocate-encode-write sequence in [`save`]
//! is atomic with respect to other writers without any locking here.
//!
//! ## Key order is creation order
//!
//! Record keys are the identifier in fixed-width big-endian form (see
//! [`crate::keys`]); identifiers are strictly increasing, so walking the
//! table cursor backwards from the greatest key yields the most recently
//! created records first.
//!
//! [`save`]: Snippets::save

use std::sync::Arc;

use chrono::{DateTime, Utc};
use redb::{Database, Durability, ReadableTable, TableDefinition, TableError, WriteTransaction};
use tracing::trace;

use crate::codec::{decode_snippet, encode_snippet};
use crate::error::{Error, Result};
use crate::keys::encode_id;
use crate::types::Snippet;

/// Name of the table holding all snippet records.
const SNIPPETS_TABLE: &str = "Snippets";

/// Snippet records: big-endian identifier key, JSON value.
const SNIPPETS: TableDefinition<&[u8], &[u8]> = TableDefinition::new(SNIPPETS_TABLE);

/// Allocator state: last allocated identifier, keyed by record table name.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("__sequences");

/// Snippet store operations.
///
/// Access via [`crate::SnipDb::snippets`]. The handle is cheap to share and
/// safe to use from multiple threads; the engine serializes writers.
pub struct Snippets {
    db: Arc<Database>,
    durability: Durability,
}

impl Snippets {
    pub(crate) fn new(db: Arc<Database>, durability: Durability) -> Self {
        Self { db, durability }
    }

    /// Fetch the snippet with the given identifier.
    ///
    /// Returns [`Error::NotFound`] when no record exists for `id` — also on
    /// a fresh store where the table has not been created yet. A value that
    /// exists but does not decode is [`Error::Corrupted`], not `NotFound`.
    pub fn get(&self, id: u64) -> Result<Snippet> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(SNIPPETS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Err(Error::NotFound { id }),
            Err(e) => return Err(e.into()),
        };

        let key = encode_id(id);
        let value = table.get(key.as_slice())?.ok_or(Error::NotFound { id })?;
        let snippet = decode_snippet(value.value())?;
        trace!(id, "snippet loaded");
        Ok(snippet)
    }

    /// Fetch up to `n` of the most recently created snippets, newest first.
    ///
    /// Positions a cursor at the greatest key and walks keys in strictly
    /// decreasing order until `n` records are collected or the table is
    /// exhausted. An empty or not-yet-created store yields an empty vector;
    /// retrieval on an empty store is a normal condition, not an error.
    pub fn latest(&self, n: usize) -> Result<Vec<Snippet>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(SNIPPETS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut snippets = Vec::new();
        for entry in table.iter()?.rev().take(n) {
            let (_, value) = entry?;
            snippets.push(decode_snippet(value.value())?);
        }
        trace!(count = snippets.len(), "latest snippets loaded");
        Ok(snippets)
    }

    /// Save a snippet, returning the stored record.
    ///
    /// Runs a single write transaction, creating the table on first use.
    /// A record with `id == 0` is assigned the next identifier and stamped
    /// with the current time as `created`; the returned record carries
    /// both. A record with a non-zero id replaces whatever is stored under
    /// that id and consumes no identifier.
    ///
    /// If the transaction fails nothing is persisted, including the
    /// allocation: a failed save burns no identifiers and is safe to retry
    /// from scratch.
    pub fn save(&self, mut snippet: Snippet) -> Result<Snippet> {
        let mut txn = self.db.begin_write()?;
        txn.set_durability(self.durability);
        {
            let mut table = txn.open_table(SNIPPETS)?;

            if snippet.id == 0 {
                snippet.id = next_id(&txn, SNIPPETS_TABLE)?;
                snippet.created = Utc::now();
            }

            let key = encode_id(snippet.id);
            let value = encode_snippet(&snippet)?;
            table.insert(key.as_slice(), value.as_slice())?;
        }
        txn.commit()?;

        trace!(id = snippet.id, "snippet saved");
        Ok(snippet)
    }

    /// Build and save a new snippet in one call.
    ///
    /// Convenience for the common creation path: the store allocates the
    /// identifier and stamps `created`.
    pub fn create(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Result<Snippet> {
        self.save(Snippet::new(title, content, expires))
    }
}

/// Allocate the next identifier for `table` inside an open write transaction.
///
/// Reads the last allocated value from the sequence table, increments it and
/// writes it back; the first allocation returns 1. The increment commits or
/// rolls back together with the record write that consumes it.
fn next_id(txn: &WriteTransaction, table: &str) -> Result<u64> {
    let mut sequences = txn.open_table(SEQUENCES)?;
    let next = sequences.get(table)?.map(|g| g.value()).unwrap_or(0) + 1;
    sequences.insert(table, next)?;
    Ok(next)
}
