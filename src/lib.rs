//! # snipdb
//!
//! Embedded record store for short-lived text snippets.
//!
//! snipdb is the persistence layer of a snippet web application: it stores
//! one record type ([`Snippet`]) in an embedded, ordered, transactional
//! key-value engine ([`redb`]) and retrieves records in reverse creation
//! order. It owns identifier allocation, key encoding, and record
//! serialization; everything above it (HTTP, templates, form validation)
//! talks to the store through three calls.
//!
//! ## Quick Start
//!
//! ```ignore
//! use snipdb::prelude::*;
//!
//! // Open a database (single file, created if absent)
//! let db = SnipDb::open("./snippets.redb")?;
//!
//! // Create a snippet; the store assigns the id and creation time
//! let snippet = db.snippets.create("title", "content", Utc::now() + Duration::days(7))?;
//!
//! // Look it up, or fetch the most recent records, newest first
//! let same = db.snippets.get(snippet.id)?;
//! let recent = db.snippets.latest(10)?;
//!
//! // The engine handle is released when the database is dropped
//! db.close()?;
//! ```
//!
//! ## Storage model
//!
//! Records live in one named table, `"Snippets"`. Keys are the record
//! identifier encoded as a fixed-width 8-byte big-endian sequence (see
//! [`keys`]), so byte-lexicographic key order equals numeric identifier
//! order and a reverse cursor walk yields the newest records first. Values
//! are a field-tagged JSON encoding of the record (see [`codec`]).
//! Identifiers are allocated from a persisted counter inside the same write
//! transaction that stores the record: an aborted save burns no ids.
//!
//! ## Concurrency
//!
//! Reads run on consistent point-in-time snapshots and never block. Writes
//! serialize through the engine's single-writer transaction, which is what
//! makes identifier allocation atomic without extra locking.

#![warn(missing_docs)]

mod database;
mod error;
mod snippets;
mod types;

pub mod codec;
pub mod keys;
pub mod prelude;

// Re-export main entry points
pub use database::{SnipDb, SnipDbBuilder};
pub use error::{Error, Result};

// Re-export the store handle and record type
pub use snippets::Snippets;
pub use types::Snippet;
