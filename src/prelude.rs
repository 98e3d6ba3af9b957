//! Convenient imports for snipdb.
//!
//! Re-exports the types most callers need so you can get started with a
//! single import:
//!
//! ```ignore
//! use snipdb::prelude::*;
//!
//! let db = SnipDb::open("./snippets.redb")?;
//! db.snippets.create("title", "content", Utc::now() + Duration::days(7))?;
//! ```

// Main entry point
pub use crate::database::{SnipDb, SnipDbBuilder};

// Error handling
pub use crate::error::{Error, Result};

// The store handle and its record type
pub use crate::snippets::Snippets;
pub use crate::types::Snippet;

// Re-export the time types used in the record for convenience
pub use chrono::{DateTime, Duration, Utc};
