//! Database handle and configuration.
//!
//! The engine handle is opened once for the process lifetime, shared by all
//! callers, and released when the last owner drops it — scoped acquisition:
//! acquired at startup, released on every shutdown path, including
//! early-exit on startup failure (the constructor returns `Err` before any
//! handle escapes).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::backends::InMemoryBackend;
use redb::{Database, Durability};
use tracing::debug;

use crate::error::Result;
use crate::snippets::Snippets;

/// The snippet database.
///
/// Main entry point. Create one with [`SnipDb::open`] or [`SnipDb::builder`],
/// pass it (or its [`Snippets`] handle) to every component that needs
/// persistence, and drop or [`close`](SnipDb::close) it exactly once on
/// shutdown.
///
/// # Example
///
/// ```ignore
/// use snipdb::prelude::*;
///
/// let db = SnipDb::open("./snippets.redb")?;
/// let snippet = db.snippets.create("title", "content", expires)?;
/// let recent = db.snippets.latest(10)?;
/// db.close()?;
/// ```
pub struct SnipDb {
    /// The underlying engine handle, shared with the store handles.
    inner: Arc<Database>,

    /// Where the database file lives; `None` for ephemeral databases.
    path: Option<PathBuf>,

    /// Snippet store operations.
    pub snippets: Snippets,
}

impl SnipDb {
    /// Open a database file at the given path, creating it if absent.
    ///
    /// Uses default settings (strict durability). The store owns exclusive
    /// write access to the file for as long as the handle lives.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create an in-memory database with no file behind it.
    ///
    /// All data is lost when the handle is dropped. Intended for tests and
    /// temporary computations.
    pub fn ephemeral() -> Result<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        debug!("opened ephemeral snippet store");
        Ok(Self::from_engine(db, Durability::Immediate, None))
    }

    /// Create a builder for database configuration.
    pub fn builder() -> SnipDbBuilder {
        SnipDbBuilder::new()
    }

    /// The database file path, or `None` for an ephemeral database.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Release the engine handle.
    ///
    /// Consuming the handle makes "released exactly once, after in-flight
    /// operations complete" visible in the type system; dropping the
    /// database without calling this releases it all the same.
    pub fn close(self) -> Result<()> {
        debug!(path = ?self.path, "closing snippet store");
        Ok(())
    }

    fn from_engine(db: Database, durability: Durability, path: Option<PathBuf>) -> Self {
        let db = Arc::new(db);
        Self {
            snippets: Snippets::new(db.clone(), durability),
            inner: db,
            path,
        }
    }
}

/// Builder for database configuration.
///
/// # Example
///
/// ```ignore
/// // Production: every commit fsynced
/// let db = SnipDb::builder()
///     .path("./snippets.redb")
///     .strict()
///     .open()?;
///
/// // Tests: skip fsync, keep file isolation
/// let db = SnipDb::builder()
///     .path(dir.path().join("snippets.redb"))
///     .no_durability()
///     .open()?;
/// ```
pub struct SnipDbBuilder {
    path: Option<PathBuf>,
    durability: Durability,
}

impl SnipDbBuilder {
    /// Create a new builder with default settings (strict durability).
    pub fn new() -> Self {
        Self {
            path: None,
            durability: Durability::Immediate,
        }
    }

    /// Set the database file path.
    ///
    /// Defaults to `snippets.redb` in the working directory.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip fsync entirely. Commits are atomic but lost on crash.
    ///
    /// Use for tests that want file isolation without paying for disk
    /// syncs. For no file at all, use [`SnipDb::ephemeral`].
    pub fn no_durability(mut self) -> Self {
        self.durability = Durability::None;
        self
    }

    /// Let the engine batch fsyncs across commits.
    pub fn buffered(mut self) -> Self {
        self.durability = Durability::Eventual;
        self
    }

    /// Fsync on every commit (default). Zero data loss on crash.
    pub fn strict(mut self) -> Self {
        self.durability = Durability::Immediate;
        self
    }

    /// Open the database, creating the file if absent.
    ///
    /// Failing to open is returned, not handled: whether an unusable store
    /// is fatal is the process entry point's decision, and it is the only
    /// place where this error should terminate the process.
    pub fn open(self) -> Result<SnipDb> {
        let path = self.path.unwrap_or_else(|| PathBuf::from("snippets.redb"));
        let db = Database::create(&path)?;
        debug!(path = %path.display(), "opened snippet store");
        Ok(SnipDb::from_engine(db, self.durability, Some(path)))
    }
}

impl Default for SnipDbBuilder {
    fn default() -> Self {
        Self::new()
    }
}
