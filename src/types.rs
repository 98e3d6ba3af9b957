//! The snippet record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored text snippet.
///
/// The sole persisted entity. Within the store, each identifier maps to at
/// most one record, identifiers are allocated in strictly increasing order
/// and never reused, and the byte-level key derived from `id` preserves
/// numeric ordering (see [`crate::keys`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique positive identifier. `0` means "not yet assigned"; the store
    /// assigns it exactly once, at first save, and it is immutable after.
    pub id: u64,

    /// Short title. Length bounds are enforced by the form layer, not here.
    pub title: String,

    /// Snippet body. Unbounded at the store layer.
    pub content: String,

    /// When the record was first saved. Stamped by the store during the
    /// save that assigns the identifier.
    pub created: DateTime<Utc>,

    /// When the snippet stops being shown. Supplied by the caller.
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Build an unsaved snippet.
    ///
    /// `id` starts at `0` and `created` at the epoch placeholder; both are
    /// populated by [`crate::Snippets::save`].
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            created: DateTime::UNIX_EPOCH,
            expires,
        }
    }

    /// Whether this record has been assigned an identifier by the store.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
