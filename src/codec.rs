//! Record serialization.
//!
//! Snippets are stored as a field-tagged JSON document with fields `id`,
//! `title`, `content`, `created`, `expires`. The field set is the
//! compatibility contract, not the byte layout: decoding ignores unknown
//! fields, so records written by a build that adds fields stay readable by
//! older ones. Timestamps are RFC 3339 with nanosecond precision and
//! round-trip exactly.

use crate::error::{Error, Result};
use crate::types::Snippet;

/// Encode a snippet for storage.
///
/// Not expected to fail for well-formed records; a failure is reported as
/// [`Error::Serialization`].
pub fn encode_snippet(snippet: &Snippet) -> Result<Vec<u8>> {
    serde_json::to_vec(snippet).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a stored payload into a snippet.
///
/// Bytes that do not match the record format are reported as
/// [`Error::Corrupted`] — this should not happen under correct operation,
/// but it is detected, never silently ignored.
pub fn decode_snippet(bytes: &[u8]) -> Result<Snippet> {
    serde_json::from_slice(bytes).map_err(|e| Error::Corrupted(e.to_string()))
}
