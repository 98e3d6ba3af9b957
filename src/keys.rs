//! Identifier key encoding.
//!
//! Keys in the snippets table are the record identifier encoded as a
//! fixed-width 8-byte big-endian sequence. Big-endian fixed width makes
//! unsigned integer ordering and byte-lexicographic ordering coincide
//! exactly, which is what lets an ordered reverse cursor walk double as
//! "most recent first" traversal.

use crate::error::{Error, Result};

/// Width in bytes of an encoded identifier key.
pub const KEY_LEN: usize = 8;

/// Encode an identifier as a fixed-width, order-preserving key.
#[inline]
pub fn encode_id(id: u64) -> [u8; KEY_LEN] {
    id.to_be_bytes()
}

/// Decode an identifier from a stored key.
///
/// Keys are only ever written by the store, so a slice that is not exactly
/// [`KEY_LEN`] bytes means the table itself is damaged; that is reported as
/// [`Error::Corrupted`] rather than ignored.
pub fn decode_id(key: &[u8]) -> Result<u64> {
    let bytes: [u8; KEY_LEN] = key.try_into().map_err(|_| {
        Error::Corrupted(format!("key is {} bytes, expected {}", key.len(), KEY_LEN))
    })?;
    Ok(u64::from_be_bytes(bytes))
}
