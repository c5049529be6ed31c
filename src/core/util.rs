//! Small utility functions used across the core module
//!
//! This includes hashing and timestamp helpers.
//! Keep this light — if it grows, split further.

use blake3::Hasher;
use chrono::{DateTime, SecondsFormat, Utc};

/// Compute BLAKE3 hash and return as lowercase hex string
pub fn blake3_hex(data: &[u8]) -> String {
    Hasher::new().update(data).finalize().to_hex().to_string()
}

/// Microsecond-precision RFC 3339 timestamp, fixed width so the strings
/// sort the same way the instants do
pub fn rfc3339_micros(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}
