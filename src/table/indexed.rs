//! Content-addressed, append-only table of serialized entries.
//!
//! Entries are keyed by the BLAKE3 hash of their bytes, so inserting an entry
//! that is byte-identical to one already present returns the existing index
//! and leaves the table untouched. Otherwise indices grow monotonically in
//! insertion order.

use blake3::Hasher;
use std::collections::HashMap;
use tracing::trace;

/// BLAKE3 digest of an entry's bytes.
pub type ContentKey = [u8; 32];

pub fn content_key(data: &[u8]) -> ContentKey {
    let mut hasher = Hasher::new();
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

#[derive(Debug, Default, Clone)]
pub struct IndexedDataTable {
    entries: Vec<String>,
    ref_counts: Vec<usize>,
    index: HashMap<ContentKey, usize>,
}

impl IndexedDataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry`, returning its index. Repeated entries share the first index.
    pub fn add_indexed(&mut self, entry: impl Into<String>) -> usize {
        let entry = entry.into();
        let key = content_key(entry.as_bytes());

        if let Some(&idx) = self.index.get(&key) {
            debug_assert_eq!(self.entries[idx], entry);
            self.ref_counts[idx] += 1;
            trace!(
                index = idx,
                content_key = %hex::encode(&key[..8]),
                "Reused existing table entry"
            );
            return idx;
        }

        let idx = self.entries.len();
        self.index.insert(key, idx);
        self.entries.push(entry);
        self.ref_counts.push(1);
        idx
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of insertions that resolved to `index`.
    pub fn ref_count_of(&self, index: usize) -> usize {
        self.ref_counts.get(index).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
