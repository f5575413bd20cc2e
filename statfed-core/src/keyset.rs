//! Key-set shapes and bounded batching
//!
//! A [`KeySet`] is the tagged representation of "which rows to read": either
//! a flat key list or a list of row ranges. The shape is resolved once at the
//! API boundary; everything downstream matches on the variant, never on a
//! dynamic type.
//!
//! [`split_into_batches`] caps request sizes so no single backing-store read
//! exceeds the store's payload limit. Batches cover the input exactly once,
//! in input order; an empty input yields zero batches.

use crate::error::{Error, Result};

/// Default maximum number of keys (or ranges) per backing-store read
pub const DEFAULT_MAX_BATCH_SIZE: usize = 500;

/// A contiguous row-key range: `start` inclusive, `end` exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRange {
    /// First key of the range (inclusive)
    pub start: String,
    /// Upper bound of the range (exclusive)
    pub end: String,
}

impl RowRange {
    /// Create a validated range
    ///
    /// Fails with `InvalidArgument` when `end < start` — the one key-set
    /// shape this engine does not support.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let start = start.into();
        let end = end.into();
        if end < start {
            return Err(Error::invalid_argument(format!(
                "row range end '{}' sorts before start '{}'",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Check whether a key falls inside this range
    pub fn contains(&self, key: &str) -> bool {
        key >= self.start.as_str() && key < self.end.as_str()
    }
}

/// The requested key collection for one fetch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySet {
    /// Explicit row keys
    Keys(Vec<String>),
    /// Contiguous row ranges
    Ranges(Vec<RowRange>),
}

impl KeySet {
    /// Number of keys or ranges in the set
    pub fn len(&self) -> usize {
        match self {
            KeySet::Keys(keys) => keys.len(),
            KeySet::Ranges(ranges) => ranges.len(),
        }
    }

    /// True when the set holds no keys or ranges
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split a key set into batches of at most `max_size` entries
///
/// Returns batches covering the input exactly once with no duplication,
/// preserving input order. An empty input yields `Ok(vec![])`, not an error.
pub fn split_into_batches(set: &KeySet, max_size: usize) -> Result<Vec<KeySet>> {
    if max_size == 0 {
        return Err(Error::invalid_argument("max batch size must be positive"));
    }
    let batches = match set {
        KeySet::Keys(keys) => keys
            .chunks(max_size)
            .map(|chunk| KeySet::Keys(chunk.to_vec()))
            .collect(),
        KeySet::Ranges(ranges) => ranges
            .chunks(max_size)
            .map(|chunk| KeySet::Ranges(chunk.to_vec()))
            .collect(),
    };
    Ok(batches)
}
