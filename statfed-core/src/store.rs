//! Store-handle traits for reading backing tables
//!
//! This module defines the contract between the fetch engine and the backing
//! key-value stores. Deployments provide their own [`TableReader`]
//! implementations (e.g. a wide-column client); the trait is runtime-agnostic
//! and uses `async_trait` for async support.
//!
//! A reader returns one [`RowCell`] per located row. A cell with an absent
//! payload means "no data for this key" — it is skipped by the fetcher, never
//! treated as an error.
//!
//! ## Implementations
//!
//! - [`MemoryTable`]: in-memory table for unit tests and in-memory
//!   deployments.

use crate::error::Result;
use crate::keyset::KeySet;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

// ============================================================================
// Core Trait
// ============================================================================

/// One returned row: the row key plus its raw payload, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCell {
    /// The row key this cell belongs to
    pub key: String,
    /// Raw stored bytes, or `None` when the store holds no data for the key
    pub value: Option<Vec<u8>>,
}

/// Read access to one backing table
///
/// `read_rows` resolves a batch of keys or ranges to cells. Implementations
/// must not fail on missing rows — absence is expressed per-cell via
/// `RowCell::value`. Errors are reserved for actual read failures (network,
/// malformed request), which abort the whole fetch call.
#[async_trait]
pub trait TableReader: Debug + Send + Sync {
    /// Read all rows addressed by the given batch
    ///
    /// The batch is already capped by the fetcher; implementations may assume
    /// it fits in a single backing-store request.
    async fn read_rows(&self, rows: &KeySet) -> Result<Vec<RowCell>>;
}

// ============================================================================
// Table Handle
// ============================================================================

/// A named, ordered handle to one backing table
///
/// Position in the store list encodes precedence: index 0 is the most
/// authoritative (overlay) tier. Cloning is cheap (`Arc` reader).
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    reader: Arc<dyn TableReader>,
}

impl Table {
    /// Create a table handle wrapping a reader
    pub fn new(name: impl Into<String>, reader: Arc<dyn TableReader>) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    /// Name of the backing table (used in logs and diagnostics)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read all rows addressed by the given batch
    pub async fn read_rows(&self, rows: &KeySet) -> Result<Vec<RowCell>> {
        self.reader.read_rows(rows).await
    }
}

// ============================================================================
// MemoryTable Implementation
// ============================================================================

/// A simple in-memory table for testing
///
/// Stores raw payloads in a map with interior mutability (`Arc<RwLock<..>>`)
/// so fixtures can be loaded through a shared handle. Keys requested but not
/// present are reported as cells with an absent payload, exercising the
/// fetcher's skip path.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    rows: Arc<RwLock<FxHashMap<String, Vec<u8>>>>,
}

impl MemoryTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw payload at the given key
    pub fn insert(&self, key: impl Into<String>, value: Vec<u8>) {
        self.rows
            .write()
            .expect("RwLock poisoned")
            .insert(key.into(), value);
    }
}

#[async_trait]
impl TableReader for MemoryTable {
    async fn read_rows(&self, rows: &KeySet) -> Result<Vec<RowCell>> {
        let data = self.rows.read().expect("RwLock poisoned");
        let cells = match rows {
            KeySet::Keys(keys) => keys
                .iter()
                .map(|key| RowCell {
                    key: key.clone(),
                    value: data.get(key).cloned(),
                })
                .collect(),
            KeySet::Ranges(ranges) => {
                let mut matched: Vec<RowCell> = data
                    .iter()
                    .filter(|(key, _)| ranges.iter().any(|r| r.contains(key)))
                    .map(|(key, value)| RowCell {
                        key: key.clone(),
                        value: Some(value.clone()),
                    })
                    .collect();
                matched.sort_by(|a, b| a.key.cmp(&b.key));
                matched
            }
        };
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyset::RowRange;

    #[tokio::test]
    async fn test_memory_table_keys() {
        let table = MemoryTable::new();
        table.insert("obs/p1", b"one".to_vec());

        let cells = table
            .read_rows(&KeySet::Keys(vec!["obs/p1".into(), "obs/p2".into()]))
            .await
            .unwrap();

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].value.as_deref(), Some(b"one".as_ref()));
        assert_eq!(cells[1].value, None);
    }

    #[tokio::test]
    async fn test_memory_table_ranges() {
        let table = MemoryTable::new();
        table.insert("obs/a", b"1".to_vec());
        table.insert("obs/b", b"2".to_vec());
        table.insert("obs/z", b"3".to_vec());

        let range = RowRange::new("obs/a", "obs/c").unwrap();
        let cells = table
            .read_rows(&KeySet::Ranges(vec![range]))
            .await
            .unwrap();

        let keys: Vec<&str> = cells.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["obs/a", "obs/b"]);
    }

    #[tokio::test]
    async fn test_table_handle_delegates() {
        let memory = MemoryTable::new();
        memory.insert("k", b"v".to_vec());
        let table = Table::new("base", Arc::new(memory));

        assert_eq!(table.name(), "base");
        let cells = table
            .read_rows(&KeySet::Keys(vec!["k".into()]))
            .await
            .unwrap();
        assert_eq!(cells[0].value.as_deref(), Some(b"v".as_ref()));
    }
}
