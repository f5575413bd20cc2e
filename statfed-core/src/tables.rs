//! Ordered store set with atomic overlay hot swap
//!
//! A [`TableSet`] holds the ordered backing tables for one key space. Index 0
//! is the most authoritative tier (the overlay); later entries are the
//! stable base tiers. The precedence merger resolves disagreements in this
//! order.
//!
//! # Thread Safety
//!
//! - Fetches take a cheap [`TableSet::snapshot`] (brief read lock, then
//!   released) and run entirely against that snapshot.
//! - [`TableSet::swap_overlay`] publishes a new store vector atomically, so
//!   in-flight fetches holding the prior snapshot complete safely while new
//!   fetches observe the new overlay. No lock is held across I/O.

use crate::store::Table;
use std::sync::{Arc, RwLock};

/// The ordered, hot-swappable set of backing tables
#[derive(Debug)]
pub struct TableSet {
    tables: RwLock<Arc<Vec<Table>>>,
}

impl TableSet {
    /// Create a table set with the given precedence order (index 0 first)
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            tables: RwLock::new(Arc::new(tables)),
        }
    }

    /// Current store list, ordered by precedence
    ///
    /// The returned snapshot is stable for the lifetime of one fetch call;
    /// later swaps do not affect it.
    pub fn snapshot(&self) -> Arc<Vec<Table>> {
        Arc::clone(&self.tables.read().expect("RwLock poisoned"))
    }

    /// Replace the overlay tier (index 0), keeping the base tiers
    ///
    /// If the set is empty the overlay becomes the only store.
    pub fn swap_overlay(&self, overlay: Table) {
        let mut guard = self.tables.write().expect("RwLock poisoned");
        let mut next: Vec<Table> = guard.as_ref().clone();
        if next.is_empty() {
            next.push(overlay);
        } else {
            next[0] = overlay;
        }
        tracing::debug!(overlay = next[0].name(), "overlay table swapped");
        *guard = Arc::new(next);
    }

    /// Replace the entire store list
    pub fn replace_all(&self, tables: Vec<Table>) {
        let mut guard = self.tables.write().expect("RwLock poisoned");
        *guard = Arc::new(tables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTable;
    use std::sync::Arc;

    fn table(name: &str) -> Table {
        Table::new(name, Arc::new(MemoryTable::new()))
    }

    #[test]
    fn test_snapshot_order() {
        let set = TableSet::new(vec![table("overlay"), table("base")]);
        let snapshot = set.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["overlay", "base"]);
    }

    #[test]
    fn test_swap_overlay_preserves_base() {
        let set = TableSet::new(vec![table("overlay-v1"), table("base")]);
        set.swap_overlay(table("overlay-v2"));

        let snapshot = set.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["overlay-v2", "base"]);
    }

    #[test]
    fn test_prior_snapshot_unaffected_by_swap() {
        let set = TableSet::new(vec![table("overlay-v1"), table("base")]);
        let before = set.snapshot();

        set.swap_overlay(table("overlay-v2"));
        let after = set.snapshot();

        assert_eq!(before[0].name(), "overlay-v1");
        assert_eq!(after[0].name(), "overlay-v2");
    }

    #[test]
    fn test_swap_into_empty_set() {
        let set = TableSet::new(vec![]);
        set.swap_overlay(table("overlay"));
        assert_eq!(set.snapshot().len(), 1);
    }
}
