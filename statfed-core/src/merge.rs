//! Precedence merge of per-store result maps
//!
//! Models the overlay-over-base architecture: a frequently refreshed overlay
//! tier overrides the stable base tiers without write-time coordination
//! between layers. Earlier maps win.

use rustc_hash::FxHashMap;

/// Merge per-store token maps, left-biased by store precedence
///
/// Each token's value is taken from the lowest-index map that holds it.
/// Tokens with no data in any store are absent from the result — callers
/// that need "explicitly nil" semantics layer that on top.
pub fn merge_by_precedence<V>(per_store: Vec<FxHashMap<String, V>>) -> FxHashMap<String, V> {
    let mut merged = FxHashMap::default();
    for store_map in per_store {
        for (token, value) in store_map {
            merged.entry(token).or_insert(value);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i64)]) -> FxHashMap<String, i64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_left_bias() {
        // Stores [A, B, C]; only B and C hold the token -> B wins
        let merged = merge_by_precedence(vec![
            map(&[]),
            map(&[("token", 2)]),
            map(&[("token", 3)]),
        ]);
        assert_eq!(merged.get("token"), Some(&2));
    }

    #[test]
    fn test_overlay_overrides_base() {
        let overlay = map(&[("p1^sv1", 5)]);
        let base = map(&[("p1^sv1", 3), ("p2^sv1", 9)]);

        let merged = merge_by_precedence(vec![overlay, base]);
        assert_eq!(merged.get("p1^sv1"), Some(&5));
        assert_eq!(merged.get("p2^sv1"), Some(&9));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_missing_everywhere_is_absent() {
        let merged = merge_by_precedence(vec![map(&[("a", 1)]), map(&[])]);
        assert!(!merged.contains_key("b"));
    }

    #[test]
    fn test_no_stores() {
        let merged: FxHashMap<String, i64> = merge_by_precedence(vec![]);
        assert!(merged.is_empty());
    }
}
