//! Batched parallel fetch across ordered stores
//!
//! The fetcher fans out one read per (store, batch) pair over the
//! cross-product of the batched key set and the store snapshot, decodes each
//! returned cell, and produces one token→value map per store, ordered by
//! store precedence.
//!
//! # Architecture
//!
//! ```text
//! KeySet ── split_into_batches ──▶ [batch; ceil(N/B)]
//!                                       │ × stores
//!                                       ▼
//!                          FuturesUnordered (caller's task)
//!                  read_rows → skip absent → token → decompress → transform
//!                                       │
//!                                       ▼
//!                        Vec<FxHashMap<token, value>> (per store)
//! ```
//!
//! # Failure Semantics
//!
//! The first error from any worker aborts the whole call: returning the
//! error drops the remaining futures, cancelling every sibling at its next
//! suspension point. Partial results are discarded — the call never returns
//! a partial success. The same drop-based propagation applies to caller-side
//! cancellation (timeout, disconnect). No retries happen here; the read path
//! is pure, so the whole call is safely retriable by the caller.

use crate::codec;
use crate::error::{Error, Result};
use crate::keyset::{split_into_batches, KeySet, DEFAULT_MAX_BATCH_SIZE};
use crate::merge::merge_by_precedence;
use crate::store::Table;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

// Global counters for fetch diagnostics
static FETCH_BATCHES: AtomicU64 = AtomicU64::new(0);
static FETCH_ROWS: AtomicU64 = AtomicU64::new(0);

/// Get and reset fetch statistics (batch reads issued, rows decoded)
pub fn fetch_stats_reset() -> (u64, u64) {
    let batches = FETCH_BATCHES.swap(0, Ordering::Relaxed);
    let rows = FETCH_ROWS.swap(0, Ordering::Relaxed);
    (batches, rows)
}

/// Configuration for one fetch call
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum number of keys (or ranges) per backing-store read
    ///
    /// Caps request payloads to the backing store's limit. Larger key sets
    /// simply produce proportionally more batches — there is no further
    /// throttling below this cap.
    pub max_batch_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl FetchConfig {
    /// Create a configuration with a custom batch cap
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self { max_batch_size }
    }
}

/// Fetch and decode rows from every store, one result map per store
///
/// For each returned cell: an absent payload means "no data for this key"
/// and is skipped; otherwise the token is derived via `token_fn`, the
/// payload is decompressed, and `transform` maps the decompressed bytes to a
/// value. Output maps are ordered by the precedence of `tables`.
///
/// Fails atomically on the first worker error (see module docs).
pub async fn fetch_per_store<V, T, F>(
    tables: &[Table],
    rows: &KeySet,
    config: &FetchConfig,
    token_fn: T,
    transform: F,
) -> Result<Vec<FxHashMap<String, V>>>
where
    T: Fn(&str) -> Result<String> + Sync,
    F: Fn(&str, &[u8]) -> Result<V> + Sync,
{
    let batches = split_into_batches(rows, config.max_batch_size)?;

    let mut results: Vec<FxHashMap<String, V>> =
        tables.iter().map(|_| FxHashMap::default()).collect();
    if batches.is_empty() || tables.is_empty() {
        return Ok(results);
    }

    tracing::debug!(
        stores = tables.len(),
        batches = batches.len(),
        keys = rows.len(),
        "issuing parallel fetch"
    );

    let token_fn = &token_fn;
    let transform = &transform;

    let mut workers = FuturesUnordered::new();
    for (store_idx, table) in tables.iter().enumerate() {
        for batch in &batches {
            workers.push(async move {
                let cells = table.read_rows(batch).await?;
                FETCH_BATCHES.fetch_add(1, Ordering::Relaxed);

                let mut decoded = Vec::new();
                for cell in cells {
                    // Absent payload: no data for this key, not an error
                    let Some(bytes) = cell.value else { continue };
                    let token = token_fn(&cell.key)?;
                    let raw = codec::decompress(&bytes)?;
                    let value = transform(&token, &raw)?;
                    decoded.push((token, value));
                }
                Ok::<_, Error>((store_idx, decoded))
            });
        }
    }

    while let Some(worker_result) = workers.next().await {
        // First error wins: returning drops `workers`, cancelling all
        // in-flight siblings and discarding any partial results.
        let (store_idx, decoded) = worker_result?;
        FETCH_ROWS.fetch_add(decoded.len() as u64, Ordering::Relaxed);
        let store_map = &mut results[store_idx];
        for (token, value) in decoded {
            store_map.insert(token, value);
        }
    }

    Ok(results)
}

/// Fetch from every store and merge by precedence into a single map
///
/// Convenience composition of the batcher, fetcher, and precedence merger.
/// Tokens with no data in any store are absent from the result (not nil).
pub async fn fetch_merged<V, T, F>(
    tables: &[Table],
    rows: &KeySet,
    config: &FetchConfig,
    token_fn: T,
    transform: F,
) -> Result<FxHashMap<String, V>>
where
    T: Fn(&str) -> Result<String> + Sync,
    F: Fn(&str, &[u8]) -> Result<V> + Sync,
{
    let per_store = fetch_per_store(tables, rows, config, token_fn, transform).await?;
    Ok(merge_by_precedence(per_store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_record;
    use crate::error::Error;
    use crate::key::default_token;
    use crate::store::{MemoryTable, Table};
    use std::sync::Arc;

    fn store_with(entries: &[(&str, i64)]) -> Table {
        let memory = MemoryTable::new();
        for (key, value) in entries {
            memory.insert(*key, encode_record(value).unwrap());
        }
        Table::new("test", Arc::new(memory))
    }

    fn decode_i64(_token: &str, raw: &[u8]) -> crate::error::Result<i64> {
        Ok(serde_json::from_slice(raw)?)
    }

    #[tokio::test]
    async fn test_fetch_per_store_preserves_store_order() {
        let overlay = store_with(&[("k1", 10)]);
        let base = store_with(&[("k1", 1), ("k2", 2)]);

        let maps = fetch_per_store(
            &[overlay, base],
            &KeySet::Keys(vec!["k1".into(), "k2".into()]),
            &FetchConfig::default(),
            default_token,
            decode_i64,
        )
        .await
        .unwrap();

        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0].get("k1"), Some(&10));
        assert_eq!(maps[0].get("k2"), None);
        assert_eq!(maps[1].get("k1"), Some(&1));
        assert_eq!(maps[1].get("k2"), Some(&2));
    }

    #[tokio::test]
    async fn test_absent_payloads_skipped() {
        let table = store_with(&[("k1", 1)]);

        let maps = fetch_per_store(
            &[table],
            &KeySet::Keys(vec!["k1".into(), "missing".into()]),
            &FetchConfig::default(),
            default_token,
            decode_i64,
        )
        .await
        .unwrap();

        assert_eq!(maps[0].len(), 1);
        assert!(!maps[0].contains_key("missing"));
    }

    #[tokio::test]
    async fn test_transform_error_aborts_whole_call() {
        let a = store_with(&[("k1", 1)]);
        let b = store_with(&[("k2", 2)]);

        let result = fetch_per_store(
            &[a, b],
            &KeySet::Keys(vec!["k1".into(), "k2".into()]),
            &FetchConfig::default(),
            default_token,
            |token, _raw| -> crate::error::Result<i64> {
                if token == "k2" {
                    Err(Error::internal("bad record shape"))
                } else {
                    Ok(0)
                }
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[tokio::test]
    async fn test_corrupt_payload_aborts_whole_call() {
        let memory = MemoryTable::new();
        memory.insert("k1", b"not zstd".to_vec());
        let table = Table::new("corrupt", Arc::new(memory));

        let result = fetch_per_store(
            &[table],
            &KeySet::Keys(vec!["k1".into()]),
            &FetchConfig::default(),
            default_token,
            decode_i64,
        )
        .await;

        assert!(matches!(result, Err(Error::Codec(_))));
    }

    #[tokio::test]
    async fn test_empty_keyset_yields_empty_maps() {
        let table = store_with(&[("k1", 1)]);

        let maps = fetch_per_store(
            &[table],
            &KeySet::Keys(vec![]),
            &FetchConfig::default(),
            default_token,
            decode_i64,
        )
        .await
        .unwrap();

        assert_eq!(maps.len(), 1);
        assert!(maps[0].is_empty());
    }

    #[tokio::test]
    async fn test_small_batch_cap_covers_all_keys() {
        let entries: Vec<(String, i64)> = (0..10).map(|i| (format!("k{}", i), i)).collect();
        let memory = MemoryTable::new();
        for (key, value) in &entries {
            memory.insert(key.clone(), encode_record(value).unwrap());
        }
        let table = Table::new("batched", Arc::new(memory));

        let keys: Vec<String> = entries.iter().map(|(k, _)| k.clone()).collect();
        let maps = fetch_per_store(
            &[table],
            &KeySet::Keys(keys),
            &FetchConfig::with_max_batch_size(3),
            default_token,
            decode_i64,
        )
        .await
        .unwrap();

        assert_eq!(maps[0].len(), 10);
    }

    #[tokio::test]
    async fn test_fetch_merged_left_bias() {
        let overlay = store_with(&[("p1^sv1", 5)]);
        let base = store_with(&[("p1^sv1", 3), ("p2^sv1", 9)]);

        let merged = fetch_merged(
            &[overlay, base],
            &KeySet::Keys(vec!["p1^sv1".into(), "p2^sv1".into()]),
            &FetchConfig::default(),
            default_token,
            decode_i64,
        )
        .await
        .unwrap();

        assert_eq!(merged.get("p1^sv1"), Some(&5));
        assert_eq!(merged.get("p2^sv1"), Some(&9));
    }
}
