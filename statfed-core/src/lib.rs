//! # StatFed Core
//!
//! Batched parallel fetch, precedence merge, and store handling for the
//! StatFed data-federation engine.
//!
//! This crate provides:
//! - Row-key construction and token derivation
//! - Tagged key sets with bounded batching
//! - Store handle traits and the hot-swappable ordered store set
//! - The zstd+JSON payload codec
//! - The parallel fetcher with atomic all-or-nothing failure semantics
//! - Left-biased precedence merging
//!
//! ## Design Principles
//!
//! 1. **Pure read path**: no retries inside the core; the whole call is
//!    safely retriable by the caller
//! 2. **Structured fan-out**: workers run on the caller's task, so
//!    cancellation and first-error abort propagate to every sibling
//! 3. **Request isolation**: the only shared mutable state is store-handle
//!    identity, published via atomic snapshot swap
//!
//! ## Example
//!
//! ```ignore
//! use statfed_core::{fetch_merged, FetchConfig, KeySet, TableSet};
//!
//! let snapshot = table_set.snapshot();
//! let merged = fetch_merged(
//!     &snapshot,
//!     &KeySet::Keys(keys),
//!     &FetchConfig::default(),
//!     statfed_core::key::default_token,
//!     |_token, raw| statfed_core::codec::decode_record(raw),
//! )
//! .await?;
//! ```

pub mod codec;
pub mod error;
pub mod fetch;
pub mod key;
pub mod keyset;
pub mod merge;
pub mod store;
pub mod tables;

// Re-export main types
pub use codec::{decode_record, decompress, encode_record, ZSTD_LEVEL};
pub use error::{Error, Result};
pub use fetch::{fetch_merged, fetch_per_store, fetch_stats_reset, FetchConfig};
pub use key::{
    build_row_key, default_token, escape_component, strip_prefix_token, unescape_component,
    KEY_DELIMITER,
};
pub use keyset::{split_into_batches, KeySet, RowRange, DEFAULT_MAX_BATCH_SIZE};
pub use merge::merge_by_precedence;
pub use store::{MemoryTable, RowCell, Table, TableReader};
pub use tables::TableSet;
