//! # StatFed Rank
//!
//! Deterministic source ranking and canonical value selection for the
//! StatFed data-federation engine.
//!
//! After the fetch/merge core produces a token→value map, a single entity
//! may still carry observation series from several disagreeing providers.
//! This crate orders those series with a static score table plus tie-break
//! rules, and selects "the" value:
//!
//! - [`rank_series`]: stable total order, best source first
//! - [`best_series`]: top-ranked series, an exact-import override, or the
//!   globally latest observation
//! - [`value_from_best_source`]: a single point at an exact date, or the
//!   latest value with the low-quality stop rule
//!
//! All operations are pure functions over supplied data; "no data" is a
//! typed `NotFound` result.

pub mod rank;
pub mod select;
pub mod series;
pub mod table;

// Re-export main types
pub use rank::{compare_series, rank_series, RankMode};
pub use select::{best_series, value_from_best_source, BestSeries};
pub use series::{ObservationPoint, SeriesMetadata, SourceSeries};
pub use table::{is_low_quality_import, rank_score, BASE_RANK, WILDCARD};
