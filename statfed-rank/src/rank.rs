//! Deterministic ordering of competing source series
//!
//! Given identical inputs the comparator yields a strict total order:
//! sorting is idempotent, and equal-score ties are broken by data recency,
//! data volume, and finally the full lexicographic metadata chain, so two
//! distinct series never compare equal in practice.

use crate::series::SourceSeries;
use crate::table::rank_score;
use std::cmp::Ordering;

/// Which tie-break applies at the second comparator step
///
/// Date-series mode prefers the series covering the more recent maximum
/// date; place-cohort mode prefers the series covering more places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMode {
    /// Points are keyed by observation date
    DateSeries,
    /// Points are keyed by place
    PlaceCohort,
}

/// Compare two series for ranking; `Less` means `a` is the better source
///
/// Evaluated in order until a tie-break resolves:
/// 1. Lower rank score wins.
/// 2. Date-series: more recent maximum date wins. Place-cohort: more places
///    covered wins.
/// 3. More data points wins.
/// 4. Lexicographic ascending: measurement method, observation period,
///    scaling factor, unit, provenance URL.
pub fn compare_series(a: &SourceSeries, b: &SourceSeries, mode: RankMode) -> Ordering {
    rank_score(&a.metadata)
        .cmp(&rank_score(&b.metadata))
        .then_with(|| match mode {
            RankMode::DateSeries => b.latest_date().cmp(&a.latest_date()),
            RankMode::PlaceCohort => b.point_count().cmp(&a.point_count()),
        })
        .then_with(|| b.point_count().cmp(&a.point_count()))
        .then_with(|| a.metadata.measurement_method.cmp(&b.metadata.measurement_method))
        .then_with(|| a.metadata.observation_period.cmp(&b.metadata.observation_period))
        .then_with(|| a.metadata.scaling_factor.cmp(&b.metadata.scaling_factor))
        .then_with(|| a.metadata.unit.cmp(&b.metadata.unit))
        .then_with(|| a.metadata.provenance_url.cmp(&b.metadata.provenance_url))
}

/// Sort series in place, best source first
///
/// The sort is stable, so inputs that compare equal keep their original
/// relative order.
pub fn rank_series(series: &mut [SourceSeries], mode: RankMode) {
    series.sort_by(|a, b| compare_series(a, b, mode));
}
