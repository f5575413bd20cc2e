//! Static source-ranking table
//!
//! Competing imports are ordered by a fixed, compiled-in score table keyed by
//! (import name, measurement method, observation period), where method and
//! period may be the wildcard [`WILDCARD`]. The table is versioned with this
//! crate — there is no runtime mutation path, so it is a plain immutable
//! constant, not a locking singleton.
//!
//! Scores below [`BASE_RANK`] mark explicitly preferred sources; scores
//! above it mark explicitly deprecated or low-quality sources. Any
//! (import, method, period) triple absent from the table scores exactly
//! `BASE_RANK`.

use crate::series::SeriesMetadata;

/// Sentinel score for sources absent from the table
///
/// Divides explicitly preferred entries (below) from explicitly deprecated
/// ones (above).
pub const BASE_RANK: i32 = 100;

/// Wildcard marker for measurement method / observation period table keys
pub const WILDCARD: &str = "*";

/// One compiled-in score entry
struct RankEntry {
    import_name: &'static str,
    measurement_method: &'static str,
    observation_period: &'static str,
    score: i32,
}

const fn entry(
    import_name: &'static str,
    measurement_method: &'static str,
    observation_period: &'static str,
    score: i32,
) -> RankEntry {
    RankEntry {
        import_name,
        measurement_method,
        observation_period,
        score,
    }
}

/// The compiled-in ranking table
const RANK_TABLE: &[RankEntry] = &[
    // Preferred sources (below BASE_RANK)
    entry("CensusPEP", "CensusPEPSurvey", WILDCARD, 0),
    entry("CensusACS5YearSurvey", "CensusACS5yrSurvey", WILDCARD, 1),
    entry("CensusACS5YearSurvey", WILDCARD, WILDCARD, 2),
    entry("USDecennialCensus", WILDCARD, WILDCARD, 3),
    entry("EurostatData", WILDCARD, "P1Y", 4),
    entry("WorldDevelopmentIndicators", WILDCARD, WILDCARD, 5),
    entry("OECDRegionalStatistics", WILDCARD, WILDCARD, 6),
    // Deprecated sources (above BASE_RANK)
    entry("WikidataPopulation", WILDCARD, WILDCARD, 1001),
    entry("GeoNamesEstimate", WILDCARD, WILDCARD, 1002),
];

/// Imports whose latest values are considered low quality
///
/// Used by the latest-value selector to stop scanning once a lower-ranked
/// series comes from one of these imports.
const LOW_QUALITY_IMPORTS: &[&str] = &[
    "WikidataPopulation",
    "GeoNamesEstimate",
    "HumanCuratedStats",
];

/// Check whether an import is on the low-quality denylist
pub fn is_low_quality_import(import_name: &str) -> bool {
    LOW_QUALITY_IMPORTS.contains(&import_name)
}

fn lookup(import: &str, method: &str, period: &str) -> Option<i32> {
    RANK_TABLE
        .iter()
        .find(|e| {
            e.import_name == import
                && e.measurement_method == method
                && e.observation_period == period
        })
        .map(|e| e.score)
}

/// Score a series' metadata against the ranking table; lower is better
///
/// Lookup order: exact (method, period) → (method, `*`) → (`*`, period) →
/// (`*`, `*`); first match wins. No match scores exactly [`BASE_RANK`].
pub fn rank_score(meta: &SeriesMetadata) -> i32 {
    let import = meta.import_name.as_str();
    let method = meta.measurement_method.as_str();
    let period = meta.observation_period.as_str();

    lookup(import, method, period)
        .or_else(|| lookup(import, method, WILDCARD))
        .or_else(|| lookup(import, WILDCARD, period))
        .or_else(|| lookup(import, WILDCARD, WILDCARD))
        .unwrap_or(BASE_RANK)
}
