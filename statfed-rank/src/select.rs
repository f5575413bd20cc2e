//! Canonical value selection from ranked series
//!
//! Pure decision functions over fetched data: no state, no retries, and
//! expected "no data" conditions surface as typed `NotFound` results, never
//! panics. User-facing error translation happens above this crate.

use crate::rank::{compare_series, RankMode};
use crate::series::{ObservationPoint, SourceSeries};
use crate::table::is_low_quality_import;
use statfed_core::{Error, Result};

// ============================================================================
// Best Series
// ============================================================================

/// Result of [`best_series`]: the winning series, plus the globally latest
/// observation when latest-value semantics were requested
#[derive(Debug, Clone, PartialEq)]
pub struct BestSeries<'a> {
    /// The selected series (carries its metadata)
    pub series: &'a SourceSeries,
    /// The globally latest observation, set only under `use_latest`
    pub latest: Option<ObservationPoint>,
}

/// Select the best series for an entity
///
/// With a non-empty `import_name_override`, returns the series with exactly
/// that import name — ranking is bypassed entirely — or `NotFound` when no
/// series matches. Otherwise the series are ranked; with `use_latest` unset
/// the top-ranked series wins, and with it set **every** ranked series is
/// scanned and the value/date of the globally latest date is returned
/// together with its series. Ties at the same latest date keep the first
/// (highest-ranked) series encountered.
pub fn best_series<'a>(
    series: &'a [SourceSeries],
    import_name_override: &str,
    use_latest: bool,
    mode: RankMode,
) -> Result<BestSeries<'a>> {
    if !import_name_override.is_empty() {
        return series
            .iter()
            .find(|s| s.metadata.import_name == import_name_override)
            .map(|s| BestSeries {
                series: s,
                latest: None,
            })
            .ok_or_else(|| {
                Error::not_found(format!(
                    "no series from import '{}'",
                    import_name_override
                ))
            });
    }

    if series.is_empty() {
        return Err(Error::not_found("no series available"));
    }

    let mut ranked: Vec<&SourceSeries> = series.iter().collect();
    ranked.sort_by(|a, b| compare_series(a, b, mode));

    if !use_latest {
        return Ok(BestSeries {
            series: ranked[0],
            latest: None,
        });
    }

    // Scan every ranked series; strictly-later dates replace, so ties keep
    // the first (highest-ranked) series encountered.
    let mut best: Option<(&SourceSeries, &str, f64)> = None;
    for &s in &ranked {
        for (date, value) in &s.points {
            let later = match &best {
                Some((_, best_date, _)) => date.as_str() > *best_date,
                None => true,
            };
            if later {
                best = Some((s, date, *value));
            }
        }
    }

    match best {
        Some((s, date, value)) => Ok(BestSeries {
            series: s,
            latest: Some(ObservationPoint {
                date: date.to_string(),
                value,
            }),
        }),
        None => Err(Error::not_found("no observations in any series")),
    }
}

// ============================================================================
// Value From Best Source
// ============================================================================

/// Select a single observation from the best source holding it
///
/// The series are ranked in date-series mode. With a date, the scan walks
/// the ranked order and returns the value from the first series containing
/// that exact date; lower-ranked series are consulted only when higher
/// ranked ones lack the date. With no date, the scan accumulates the maximum
/// date seen, stopping as soon as a series at index > 0 comes from a
/// low-quality import — the top-ranked series is always scanned in full,
/// even when it is itself low-quality and no better source exists (callers
/// depend on that boundary).
pub fn value_from_best_source(
    series: &[SourceSeries],
    date: Option<&str>,
) -> Result<ObservationPoint> {
    if series.is_empty() {
        return Err(Error::not_found("no series available"));
    }

    let mut ranked: Vec<&SourceSeries> = series.iter().collect();
    ranked.sort_by(|a, b| compare_series(a, b, RankMode::DateSeries));

    if let Some(date) = date.filter(|d| !d.is_empty()) {
        for s in &ranked {
            if let Some(value) = s.value_at(date) {
                return Ok(ObservationPoint {
                    date: date.to_string(),
                    value,
                });
            }
        }
        return Err(Error::not_found(format!("no source holds date '{}'", date)));
    }

    let mut best: Option<(String, f64)> = None;
    for (idx, s) in ranked.iter().enumerate() {
        if idx > 0 && is_low_quality_import(&s.metadata.import_name) {
            break;
        }
        for (d, v) in &s.points {
            let later = match &best {
                Some((best_date, _)) => d.as_str() > best_date.as_str(),
                None => true,
            };
            if later {
                best = Some((d.clone(), *v));
            }
        }
    }

    best.map(|(date, value)| ObservationPoint { date, value })
        .ok_or_else(|| Error::not_found("no observations in scanned sources"))
}
