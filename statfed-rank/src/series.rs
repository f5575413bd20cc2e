//! Source series model: one provider's observations plus provenance
//!
//! A [`SourceSeries`] is one data provider's observation series for a single
//! entity. The points map is keyed by observation date (date-series mode) or
//! by place (place-cohort mode); which interpretation applies is chosen by
//! the ranking mode, not by the data shape.
//!
//! Dates are opaque ISO-8601 strings (`"2020"`, `"2020-07"`, `"2020-07-01"`)
//! compared lexicographically, which matches chronological order within a
//! uniform precision.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provenance metadata attached to one source series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesMetadata {
    /// Name of the import that produced this series
    pub import_name: String,
    /// Measurement method (e.g. a survey identifier)
    pub measurement_method: String,
    /// Observation period (e.g. `"P1Y"`)
    pub observation_period: String,
    /// Scaling factor applied to stored values
    pub scaling_factor: String,
    /// Unit of measurement
    pub unit: String,
    /// URL of the upstream provenance
    pub provenance_url: String,
}

/// One provider's observation series for an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceSeries {
    /// Observation values keyed by date (or by place in cohort mode)
    pub points: HashMap<String, f64>,
    /// Provenance metadata
    pub metadata: SeriesMetadata,
}

impl SourceSeries {
    /// Number of observation points (dates or places)
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Most recent observation date, or `None` for an empty series
    pub fn latest_date(&self) -> Option<&str> {
        self.points.keys().map(String::as_str).max()
    }

    /// Value at an exact date, if present
    pub fn value_at(&self, date: &str) -> Option<f64> {
        self.points.get(date).copied()
    }
}

/// A single selected observation: the date and its value
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationPoint {
    /// Observation date
    pub date: String,
    /// Observed value
    pub value: f64,
}
