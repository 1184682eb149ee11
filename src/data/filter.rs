//! Filter Engine
//! Applies the user's age / country / gender selection to the dataset.

use super::record::{Dataset, Metric, Record};
use crate::config::DashboardConfig;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Gender selection from the sidebar radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
}

impl GenderFilter {
    pub const OPTIONS: [GenderFilter; 3] = [GenderFilter::All, GenderFilter::Male, GenderFilter::Female];

    pub fn label(self) -> &'static str {
        match self {
            GenderFilter::All => "All",
            GenderFilter::Male => "Male",
            GenderFilter::Female => "Female",
        }
    }

    /// Case-insensitive match against a record's gender (Unicode lowercase).
    pub fn accepts(self, gender: &str) -> bool {
        match self {
            GenderFilter::All => true,
            other => gender.to_lowercase() == other.label().to_lowercase(),
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenderFilter::OPTIONS
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gender selection '{s}'"))
    }
}

/// Current filter selection. Built fresh from the widgets on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub age_min: i64,
    pub age_max: i64,
    /// An empty set selects nothing.
    pub countries: BTreeSet<String>,
    pub gender: GenderFilter,
}

impl FilterSpec {
    /// Initial selection: configured age window clamped to the data, first N countries, all genders.
    pub fn from_defaults(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let (lo, hi) = config.default_age_range;
        let (age_min, age_max) = match dataset.age_bounds() {
            Some((min, max)) => (lo.clamp(min, max), hi.clamp(min, max)),
            None => (lo, hi),
        };

        Self {
            age_min,
            age_max,
            countries: dataset
                .countries()
                .iter()
                .take(config.default_country_count)
                .cloned()
                .collect(),
            gender: GenderFilter::All,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.age_min <= record.age
            && record.age <= self.age_max
            && self.countries.contains(&record.country)
            && self.gender.accepts(&record.gender)
    }

    /// Keep every record satisfying all predicates, preserving dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        FilteredView {
            records: dataset.records().iter().filter(|r| self.matches(r)).collect(),
        }
    }
}

/// Read-only subset of the dataset produced by a [`FilterSpec`].
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn from_records(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn head(&self, n: usize) -> &[&'a Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Distinct countries present in the view, sorted by name.
    pub fn countries(&self) -> BTreeSet<&'a str> {
        self.records.iter().map(|r| r.country.as_str()).collect()
    }

    /// Non-null values of one metric.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.metric(metric)).collect()
    }

    /// Rows where both metrics are present.
    pub fn pairs(&self, x: Metric, y: Metric) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| Some((r.metric(x)?, r.metric(y)?)))
            .collect()
    }
}

/// Shorthand for [`FilterSpec::apply`].
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> FilteredView<'a> {
    spec.apply(dataset)
}
