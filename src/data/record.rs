//! Record Model
//! Typed rows of the coffee & health dataset.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Numeric health columns, in the fixed order used by every table and matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    CoffeeIntake,
    Bmi,
    HeartRate,
    SleepHours,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::CoffeeIntake,
        Metric::Bmi,
        Metric::HeartRate,
        Metric::SleepHours,
    ];

    /// Column name in the source CSV.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::CoffeeIntake => "Coffee_Intake",
            Metric::Bmi => "BMI",
            Metric::HeartRate => "Heart_Rate",
            Metric::SleepHours => "Sleep_Hours",
        }
    }

    /// Short human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::CoffeeIntake => "Coffee Intake",
            Metric::Bmi => "BMI",
            Metric::HeartRate => "Heart Rate",
            Metric::SleepHours => "Sleep Hours",
        }
    }

    /// Axis label including the unit.
    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::CoffeeIntake => "Coffee Intake (cups/week)",
            Metric::Bmi => "BMI",
            Metric::HeartRate => "Heart Rate (bpm)",
            Metric::SleepHours => "Sleep Hours (per night)",
        }
    }

    /// Position of the metric inside [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One observation. Health metrics are nullable; an empty cell loads as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub age: i64,
    pub country: String,
    pub gender: String,
    pub coffee_intake: Option<f64>,
    pub bmi: Option<f64>,
    pub heart_rate: Option<f64>,
    pub sleep_hours: Option<f64>,
}

impl Record {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CoffeeIntake => self.coffee_intake,
            Metric::Bmi => self.bmi,
            Metric::HeartRate => self.heart_rate,
            Metric::SleepHours => self.sleep_hours,
        }
    }
}

/// The loaded dataset. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    countries: Vec<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen = HashSet::new();
        let countries = records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect();

        Self { records, countries }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct countries in order of first appearance.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Inclusive (min, max) age, or `None` for an empty dataset.
    pub fn age_bounds(&self) -> Option<(i64, i64)> {
        let min = self.records.iter().map(|r| r.age).min()?;
        let max = self.records.iter().map(|r| r.age).max()?;
        Some((min, max))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
