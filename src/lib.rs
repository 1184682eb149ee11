//! Coffee & Health Explorer
//!
//! Filters a coffee consumption / health dataset and derives correlation,
//! per-country means and a one-way ANOVA, shaped into chart descriptions
//! for the desktop window and the PNG exporter.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;

pub use config::DashboardConfig;
pub use data::{DataLoader, Dataset, FilterSpec, FilteredView, GenderFilter, Metric, Record};
pub use pipeline::{recompute, DashboardOutputs};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::data::Record;

    /// Record whose health metrics are linear in coffee intake.
    pub(crate) fn record(age: i64, country: &str, gender: &str, coffee: f64) -> Record {
        Record {
            age,
            country: country.to_string(),
            gender: gender.to_string(),
            coffee_intake: Some(coffee),
            bmi: Some(22.0 + coffee * 0.5),
            heart_rate: Some(60.0 + coffee * 2.0),
            sleep_hours: Some(8.0 - coffee * 0.2),
        }
    }
}
