//! CSV Data Loader Module
//! Reads the coffee & health CSV with Polars and converts it into typed records.

use super::record::{Dataset, Metric, Record};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const AGE_COLUMN: &str = "Age";
pub const COUNTRY_COLUMN: &str = "Country";
pub const GENDER_COLUMN: &str = "Gender";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column '{0}' not found")]
    MissingColumn(String),
    #[error("Row {row}: missing or invalid value in column '{column}'")]
    MissingValue { column: String, row: usize },
}

/// Loads the fixed-schema dataset file.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    ///
    /// Malformed rows are not skipped: any parse failure aborts the load.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
        let path = path.as_ref();
        log::info!("Loading dataset from {}", path.display());

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let dataset = Self::from_dataframe(&df)?;
        log::info!(
            "Loaded {} rows across {} countries",
            dataset.len(),
            dataset.countries().len()
        );
        Ok(dataset)
    }

    /// Convert a DataFrame holding the dataset columns into records.
    pub fn from_dataframe(df: &DataFrame) -> Result<Dataset, LoaderError> {
        let ages = Self::int_column(df, AGE_COLUMN)?;
        let countries = Self::string_column(df, COUNTRY_COLUMN)?;
        let genders = Self::string_column(df, GENDER_COLUMN)?;

        let mut metrics: Vec<Vec<Option<f64>>> = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            metrics.push(Self::float_column(df, metric.column_name())?);
        }

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let age = Self::required(ages[row], AGE_COLUMN, row)?;
            let country = Self::required(countries[row].clone(), COUNTRY_COLUMN, row)?;
            let gender = Self::required(genders[row].clone(), GENDER_COLUMN, row)?;

            records.push(Record {
                age,
                country,
                gender,
                coffee_intake: metrics[Metric::CoffeeIntake.index()][row],
                bmi: metrics[Metric::Bmi.index()][row],
                heart_rate: metrics[Metric::HeartRate.index()][row],
                sleep_hours: metrics[Metric::SleepHours.index()][row],
            });
        }

        Ok(Dataset::from_records(records))
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
        df.column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))
    }

    fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, LoaderError> {
        let column = Self::column(df, name)?.cast(&DataType::Int64)?;
        Ok(column.i64()?.into_iter().collect())
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = Self::column(df, name)?.cast(&DataType::Float64)?;
        Ok(column
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = Self::column(df, name)?.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect())
    }

    fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T, LoaderError> {
        value.ok_or_else(|| LoaderError::MissingValue {
            column: column.to_string(),
            row,
        })
    }
}
