//! Data module - CSV loading, typed records and filtering

pub mod filter;
mod loader;
mod record;

pub use filter::{FilterSpec, FilteredView, GenderFilter};
pub use loader::{DataLoader, LoaderError, AGE_COLUMN, COUNTRY_COLUMN, GENDER_COLUMN};
pub use record::{Dataset, Metric, Record};
