//! Stats module - correlation, group means, ANOVA and regression

mod calculator;
mod regression;

pub use calculator::{
    AnovaOutcome, AnovaResult, Coefficient, CorrelationMatrix, CountryMeans, GroupMeansTable,
    Statistics, StatsCalculator, SIGNIFICANCE_THRESHOLD,
};
pub use regression::{linear_fit, LinearFit};
