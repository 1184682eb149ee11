//! Recompute Pipeline
//! filter -> statistics -> chart descriptions, rerun from scratch on every change.

use crate::charts::{
    AnovaSummary, BarChart, CorrelationTable, DashboardPresenter, DataPreview, HistogramChart,
    MeansTable, ScatterChart,
};
use crate::data::{Dataset, FilterSpec};
use crate::stats::{AnovaOutcome, Statistics, StatsCalculator};
use serde::Serialize;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOutputs {
    pub filter: FilterSpec,
    pub show_regression: bool,
    pub row_count: usize,
    pub preview: DataPreview,
    pub scatter_charts: Vec<ScatterChart>,
    pub correlation_table: CorrelationTable,
    pub correlation_notes: Vec<String>,
    pub coffee_by_country: BarChart,
    pub sleep_histogram: HistogramChart,
    pub country_means: MeansTable,
    pub anova: AnovaSummary,
    pub statistics: Statistics,
}

/// Run the whole pipeline for one selection.
pub fn recompute(dataset: &Dataset, spec: &FilterSpec, show_regression: bool) -> DashboardOutputs {
    recompute_with_preview(dataset, spec, show_regression, DEFAULT_PREVIEW_ROWS)
}

pub fn recompute_with_preview(
    dataset: &Dataset,
    spec: &FilterSpec,
    show_regression: bool,
    preview_rows: usize,
) -> DashboardOutputs {
    let view = spec.apply(dataset);
    log::debug!(
        "Recompute: age {}..={}, {} countries, gender {} -> {} rows",
        spec.age_min,
        spec.age_max,
        spec.countries.len(),
        spec.gender,
        view.len()
    );

    let statistics = StatsCalculator::compute_all(&view);
    if let AnovaOutcome::InsufficientGroups { groups } = statistics.anova {
        log::warn!("ANOVA skipped: {groups} non-empty country group(s)");
    }

    DashboardOutputs {
        filter: spec.clone(),
        show_regression,
        row_count: view.len(),
        preview: DashboardPresenter::data_preview(&view, preview_rows),
        scatter_charts: DashboardPresenter::scatter_charts(&view, show_regression),
        correlation_table: DashboardPresenter::correlation_table(&statistics.correlation),
        correlation_notes: DashboardPresenter::correlation_notes(&statistics.correlation),
        coffee_by_country: DashboardPresenter::coffee_by_country(&statistics.group_means),
        sleep_histogram: DashboardPresenter::sleep_histogram(&view),
        country_means: DashboardPresenter::means_table(&statistics.group_means),
        anova: DashboardPresenter::anova_summary(&statistics.anova),
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::AnovaVerdict;
    use crate::data::GenderFilter;
    use crate::test_support::record;

    fn dataset() -> Dataset {
        let countries = ["Brazil", "Canada", "Egypt", "Japan"];
        let records = (0..400)
            .map(|i| {
                record(
                    18 + (i % 50),
                    countries[i as usize % countries.len()],
                    if i % 3 == 0 { "Female" } else { "Male" },
                    ((i * 13) % 17) as f64 / 2.0,
                )
            })
            .collect();
        Dataset::from_records(records)
    }

    fn spec(countries: &[&str]) -> FilterSpec {
        FilterSpec {
            age_min: 20,
            age_max: 50,
            countries: countries.iter().map(|c| c.to_string()).collect(),
            gender: GenderFilter::All,
        }
    }

    #[test]
    fn recompute_is_idempotent() {
        let ds = dataset();
        let spec = spec(&["Brazil", "Canada", "Egypt"]);

        let first = recompute(&ds, &spec, true);
        let second = recompute(&ds, &spec, true);
        assert_eq!(first, second);
        assert_eq!(first.row_count, spec.apply(&ds).len());
    }

    #[test]
    fn empty_selection_degrades_everywhere() {
        let ds = dataset();
        let out = recompute(&ds, &spec(&[]), false);

        assert_eq!(out.row_count, 0);
        assert!(out.preview.rows.is_empty());
        assert!(out.scatter_charts.iter().all(|c| c.is_empty()));
        assert!(out.coffee_by_country.is_empty());
        assert!(out.sleep_histogram.is_empty());
        assert!(out.country_means.rows.is_empty());
        assert_eq!(out.anova.verdict, AnovaVerdict::InsufficientGroups);
        assert!(out
            .correlation_table
            .cells
            .iter()
            .flatten()
            .all(|c| c.coefficient.value().is_none()));
    }

    #[test]
    fn single_country_skips_anova() {
        let ds = dataset();
        let out = recompute(&ds, &spec(&["Japan"]), false);

        assert!(out.row_count > 0);
        assert_eq!(out.anova.verdict, AnovaVerdict::InsufficientGroups);
        assert!(out.anova.result.is_none());
        assert_eq!(out.country_means.rows.len(), 1);
    }

    #[test]
    fn outputs_serialize_to_json() {
        let ds = dataset();
        let out = recompute(&ds, &spec(&["Brazil", "Egypt"]), true);
        let json = serde_json::to_value(&out).expect("serialize outputs");

        assert_eq!(json["row_count"], out.row_count);
        assert_eq!(json["scatter_charts"].as_array().map(Vec::len), Some(3));
    }
}
