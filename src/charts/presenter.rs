//! Dashboard Presenter
//! Shapes filtered rows and computed statistics into chart descriptions.

use super::description::{
    heat_color, AnovaSummary, AnovaVerdict, BarChart, CategoryBar, CorrelationTable, DataPreview,
    HeatCell, HistogramChart, MeansTable, ScatterChart, ScatterSeries, NEUTRAL_GREY,
};
use crate::data::{FilteredView, Metric, Record, AGE_COLUMN, COUNTRY_COLUMN, GENDER_COLUMN};
use crate::stats::{linear_fit, AnovaOutcome, Coefficient, CorrelationMatrix, GroupMeansTable};

pub const HISTOGRAM_BINS: usize = 10;
/// Health metrics plotted against coffee intake.
pub const SCATTER_TARGETS: [Metric; 3] = [Metric::Bmi, Metric::HeartRate, Metric::SleepHours];

/// Maps pipeline results into renderer-agnostic descriptions.
pub struct DashboardPresenter;

impl DashboardPresenter {
    pub fn data_preview(view: &FilteredView<'_>, rows: usize) -> DataPreview {
        let mut columns = vec![
            AGE_COLUMN.to_string(),
            COUNTRY_COLUMN.to_string(),
            GENDER_COLUMN.to_string(),
        ];
        columns.extend(Metric::ALL.iter().map(|m| m.column_name().to_string()));

        DataPreview {
            columns,
            rows: view.head(rows).iter().map(|r| Self::preview_row(r)).collect(),
            total_rows: view.len(),
        }
    }

    fn preview_row(record: &Record) -> Vec<String> {
        let mut row = vec![
            record.age.to_string(),
            record.country.clone(),
            record.gender.clone(),
        ];
        row.extend(Metric::ALL.iter().map(|m| {
            record
                .metric(*m)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "NaN".to_string())
        }));
        row
    }

    pub fn scatter_charts(view: &FilteredView<'_>, show_regression: bool) -> Vec<ScatterChart> {
        SCATTER_TARGETS
            .iter()
            .map(|m| Self::scatter_chart(view, *m, show_regression))
            .collect()
    }

    /// Coffee intake vs `target`, coloured by gender in order of first appearance.
    pub fn scatter_chart(
        view: &FilteredView<'_>,
        target: Metric,
        show_regression: bool,
    ) -> ScatterChart {
        let mut series: Vec<ScatterSeries> = Vec::new();
        for record in view.iter() {
            let (Some(x), Some(y)) = (record.coffee_intake, record.metric(target)) else {
                continue;
            };
            match series.iter_mut().find(|s| s.label == record.gender) {
                Some(s) => s.points.push([x, y]),
                None => series.push(ScatterSeries {
                    label: record.gender.clone(),
                    points: vec![[x, y]],
                }),
            }
        }

        let regression = if show_regression {
            let all: Vec<[f64; 2]> = series.iter().flat_map(|s| s.points.iter().copied()).collect();
            linear_fit(&all)
        } else {
            None
        };

        ScatterChart {
            title: format!("Coffee vs {}", target.display_name()),
            x_label: Metric::CoffeeIntake.axis_label().to_string(),
            y_label: target.axis_label().to_string(),
            y_metric: target,
            series,
            regression,
        }
    }

    pub fn correlation_table(matrix: &CorrelationMatrix) -> CorrelationTable {
        CorrelationTable {
            labels: matrix
                .metrics
                .iter()
                .map(|m| m.column_name().to_string())
                .collect(),
            cells: matrix
                .cells
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|c| HeatCell {
                            coefficient: *c,
                            color: c.value().map(heat_color).unwrap_or(NEUTRAL_GREY),
                        })
                        .collect()
                })
                .collect(),
        }
    }

    /// One line per health metric describing its correlation with coffee intake.
    pub fn correlation_notes(matrix: &CorrelationMatrix) -> Vec<String> {
        SCATTER_TARGETS
            .iter()
            .map(|m| {
                format!(
                    "Coffee intake and {} correlation = {}",
                    m.display_name(),
                    matrix.get(Metric::CoffeeIntake, *m)
                )
            })
            .collect()
    }

    /// Mean coffee intake per country, ascending by the unrounded mean.
    pub fn coffee_by_country(means: &GroupMeansTable) -> BarChart {
        let mut bars: Vec<CategoryBar> = means
            .rows
            .iter()
            .filter_map(|row| {
                Some(CategoryBar {
                    category: row.country.clone(),
                    value: row.exact_mean(Metric::CoffeeIntake)?,
                })
            })
            .collect();
        bars.sort_by(|a, b| a.value.total_cmp(&b.value));

        BarChart {
            title: "Average Coffee Intake by Country".to_string(),
            y_label: "Average Coffee Cups per Week".to_string(),
            bars,
        }
    }

    pub fn sleep_histogram(view: &FilteredView<'_>) -> HistogramChart {
        HistogramChart {
            title: "Sleep Hours Distribution".to_string(),
            x_label: Metric::SleepHours.display_name().to_string(),
            y_label: "Count".to_string(),
            values: view.values(Metric::SleepHours),
            bins: HISTOGRAM_BINS,
            density_overlay: true,
        }
    }

    pub fn means_table(means: &GroupMeansTable) -> MeansTable {
        let mut headers = vec![COUNTRY_COLUMN.to_string()];
        headers.extend(Metric::ALL.iter().map(|m| m.column_name().to_string()));

        MeansTable {
            headers,
            rows: means.rows.clone(),
        }
    }

    pub fn anova_summary(outcome: &AnovaOutcome) -> AnovaSummary {
        match outcome {
            AnovaOutcome::Computed(result) => {
                let (verdict, message) = if result.is_significant() {
                    (
                        AnovaVerdict::Significant,
                        "There is a statistically significant difference in coffee intake between countries.",
                    )
                } else {
                    (
                        AnovaVerdict::NotSignificant,
                        "No significant difference found between selected countries.",
                    )
                };
                AnovaSummary {
                    verdict,
                    headline: Some(format!(
                        "ANOVA test result: F = {:.2}, p = {:.4}",
                        result.f_statistic, result.p_value
                    )),
                    message: message.to_string(),
                    result: Some(*result),
                }
            }
            AnovaOutcome::InsufficientGroups { .. } => AnovaSummary {
                verdict: AnovaVerdict::InsufficientGroups,
                headline: None,
                message: "Select at least 2 countries to perform group comparison.".to_string(),
                result: None,
            },
            AnovaOutcome::NotComputable { reason } => AnovaSummary {
                verdict: AnovaVerdict::NotComputable,
                headline: None,
                message: format!("ANOVA not computable: {reason}."),
                result: None,
            },
        }
    }
}

/// Keeps the coefficient's "not computable" marker visible in text tables.
pub fn coefficient_label(coefficient: Coefficient) -> String {
    match coefficient {
        Coefficient::Computed(r) => format!("{r:.2}"),
        Coefficient::NotComputable => "n/a".to_string(),
    }
}
