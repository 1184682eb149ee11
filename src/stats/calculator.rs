//! Statistics Calculator Module
//! Correlation matrix, per-country means and one-way ANOVA over a filtered view.

use crate::data::{FilteredView, Metric};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use std::collections::BTreeMap;
use std::fmt;

/// Significance threshold for the ANOVA verdict
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// A correlation coefficient, or the explicit absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Coefficient {
    Computed(f64),
    NotComputable,
}

impl Coefficient {
    pub fn value(self) -> Option<f64> {
        match self {
            Coefficient::Computed(r) => Some(r),
            Coefficient::NotComputable => None,
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Computed(r) => write!(f, "{r:.2}"),
            Coefficient::NotComputable => f.write_str("not computable"),
        }
    }
}

/// Pairwise Pearson coefficients. Always square and symmetric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    pub cells: Vec<Vec<Coefficient>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Metric, b: Metric) -> Coefficient {
        let i = self.metrics.iter().position(|m| *m == a);
        let j = self.metrics.iter().position(|m| *m == b);
        match (i, j) {
            (Some(i), Some(j)) => self.cells[i][j],
            _ => Coefficient::NotComputable,
        }
    }
}

/// Mean of each metric for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMeans {
    pub country: String,
    pub count: usize,
    /// Rounded to 2 decimals. Indexed like [`Metric::ALL`]; `None` when the country has no values for a metric.
    pub means: [Option<f64>; 4],
    /// Same layout as `means`, unrounded.
    pub exact_means: [Option<f64>; 4],
}

impl CountryMeans {
    pub fn mean(&self, metric: Metric) -> Option<f64> {
        self.means[metric.index()]
    }

    pub fn exact_mean(&self, metric: Metric) -> Option<f64> {
        self.exact_means[metric.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GroupMeansTable {
    /// Sorted by country name.
    pub rows: Vec<CountryMeans>,
}

impl GroupMeansTable {
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.country.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub groups: usize,
}

impl AnovaResult {
    pub fn is_significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_THRESHOLD
    }
}

/// Outcome of the coffee-intake-by-country ANOVA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnovaOutcome {
    /// Fewer than two non-empty groups; no statistic is produced.
    InsufficientGroups { groups: usize },
    /// Groups exist but the F ratio is undefined.
    NotComputable { reason: String },
    Computed(AnovaResult),
}

/// Everything the metrics engine derives from one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub correlation: CorrelationMatrix,
    pub group_means: GroupMeansTable,
    pub anova: AnovaOutcome,
}

/// Pure statistical routines over a [`FilteredView`].
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn compute_all(view: &FilteredView<'_>) -> Statistics {
        Statistics {
            correlation: Self::correlation_matrix(view),
            group_means: Self::group_means(view),
            anova: Self::one_way_anova(view),
        }
    }

    /// Pearson correlation for every metric pair, using pairwise-complete rows.
    pub fn correlation_matrix(view: &FilteredView<'_>) -> CorrelationMatrix {
        let metrics = Metric::ALL.to_vec();
        let n = metrics.len();
        let mut cells = vec![vec![Coefficient::NotComputable; n]; n];

        for i in 0..n {
            for j in i..n {
                let pairs = view.pairs(metrics[i], metrics[j]);
                let coefficient = match Self::pearson(&pairs) {
                    Coefficient::Computed(_) if i == j => Coefficient::Computed(1.0),
                    other => other,
                };
                cells[i][j] = coefficient;
                cells[j][i] = coefficient;
            }
        }

        CorrelationMatrix { metrics, cells }
    }

    /// Pearson coefficient of paired samples. Needs two rows and variance on both sides.
    pub fn pearson(pairs: &[(f64, f64)]) -> Coefficient {
        if pairs.len() < 2 {
            return Coefficient::NotComputable;
        }
        let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        if Self::is_constant(&xs) || Self::is_constant(&ys) {
            return Coefficient::NotComputable;
        }

        let mean_x = Self::mean(&xs);
        let mean_y = Self::mean(&ys);
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (x, y) in pairs {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        let r = sxy / (sxx.sqrt() * syy.sqrt());
        if r.is_finite() {
            Coefficient::Computed(r.clamp(-1.0, 1.0))
        } else {
            Coefficient::NotComputable
        }
    }

    /// Per-country means of every metric, rounded to 2 decimals.
    pub fn group_means(view: &FilteredView<'_>) -> GroupMeansTable {
        let mut groups: BTreeMap<&str, (usize, [Vec<f64>; 4])> = BTreeMap::new();
        for record in view.iter() {
            let entry = groups.entry(record.country.as_str()).or_default();
            entry.0 += 1;
            for metric in Metric::ALL {
                if let Some(v) = record.metric(metric) {
                    entry.1[metric.index()].push(v);
                }
            }
        }

        let rows = groups
            .into_iter()
            .map(|(country, (count, values))| {
                let exact_means = values.map(|v| (!v.is_empty()).then(|| Self::mean(&v)));
                CountryMeans {
                    country: country.to_string(),
                    count,
                    means: exact_means.map(|m| m.map(Self::round2)),
                    exact_means,
                }
            })
            .collect();

        GroupMeansTable { rows }
    }

    /// One-way ANOVA of coffee intake grouped by country.
    pub fn one_way_anova(view: &FilteredView<'_>) -> AnovaOutcome {
        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in view.iter() {
            if let Some(v) = record.coffee_intake {
                groups.entry(record.country.as_str()).or_default().push(v);
            }
        }

        let samples: Vec<Vec<f64>> = groups.into_values().collect();
        Self::anova(&samples)
    }

    /// F test for equal means across the given samples. Empty samples are ignored.
    pub fn anova(samples: &[Vec<f64>]) -> AnovaOutcome {
        let groups: Vec<&Vec<f64>> = samples.iter().filter(|s| !s.is_empty()).collect();
        let k = groups.len();
        if k < 2 {
            return AnovaOutcome::InsufficientGroups { groups: k };
        }

        let n: usize = groups.iter().map(|g| g.len()).sum();
        let df_between = k - 1;
        let df_within = n - k;
        if df_within == 0 {
            return AnovaOutcome::NotComputable {
                reason: "every group has a single observation".to_string(),
            };
        }

        let all: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
        if Self::is_constant(&all) {
            return AnovaOutcome::NotComputable {
                reason: "all values are identical".to_string(),
            };
        }

        let grand_mean = Self::mean(&all);
        let mut ss_between = 0.0;
        let mut ss_within = 0.0;
        let mut within_is_zero = true;
        for group in &groups {
            let group_mean = Self::mean(group);
            ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
            ss_within += group.iter().map(|x| (x - group_mean).powi(2)).sum::<f64>();
            within_is_zero &= Self::is_constant(group);
        }

        // Constant groups with different means: perfectly separated.
        if within_is_zero {
            return AnovaOutcome::Computed(AnovaResult {
                f_statistic: f64::INFINITY,
                p_value: 0.0,
                df_between,
                df_within,
                groups: k,
            });
        }

        let f_statistic = (ss_between / df_between as f64) / (ss_within / df_within as f64);
        match FisherSnedecor::new(df_between as f64, df_within as f64) {
            Ok(dist) => AnovaOutcome::Computed(AnovaResult {
                f_statistic,
                p_value: dist.sf(f_statistic).clamp(0.0, 1.0),
                df_between,
                df_within,
                groups: k,
            }),
            Err(e) => AnovaOutcome::NotComputable {
                reason: e.to_string(),
            },
        }
    }

    pub fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn is_constant(values: &[f64]) -> bool {
        values.windows(2).all(|w| w[0] == w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, FilterSpec, GenderFilter, Record};
    use crate::test_support::record;

    fn view_of(records: &[Record]) -> FilteredView<'_> {
        FilteredView::from_records(records.iter().collect())
    }

    /// Deterministic pseudo-random values in [0, 1).
    fn lcg(seed: &mut u64) -> f64 {
        *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (*seed >> 11) as f64 / (1u64 << 53) as f64
    }

    fn noisy_records(n: usize) -> Vec<Record> {
        let mut seed = 42;
        let countries = ["Brazil", "Canada", "Egypt"];
        (0..n)
            .map(|i| Record {
                age: 20 + (i % 40) as i64,
                country: countries[i % 3].to_string(),
                gender: (if i % 2 == 0 { "Male" } else { "Female" }).to_string(),
                coffee_intake: Some(lcg(&mut seed) * 20.0),
                bmi: Some(18.0 + lcg(&mut seed) * 12.0),
                heart_rate: Some(55.0 + lcg(&mut seed) * 40.0),
                sleep_hours: Some(4.0 + lcg(&mut seed) * 5.0),
            })
            .collect()
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let records = noisy_records(300);
        let matrix = StatsCalculator::correlation_matrix(&view_of(&records));

        for i in 0..4 {
            assert_eq!(matrix.cells[i][i], Coefficient::Computed(1.0));
            for j in 0..4 {
                assert_eq!(matrix.cells[i][j], matrix.cells[j][i]);
                let r = matrix.cells[i][j].value().unwrap();
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }

    #[test]
    fn perfectly_linear_metrics_correlate_fully() {
        let records: Vec<Record> = (0..10)
            .map(|i| record(30, "A", "Male", i as f64))
            .collect();
        let matrix = StatsCalculator::correlation_matrix(&view_of(&records));

        let bmi = matrix.get(Metric::CoffeeIntake, Metric::Bmi).value().unwrap();
        let sleep = matrix.get(Metric::CoffeeIntake, Metric::SleepHours).value().unwrap();
        assert!((bmi - 1.0).abs() < 1e-12);
        assert!((sleep + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_needs_two_rows() {
        let records = vec![record(30, "A", "Male", 3.0)];
        let matrix = StatsCalculator::correlation_matrix(&view_of(&records));
        assert!(matrix
            .cells
            .iter()
            .flatten()
            .all(|c| *c == Coefficient::NotComputable));

        let empty = StatsCalculator::correlation_matrix(&FilteredView::default());
        assert_eq!(empty.cells.len(), 4);
        assert!(empty.cells.iter().flatten().all(|c| c.value().is_none()));
    }

    #[test]
    fn correlation_uses_pairwise_complete_rows() {
        let mut records: Vec<Record> = (0..6).map(|i| record(30, "A", "Male", i as f64)).collect();
        for r in records.iter_mut().skip(1) {
            r.heart_rate = None;
        }
        let matrix = StatsCalculator::correlation_matrix(&view_of(&records));

        assert_eq!(
            matrix.get(Metric::CoffeeIntake, Metric::HeartRate),
            Coefficient::NotComputable
        );
        assert_eq!(
            matrix.get(Metric::HeartRate, Metric::HeartRate),
            Coefficient::NotComputable
        );
        assert!(matrix.get(Metric::CoffeeIntake, Metric::Bmi).value().is_some());
    }

    #[test]
    fn constant_column_is_not_computable() {
        assert_eq!(
            StatsCalculator::pearson(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]),
            Coefficient::NotComputable
        );
    }

    #[test]
    fn group_means_cover_exactly_present_countries() {
        let records = noisy_records(90);
        let dataset = Dataset::from_records(records);
        let spec = FilterSpec {
            age_min: 25,
            age_max: 45,
            countries: ["Brazil", "Egypt", "Fiji"].iter().map(|c| c.to_string()).collect(),
            gender: GenderFilter::All,
        };
        let view = spec.apply(&dataset);
        let table = StatsCalculator::group_means(&view);

        let present: Vec<&str> = view.countries().into_iter().collect();
        assert_eq!(table.countries().collect::<Vec<_>>(), present);
        assert_eq!(present, vec!["Brazil", "Egypt"]);
        assert_eq!(table.rows.iter().map(|r| r.count).sum::<usize>(), view.len());
    }

    #[test]
    fn group_means_are_rounded() {
        let records = vec![
            record(30, "A", "Male", 1.0),
            record(30, "A", "Male", 2.0),
            record(30, "A", "Male", 2.0),
            record(30, "B", "Male", 5.0),
        ];
        let table = StatsCalculator::group_means(&view_of(&records));

        assert_eq!(table.rows[0].country, "A");
        assert_eq!(table.rows[0].mean(Metric::CoffeeIntake), Some(1.67));
        let exact = table.rows[0].exact_mean(Metric::CoffeeIntake).unwrap();
        assert!((exact - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(table.rows[1].mean(Metric::HeartRate), Some(70.0));
        assert!(StatsCalculator::group_means(&FilteredView::default()).is_empty());
    }

    #[test]
    fn anova_with_one_country_is_insufficient() {
        let records: Vec<Record> = (0..20).map(|i| record(30, "Peru", "Male", i as f64)).collect();
        assert_eq!(
            StatsCalculator::one_way_anova(&view_of(&records)),
            AnovaOutcome::InsufficientGroups { groups: 1 }
        );
        assert_eq!(
            StatsCalculator::one_way_anova(&FilteredView::default()),
            AnovaOutcome::InsufficientGroups { groups: 0 }
        );
    }

    #[test]
    fn anova_identical_groups_is_not_significant() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 2.5, 3.5];
        match StatsCalculator::anova(&[values.clone(), values]) {
            AnovaOutcome::Computed(result) => {
                assert!(result.f_statistic.abs() < 1e-12);
                assert!((result.p_value - 1.0).abs() < 1e-9);
                assert!(!result.is_significant());
            }
            other => panic!("expected computed ANOVA, got {other:?}"),
        }
    }

    #[test]
    fn anova_separated_groups_is_significant() {
        let low = vec![1.0, 2.0, 1.5, 2.5, 1.8, 2.2];
        let high = vec![10.0, 11.0, 10.5, 11.5, 10.8, 11.2];
        match StatsCalculator::anova(&[low, high]) {
            AnovaOutcome::Computed(result) => {
                assert_eq!(result.df_between, 1);
                assert_eq!(result.df_within, 10);
                assert!(result.p_value < SIGNIFICANCE_THRESHOLD);
                assert!(result.is_significant());
            }
            other => panic!("expected computed ANOVA, got {other:?}"),
        }
    }

    #[test]
    fn anova_matches_reference_value() {
        // scipy.stats.f_oneway([1, 2, 3], [2, 3, 4], [5, 6, 7]) -> F = 13.0, p = 0.006592
        let outcome = StatsCalculator::anova(&[
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0],
        ]);
        match outcome {
            AnovaOutcome::Computed(result) => {
                assert!((result.f_statistic - 13.0).abs() < 1e-9);
                assert!((result.p_value - 0.006592).abs() < 1e-5);
            }
            other => panic!("expected computed ANOVA, got {other:?}"),
        }
    }

    #[test]
    fn anova_degenerate_inputs_are_explicit() {
        assert!(matches!(
            StatsCalculator::anova(&[vec![1.0], vec![2.0]]),
            AnovaOutcome::NotComputable { .. }
        ));
        assert!(matches!(
            StatsCalculator::anova(&[vec![3.0, 3.0], vec![3.0, 3.0]]),
            AnovaOutcome::NotComputable { .. }
        ));
        match StatsCalculator::anova(&[vec![1.0, 1.0], vec![4.0, 4.0]]) {
            AnovaOutcome::Computed(result) => {
                assert!(result.f_statistic.is_infinite());
                assert_eq!(result.p_value, 0.0);
            }
            other => panic!("expected computed ANOVA, got {other:?}"),
        }
    }

    #[test]
    fn anova_ignores_missing_intake() {
        let mut records = vec![
            record(30, "A", "Male", 1.0),
            record(30, "A", "Male", 2.0),
            record(30, "B", "Male", 5.0),
        ];
        records[2].coffee_intake = None;
        assert_eq!(
            StatsCalculator::one_way_anova(&view_of(&records)),
            AnovaOutcome::InsufficientGroups { groups: 1 }
        );
    }
}
