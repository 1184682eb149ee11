use coffee_health_explorer::charts::AnovaVerdict;
use coffee_health_explorer::data::FilterSpec;
use coffee_health_explorer::stats::AnovaOutcome;
use coffee_health_explorer::{recompute, DashboardConfig, DataLoader, Dataset, GenderFilter, Metric};
use std::io::Write;

const SURVEY: &str = "\
ID,Age,Gender,Country,Coffee_Intake,BMI,Heart_Rate,Sleep_Hours
1,25,Male,Brazil,1,22,70,8
2,30,female,Brazil,2,23,72,7.5
3,35,MALE,Brazil,3,24,74,7
4,28,Female,Canada,2,23,71,7.6
5,40,Male,Canada,3,24,73,7.1
6,45,Female,Canada,4,25,76,6.8
7,22,Male,Egypt,5,26,78,6.4
8,33,Female,Egypt,6,27,80,6
9,48,Male,Egypt,7,28,82,5.6
10,60,Male,Japan,9,30,90,5
11,19,Female,Brazil,8,29,85,5
";

fn load_survey() -> Dataset {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(SURVEY.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    DataLoader::load_csv(file.path()).expect("load survey")
}

fn default_spec(ds: &Dataset) -> FilterSpec {
    FilterSpec::from_defaults(ds, &DashboardConfig::default())
}

#[test]
fn defaults_select_first_three_countries_and_age_window() {
    let ds = load_survey();
    let spec = default_spec(&ds);

    assert_eq!((spec.age_min, spec.age_max), (20, 50));
    assert_eq!(
        spec.countries.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Brazil", "Canada", "Egypt"]
    );
    assert_eq!(spec.gender, GenderFilter::All);
}

#[test]
fn filtered_rows_match_every_predicate() {
    let ds = load_survey();
    let spec = default_spec(&ds);
    let view = spec.apply(&ds);

    assert_eq!(view.len(), 9);
    assert!(view.iter().all(|r| (20..=50).contains(&r.age) && r.country != "Japan"));

    let expected = ds.records().iter().filter(|r| spec.matches(r)).count();
    assert_eq!(recompute(&ds, &spec, false).row_count, expected);
}

#[test]
fn gender_selection_ignores_case() {
    let ds = load_survey();
    let mut spec = default_spec(&ds);

    spec.gender = GenderFilter::Male;
    assert_eq!(spec.apply(&ds).len(), 5);

    spec.gender = GenderFilter::Female;
    assert_eq!(spec.apply(&ds).len(), 4);
}

#[test]
fn recompute_twice_gives_identical_outputs() {
    let ds = load_survey();
    let spec = default_spec(&ds);

    assert_eq!(recompute(&ds, &spec, true), recompute(&ds, &spec, true));
}

#[test]
fn country_comparison_outputs() {
    let ds = load_survey();
    let out = recompute(&ds, &default_spec(&ds), false);

    let bars: Vec<(&str, f64)> = out
        .coffee_by_country
        .bars
        .iter()
        .map(|b| (b.category.as_str(), b.value))
        .collect();
    assert_eq!(bars, vec![("Brazil", 2.0), ("Canada", 3.0), ("Egypt", 6.0)]);

    let rows = &out.country_means.rows;
    assert_eq!(rows.len(), 3);
    let egypt = rows.iter().find(|r| r.country == "Egypt").expect("egypt row");
    assert_eq!(egypt.mean(Metric::HeartRate), Some(80.0));
    assert_eq!(egypt.mean(Metric::SleepHours), Some(6.0));

    assert_eq!(out.sleep_histogram.bin_counts().iter().map(|b| b.count).sum::<usize>(), 9);
}

#[test]
fn anova_flags_significant_difference() {
    let ds = load_survey();
    let out = recompute(&ds, &default_spec(&ds), false);

    match out.statistics.anova {
        AnovaOutcome::Computed(result) => {
            assert!((result.f_statistic - 13.0).abs() < 1e-9);
            assert!((result.p_value - 0.006592).abs() < 1e-5);
            assert!(result.is_significant());
        }
        other => panic!("expected computed ANOVA, got {other:?}"),
    }
    assert_eq!(out.anova.verdict, AnovaVerdict::Significant);
    assert_eq!(
        out.anova.headline.as_deref(),
        Some("ANOVA test result: F = 13.00, p = 0.0066")
    );
}

#[test]
fn single_country_reports_insufficient_groups() {
    let ds = load_survey();
    let mut spec = default_spec(&ds);
    spec.countries = ["Canada".to_string()].into_iter().collect();

    let out = recompute(&ds, &spec, false);
    assert_eq!(out.row_count, 3);
    assert_eq!(out.anova.verdict, AnovaVerdict::InsufficientGroups);
    assert_eq!(
        out.anova.message,
        "Select at least 2 countries to perform group comparison."
    );
}

#[test]
fn coffee_correlates_with_health_metrics() {
    let ds = load_survey();
    let out = recompute(&ds, &default_spec(&ds), true);
    let matrix = &out.statistics.correlation;

    let sleep = matrix
        .get(Metric::CoffeeIntake, Metric::SleepHours)
        .value()
        .expect("computable");
    let heart = matrix
        .get(Metric::CoffeeIntake, Metric::HeartRate)
        .value()
        .expect("computable");
    assert!(sleep < -0.9);
    assert!(heart > 0.9);
    assert_eq!(matrix.get(Metric::Bmi, Metric::Bmi).value(), Some(1.0));
    assert_eq!(
        matrix.get(Metric::Bmi, Metric::SleepHours),
        matrix.get(Metric::SleepHours, Metric::Bmi)
    );

    assert_eq!(out.correlation_notes.len(), 3);
    assert!(out.scatter_charts.iter().all(|c| c.regression.is_some()));
}
