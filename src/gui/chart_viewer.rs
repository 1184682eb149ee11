//! Chart Viewer Widget
//! Central scrollable panel showing the dashboard outputs section by section.

use crate::charts::ChartPlotter;
use crate::pipeline::DashboardOutputs;
use egui::{Color32, RichText, ScrollArea};

const SCATTER_HEIGHT: f32 = 280.0;
const CHART_HEIGHT: f32 = 320.0;
const SECTION_SPACING: f32 = 15.0;

const INTRO: &str = "Explore the relationship between coffee consumption and health metrics. \
                     Use the sidebar filters to interact with the dataset.";
const QUESTION_A: &str =
    "Question: Is coffee intake (cups/week) related to BMI, heart rate, or sleep hours?";
const QUESTION_B: &str =
    "Question: Do different countries or age groups show different coffee habits and health results?";

/// Closing notes shown under the ANOVA result.
pub const SUMMARY_OF_FINDINGS: [&str; 4] = [
    "Higher coffee intake shows moderate correlation with BMI and Heart Rate.",
    "Sleep Hours tend to decrease slightly with higher coffee intake.",
    "No significant cross-country differences exist in coffee consumption (see ANOVA test).",
    "These findings vary by age, gender, and countries.",
];

/// Read-only view over the latest `DashboardOutputs`.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    fn section_header(ui: &mut egui::Ui, title: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(
            RichText::new(title)
                .size(18.0)
                .strong()
                .color(Color32::from_rgb(100, 149, 237)),
        );
        ui.separator();
    }

    /// Draw the viewer
    pub fn show(&mut self, ui: &mut egui::Ui, outputs: &DashboardOutputs) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new("☕ Global Coffee & Health Data Explorer")
                        .size(24.0)
                        .strong(),
                );
                ui.label(RichText::new(INTRO).size(13.0).color(Color32::GRAY));

                Self::section_header(ui, "Filtered Data Preview");
                ChartPlotter::draw_preview(ui, &outputs.preview);

                Self::section_header(ui, "Problem A: Coffee Consumption vs. Health Metrics");
                ui.label(RichText::new(QUESTION_A).size(12.0).italics());
                Self::draw_scatter_row(ui, outputs);

                ui.add_space(10.0);
                ui.label(RichText::new("Pearson Correlation").size(14.0).strong());
                ChartPlotter::draw_correlation_table(ui, &outputs.correlation_table);

                ui.add_space(10.0);
                ui.label(RichText::new("Interpretation").size(14.0).strong());
                for note in &outputs.correlation_notes {
                    ui.label(RichText::new(format!("• {note}")).size(12.0));
                }

                Self::section_header(ui, "Problem B: Group Differences by Country or Age");
                ui.label(RichText::new(QUESTION_B).size(12.0).italics());
                ui.columns(2, |cols| {
                    ChartPlotter::draw_bar_chart(&mut cols[0], &outputs.coffee_by_country, CHART_HEIGHT);
                    ChartPlotter::draw_histogram(&mut cols[1], &outputs.sleep_histogram, CHART_HEIGHT);
                });

                ui.add_space(10.0);
                ui.label(RichText::new("Summary Statistics by Country").size(14.0).strong());
                ChartPlotter::draw_means_table(ui, &outputs.country_means);

                ui.add_space(10.0);
                ui.label(RichText::new("ANOVA: Coffee Intake by Country").size(14.0).strong());
                ChartPlotter::draw_anova(ui, &outputs.anova);

                Self::section_header(ui, "Summary of Findings");
                for (i, finding) in SUMMARY_OF_FINDINGS.iter().enumerate() {
                    ui.label(RichText::new(format!("{}. {finding}", i + 1)).size(12.0));
                }
                ui.add_space(SECTION_SPACING);
            });
    }

    /// The three scatters side by side.
    fn draw_scatter_row(ui: &mut egui::Ui, outputs: &DashboardOutputs) {
        let count = outputs.scatter_charts.len().max(1);
        ui.columns(count, |cols| {
            for (col, chart) in cols.iter_mut().zip(&outputs.scatter_charts) {
                ChartPlotter::draw_scatter(col, chart, SCATTER_HEIGHT);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, FilterSpec, GenderFilter};
    use crate::pipeline::recompute;
    use crate::test_support::record;

    fn outputs(countries: &[&str]) -> DashboardOutputs {
        let ds = Dataset::from_records(vec![
            record(30, "Peru", "Male", 1.0),
            record(31, "Peru", "Female", 2.0),
            record(32, "Chad", "Male", 6.0),
            record(33, "Chad", "Female", 7.0),
        ]);
        let spec = FilterSpec {
            age_min: 0,
            age_max: 100,
            countries: countries.iter().map(|c| c.to_string()).collect(),
            gender: GenderFilter::All,
        };
        recompute(&ds, &spec, true)
    }

    fn draw(outputs: &DashboardOutputs) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ChartViewer::new().show(ui, outputs);
            });
        });
    }

    #[test]
    fn draws_full_and_empty_selections() {
        draw(&outputs(&["Peru", "Chad"]));
        draw(&outputs(&[]));
    }

    #[test]
    fn summary_lists_four_findings() {
        assert_eq!(SUMMARY_OF_FINDINGS.len(), 4);
        assert!(SUMMARY_OF_FINDINGS[3].starts_with("These findings vary"));
    }
}
