//! Chart Plotter Module
//! Draws chart descriptions in the window using egui_plot.

use super::description::{
    AnovaSummary, AnovaVerdict, BarChart, CorrelationTable, DataPreview, HistogramChart,
    MeansTable, Rgb, ScatterChart,
};
use super::presenter::coefficient_label;
use crate::data::Metric;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart as PlotBarChart, Legend, Line, Plot, PlotPoints, Points};

/// Series colours, one per gender
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

pub const REGRESSION_COLOR: Color32 = Color32::from_rgb(220, 20, 60);
const BAR_COLOR: Color32 = Color32::from_rgb(135, 206, 235); // Sky blue
const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(144, 238, 144); // Light green
const DENSITY_COLOR: Color32 = Color32::from_rgb(34, 139, 34);
const DENSITY_SAMPLES: usize = 200;

/// Draws dashboard descriptions with egui widgets.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn to_color32(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }

    fn no_data(ui: &mut egui::Ui, height: f32) {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(16.0).color(Color32::GRAY));
            });
        });
    }

    pub fn draw_preview(ui: &mut egui::Ui, preview: &DataPreview) {
        ui.label(
            RichText::new(format!("{} rows match the current filters", preview.total_rows))
                .size(11.0)
                .color(Color32::GRAY),
        );
        if preview.rows.is_empty() {
            Self::no_data(ui, 40.0);
            return;
        }

        egui::Grid::new("data_preview")
            .striped(true)
            .min_col_width(60.0)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                for column in &preview.columns {
                    ui.label(RichText::new(column).strong().size(11.0));
                }
                ui.end_row();

                for row in &preview.rows {
                    for cell in row {
                        ui.label(RichText::new(cell).size(11.0));
                    }
                    ui.end_row();
                }
            });
    }

    /// Scatter with one colour per gender and an optional regression line.
    pub fn draw_scatter(ui: &mut egui::Ui, chart: &ScatterChart, height: f32) {
        ui.label(RichText::new(&chart.title).size(14.0).strong());
        if chart.is_empty() {
            Self::no_data(ui, height);
            return;
        }

        Plot::new(format!("scatter_{}", chart.y_metric.column_name()))
            .height(height)
            .legend(Legend::default())
            .x_axis_label(chart.x_label.as_str())
            .y_axis_label(chart.y_label.as_str())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, series) in chart.series.iter().enumerate() {
                    let color = PALETTE[i % PALETTE.len()];
                    plot_ui.points(
                        Points::new(PlotPoints::from(series.points.clone()))
                            .radius(2.5)
                            .color(color.gamma_multiply(0.7))
                            .name(&series.label),
                    );
                }

                if let Some(fit) = &chart.regression {
                    plot_ui.line(
                        Line::new(PlotPoints::from(fit.endpoints().to_vec()))
                            .color(REGRESSION_COLOR)
                            .width(2.0)
                            .name("Regression"),
                    );
                }
            });
    }

    /// Correlation matrix with heat-coloured cells.
    pub fn draw_correlation_table(ui: &mut egui::Ui, table: &CorrelationTable) {
        egui::Grid::new("correlation_table")
            .min_col_width(90.0)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                ui.label("");
                for label in &table.labels {
                    ui.label(RichText::new(label).strong().size(11.0));
                }
                ui.end_row();

                for (label, row) in table.labels.iter().zip(&table.cells) {
                    ui.label(RichText::new(label).strong().size(11.0));
                    for cell in row {
                        egui::Frame::none()
                            .fill(Self::to_color32(cell.color))
                            .rounding(3.0)
                            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                            .show(ui, |ui| {
                                ui.label(
                                    RichText::new(coefficient_label(cell.coefficient))
                                        .size(12.0)
                                        .color(Color32::BLACK),
                                );
                            });
                    }
                    ui.end_row();
                }
            });
    }

    /// Vertical bars with category names on the x axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &BarChart, height: f32) {
        ui.label(RichText::new(&chart.title).size(14.0).strong());
        if chart.is_empty() {
            Self::no_data(ui, height);
            return;
        }

        let labels: Vec<String> = chart.bars.iter().map(|b| b.category.clone()).collect();
        let bars: Vec<Bar> = chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| Bar::new(i as f64, b.value).width(0.6).name(&b.category))
            .collect();

        Plot::new("coffee_by_country")
            .height(height)
            .y_axis_label(chart.y_label.as_str())
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < labels.len() {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(PlotBarChart::new(bars).color(BAR_COLOR));
            });
    }

    /// Histogram bars with the density curve on top.
    pub fn draw_histogram(ui: &mut egui::Ui, chart: &HistogramChart, height: f32) {
        ui.label(RichText::new(&chart.title).size(14.0).strong());
        if chart.is_empty() {
            Self::no_data(ui, height);
            return;
        }

        let bars: Vec<Bar> = chart
            .bin_counts()
            .iter()
            .map(|bin| {
                Bar::new(bin.midpoint(), bin.count as f64)
                    .width(bin.width())
                    .name(format!("{:.2}-{:.2}", bin.start, bin.end))
            })
            .collect();
        let density = chart.density_curve(DENSITY_SAMPLES);

        Plot::new("sleep_histogram")
            .height(height)
            .x_axis_label(chart.x_label.as_str())
            .y_axis_label(chart.y_label.as_str())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    PlotBarChart::new(bars)
                        .color(HISTOGRAM_COLOR)
                        .name("Count"),
                );
                if !density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from(density))
                            .color(DENSITY_COLOR)
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    pub fn draw_means_table(ui: &mut egui::Ui, table: &MeansTable) {
        if table.rows.is_empty() {
            Self::no_data(ui, 40.0);
            return;
        }

        egui::Grid::new("country_means")
            .striped(true)
            .min_col_width(80.0)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                for header in &table.headers {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for row in &table.rows {
                    ui.label(RichText::new(&row.country).size(11.0));
                    for metric in Metric::ALL {
                        ui.label(RichText::new(MeansTable::cell(row, metric)).size(11.0));
                    }
                    ui.end_row();
                }
            });
    }

    pub fn draw_anova(ui: &mut egui::Ui, summary: &AnovaSummary) {
        let color = match summary.verdict {
            AnovaVerdict::Significant => Color32::from_rgb(40, 167, 69),
            AnovaVerdict::NotSignificant => Color32::from_rgb(23, 162, 184),
            AnovaVerdict::InsufficientGroups => Color32::from_rgb(100, 149, 237),
            AnovaVerdict::NotComputable => Color32::from_rgb(220, 53, 69),
        };

        if let Some(headline) = &summary.headline {
            ui.label(RichText::new(headline).size(13.0).strong());
        }
        egui::Frame::none()
            .fill(color.gamma_multiply(0.15))
            .stroke(egui::Stroke::new(1.0, color))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&summary.message).size(12.0).color(color));
            });
    }
}
