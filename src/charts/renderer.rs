//! Static Chart Renderer
//! Exports the dashboard charts as PNG files (plotters) plus a JSON dump of all outputs.
//!
//! Files written:
//! - `coffee_vs_bmi.png`, `coffee_vs_heart_rate.png`, `coffee_vs_sleep_hours.png`
//! - `coffee_by_country.png`
//! - `sleep_hours_histogram.png`
//! - `correlation_heatmap.png`
//! - `dashboard_outputs.json`

use super::description::{BarChart, CorrelationTable, HistogramChart, Rgb, ScatterChart};
use super::presenter::coefficient_label;
use crate::pipeline::DashboardOutputs;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(52, 152, 219),
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(96, 125, 139),
];
const REGRESSION: RGBColor = RGBColor(220, 20, 60);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
const FOREST_GREEN: RGBColor = RGBColor(34, 139, 34);

/// Must differ from the settings file name in `config`.
pub const OUTPUTS_JSON_FILE: &str = "dashboard_outputs.json";

const FONT: &str = "sans-serif";
const DENSITY_SAMPLES: usize = 200;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to prepare export directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw chart {file}: {message}")]
    Draw { file: String, message: String },
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes chart descriptions to image files.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart into `dir`, returning the written paths.
    pub fn export_all(
        outputs: &DashboardOutputs,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        std::fs::create_dir_all(dir)?;
        let size = (width, height);
        let mut written = Vec::new();

        for chart in &outputs.scatter_charts {
            let path = dir.join(Self::scatter_file_name(chart));
            Self::render_scatter(chart, &path, size)?;
            written.push(path);
        }

        let path = dir.join("coffee_by_country.png");
        Self::render_bar_chart(&outputs.coffee_by_country, &path, size)?;
        written.push(path);

        let path = dir.join("sleep_hours_histogram.png");
        Self::render_histogram(&outputs.sleep_histogram, &path, size)?;
        written.push(path);

        let path = dir.join("correlation_heatmap.png");
        Self::render_heatmap(&outputs.correlation_table, &path, size)?;
        written.push(path);

        written.push(Self::write_json(outputs, dir)?);

        log::info!("Exported {} files to {}", written.len(), dir.display());
        Ok(written)
    }

    pub fn scatter_file_name(chart: &ScatterChart) -> String {
        format!(
            "coffee_vs_{}.png",
            chart.y_metric.column_name().to_ascii_lowercase()
        )
    }

    /// Serialize all outputs to [`OUTPUTS_JSON_FILE`].
    pub fn write_json(outputs: &DashboardOutputs, dir: &Path) -> Result<PathBuf, RenderError> {
        let path = dir.join(OUTPUTS_JSON_FILE);
        let json = serde_json::to_string_pretty(outputs)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    fn draw_err(path: &Path) -> impl Fn(String) -> RenderError + '_ {
        move |message| RenderError::Draw {
            file: path.display().to_string(),
            message,
        }
    }

    /// Pad a value range so points do not sit on the frame.
    fn padded(lo: f64, hi: f64) -> std::ops::Range<f64> {
        if lo == hi {
            return (lo - 1.0)..(hi + 1.0);
        }
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    }

    pub fn render_scatter(
        chart: &ScatterChart,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let err = Self::draw_err(path);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| err(e.to_string()))?;

        let ((x0, x1), (y0, y1)) = chart.bounds().unwrap_or(((0.0, 1.0), (0.0, 1.0)));
        let caption = if chart.is_empty() {
            format!("{} (no data)", chart.title)
        } else {
            chart.title.clone()
        };

        let mut ctx = ChartBuilder::on(&root)
            .caption(caption, (FONT, 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(Self::padded(x0, x1), Self::padded(y0, y1))
            .map_err(|e| err(e.to_string()))?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()
            .map_err(|e| err(e.to_string()))?;

        for (i, series) in chart.series.iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            ctx.draw_series(
                series
                    .points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 3, color.mix(0.7).filled())),
            )
            .map_err(|e| err(e.to_string()))?
            .label(series.label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }

        if let Some(fit) = &chart.regression {
            ctx.draw_series(LineSeries::new(
                fit.endpoints().into_iter().map(|p| (p[0], p[1])),
                REGRESSION.stroke_width(2),
            ))
            .map_err(|e| err(e.to_string()))?
            .label("Regression")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], REGRESSION.stroke_width(2)));
        }

        if !chart.is_empty() {
            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| err(e.to_string()))?;
        }

        root.present().map_err(|e| err(e.to_string()))?;
        Ok(())
    }

    pub fn render_bar_chart(
        chart: &BarChart,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let err = Self::draw_err(path);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| err(e.to_string()))?;

        let n = chart.bars.len().max(1);
        let y_max = chart.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let y_min = chart.bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
        let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title.as_str(), (FONT, 24))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_top)
            .map_err(|e| err(e.to_string()))?;

        let labels: Vec<&str> = chart.bars.iter().map(|b| b.category.as_str()).collect();
        let category_label = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].to_string()
            } else {
                String::new()
            }
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&category_label)
            .y_desc(chart.y_label.as_str())
            .draw()
            .map_err(|e| err(e.to_string()))?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, bar.value)], SKY_BLUE.filled())
        }))
        .map_err(|e| err(e.to_string()))?;

        root.present().map_err(|e| err(e.to_string()))?;
        Ok(())
    }

    pub fn render_histogram(
        chart: &HistogramChart,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let err = Self::draw_err(path);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| err(e.to_string()))?;

        let bins = chart.bin_counts();
        let (x0, x1) = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title.as_str(), (FONT, 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, 0.0..y_max * 1.1)
            .map_err(|e| err(e.to_string()))?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()
            .map_err(|e| err(e.to_string()))?;

        ctx.draw_series(bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], LIGHT_GREEN.filled())
        }))
        .map_err(|e| err(e.to_string()))?;
        ctx.draw_series(bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], BLACK.mix(0.4))
        }))
        .map_err(|e| err(e.to_string()))?;

        let density = chart.density_curve(DENSITY_SAMPLES);
        if !density.is_empty() {
            ctx.draw_series(LineSeries::new(
                density.into_iter().map(|p| (p[0], p[1])),
                FOREST_GREEN.stroke_width(2),
            ))
            .map_err(|e| err(e.to_string()))?;
        }

        root.present().map_err(|e| err(e.to_string()))?;
        Ok(())
    }

    /// Correlation matrix as a coloured grid with coefficients written in each cell.
    pub fn render_heatmap(
        table: &CorrelationTable,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let err = Self::draw_err(path);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| err(e.to_string()))?;

        let n = table.labels.len() as f64;
        // One label column on the left and one label row on top.
        let mut ctx = ChartBuilder::on(&root)
            .caption("Pearson Correlation", (FONT, 24))
            .margin(20)
            .build_cartesian_2d(-1.5..n, 0.0..n + 0.6)
            .map_err(|e| err(e.to_string()))?;

        let centered = TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
        let to_rgb = |c: Rgb| RGBColor(c.0, c.1, c.2);

        for (i, row) in table.cells.iter().enumerate() {
            let top = n - i as f64;
            ctx.draw_series(row.iter().enumerate().map(|(j, cell)| {
                let x = j as f64;
                Rectangle::new([(x, top - 1.0), (x + 1.0, top)], to_rgb(cell.color).filled())
            }))
            .map_err(|e| err(e.to_string()))?;

            ctx.draw_series(row.iter().enumerate().map(|(j, cell)| {
                Text::new(
                    coefficient_label(cell.coefficient),
                    (j as f64 + 0.5, top - 0.5),
                    centered.clone(),
                )
            }))
            .map_err(|e| err(e.to_string()))?;
        }

        ctx.draw_series(table.labels.iter().enumerate().map(|(i, label)| {
            Text::new(label.clone(), (-0.75, n - i as f64 - 0.5), centered.clone())
        }))
        .map_err(|e| err(e.to_string()))?;
        ctx.draw_series(table.labels.iter().enumerate().map(|(j, label)| {
            Text::new(label.clone(), (j as f64 + 0.5, n + 0.3), centered.clone())
        }))
        .map_err(|e| err(e.to_string()))?;

        root.present().map_err(|e| err(e.to_string()))?;
        Ok(())
    }
}
