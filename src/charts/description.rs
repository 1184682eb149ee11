//! Chart Descriptions
//! Renderer-agnostic shapes handed to the egui plotter and the PNG exporter.

use crate::data::Metric;
use crate::stats::{AnovaResult, Coefficient, CountryMeans, LinearFit};
use serde::Serialize;

/// Plain RGB triple so descriptions stay independent of any drawing crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const NEUTRAL_GREY: Rgb = Rgb(200, 200, 200);

// Coolwarm anchors: blue at -1, light grey at 0, red at +1
const COOL: Rgb = Rgb(59, 76, 192);
const MID: Rgb = Rgb(221, 221, 221);
const WARM: Rgb = Rgb(180, 4, 38);

/// Diverging colour for a coefficient in [-1, 1].
pub fn heat_color(value: f64) -> Rgb {
    let t = value.clamp(-1.0, 1.0);
    if t < 0.0 {
        lerp(MID, COOL, -t)
    } else {
        lerp(MID, WARM, t)
    }
}

fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// First rows of the filtered data, as display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Coffee intake against one health metric, one series per gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_metric: Metric,
    pub series: Vec<ScatterSeries>,
    pub regression: Option<LinearFit>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// (x range, y range) over every point, `None` when empty.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let init = ((first[0], first[0]), (first[1], first[1]));
        Some(points.fold(init, |((x0, x1), (y0, y1)), p| {
            ((x0.min(p[0]), x1.max(p[0])), (y0.min(p[1]), y1.max(p[1])))
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatCell {
    pub coefficient: Coefficient,
    pub color: Rgb,
}

/// Correlation matrix coloured by coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationTable {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<HeatCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    pub category: String,
    pub value: f64,
}

/// Bars sorted ascending by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<CategoryBar>,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub values: Vec<f64>,
    pub bins: usize,
    pub density_overlay: bool,
}

impl HistogramChart {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Equal-width bins over [min, max]; the last bin includes max.
    pub fn bin_counts(&self) -> Vec<HistogramBin> {
        let Some((mut lo, mut hi)) = self.range() else {
            return Vec::new();
        };
        if self.bins == 0 {
            return Vec::new();
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / self.bins as f64;
        let mut counts = vec![0usize; self.bins];
        for v in &self.values {
            let idx = (((v - lo) / width).floor() as usize).min(self.bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == self.bins {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }

    /// Gaussian KDE (Scott's bandwidth) scaled to histogram counts.
    pub fn density_curve(&self, samples: usize) -> Vec<[f64; 2]> {
        let n = self.values.len();
        let Some((lo, hi)) = self.range() else {
            return Vec::new();
        };
        if !self.density_overlay || n < 2 || lo == hi || samples < 2 || self.bins == 0 {
            return Vec::new();
        }

        let mean = self.values.iter().sum::<f64>() / n as f64;
        let variance =
            self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);
        let bin_width = (hi - lo) / self.bins as f64;
        let norm = n as f64 * bin_width / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

        (0..samples)
            .map(|i| {
                let x = lo + (hi - lo) * i as f64 / (samples - 1) as f64;
                let sum: f64 = self
                    .values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum();
                [x, sum * norm]
            })
            .collect()
    }

    fn range(&self) -> Option<(f64, f64)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }
}

/// Per-country means shaped for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeansTable {
    pub headers: Vec<String>,
    pub rows: Vec<CountryMeans>,
}

impl MeansTable {
    pub fn cell(row: &CountryMeans, metric: Metric) -> String {
        row.mean(metric)
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnovaVerdict {
    Significant,
    NotSignificant,
    InsufficientGroups,
    NotComputable,
}

/// Text summary of the ANOVA outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaSummary {
    pub verdict: AnovaVerdict,
    /// "ANOVA test result: F = .., p = .." when a statistic exists.
    pub headline: Option<String>,
    pub message: String,
    pub result: Option<AnovaResult>,
}

impl AnovaSummary {
    pub fn text(&self) -> String {
        match &self.headline {
            Some(headline) => format!("{headline}\n{}", self.message),
            None => self.message.clone(),
        }
    }
}
