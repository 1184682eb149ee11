//! Charts module - chart descriptions, egui plotting and static PNG export

mod description;
mod plotter;
mod presenter;
mod renderer;

pub use description::{
    heat_color, AnovaSummary, AnovaVerdict, BarChart, CategoryBar, CorrelationTable, DataPreview,
    HeatCell, HistogramBin, HistogramChart, MeansTable, Rgb, ScatterChart, ScatterSeries,
    NEUTRAL_GREY,
};
pub use plotter::ChartPlotter;
pub use presenter::{coefficient_label, DashboardPresenter, HISTOGRAM_BINS, SCATTER_TARGETS};
pub use renderer::{RenderError, StaticChartRenderer};
