//! Coffee & Health Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{Dataset, FilterSpec};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{recompute_with_preview, DashboardOutputs};
use egui::SidePanel;

/// Main application window. Owns the dataset for the whole session.
pub struct DashboardApp {
    dataset: Dataset,
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    outputs: DashboardOutputs,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: Dataset, config: DashboardConfig) -> Self {
        let initial = FilterSpec::from_defaults(&dataset, &config);
        let control_panel = ControlPanel::new(&dataset, &initial);
        let outputs = recompute_with_preview(
            &dataset,
            &initial,
            control_panel.show_regression,
            config.preview_rows,
        );

        Self {
            dataset,
            config,
            control_panel,
            chart_viewer: ChartViewer::new(),
            outputs,
        }
    }

    /// Rebuild the filter from the widgets and rerun the pipeline.
    fn refresh(&mut self) {
        let spec = self.control_panel.filter_spec();
        self.outputs = recompute_with_preview(
            &self.dataset,
            &spec,
            self.control_panel.show_regression,
            self.config.preview_rows,
        );
        self.control_panel
            .set_status(format!("{} rows selected", self.outputs.row_count));
    }

    /// Handle chart export - pick a folder, write PNGs + JSON, reveal the folder
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export charts to folder")
            .pick_folder()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_all(
            &self.outputs,
            &dir,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(files) => {
                self.control_panel
                    .set_status(format!("Exported {} files", files.len()));
                if let Err(e) = open::that(&dir) {
                    log::warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::FiltersChanged => self.refresh(),
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.outputs);
        });
    }
}
