//! Control Panel Widget
//! Left side panel with the filter widgets and the export button.

use crate::data::{Dataset, FilterSpec, GenderFilter};
use egui::{Color32, RichText, ScrollArea};

/// Sidebar state: one widget per filter dimension.
pub struct ControlPanel {
    pub age_bounds: (i64, i64),
    pub age_min: i64,
    pub age_max: i64,
    /// Every country in first-appearance order, with its checkbox state.
    pub countries: Vec<(String, bool)>,
    pub gender: GenderFilter,
    pub show_regression: bool,
    pub status: String,
}

impl ControlPanel {
    /// Seed the widgets from the dataset and an initial selection.
    pub fn new(dataset: &Dataset, initial: &FilterSpec) -> Self {
        let age_bounds = dataset.age_bounds().unwrap_or((initial.age_min, initial.age_max));
        let countries = dataset
            .countries()
            .iter()
            .map(|c| (c.clone(), initial.countries.contains(c)))
            .collect();

        Self {
            age_bounds,
            age_min: initial.age_min,
            age_max: initial.age_max,
            countries,
            gender: initial.gender,
            show_regression: false,
            status: format!("Loaded {} rows", dataset.len()),
        }
    }

    /// The selection currently shown by the widgets.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            age_min: self.age_min,
            age_max: self.age_max,
            countries: self
                .countries
                .iter()
                .filter(|(_, selected)| *selected)
                .map(|(c, _)| c.clone())
                .collect(),
            gender: self.gender,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Keep `age_min <= age_max` after either slider moves.
    fn normalize_age(&mut self, moved_min: bool) {
        if self.age_min > self.age_max {
            if moved_min {
                self.age_max = self.age_min;
            } else {
                self.age_min = self.age_max;
            }
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("☕ Coffee & Health")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Data Explorer").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Age =====
        ui.label(RichText::new("Age Range").size(14.0).strong());
        ui.add_space(5.0);
        let (lo, hi) = self.age_bounds;
        let min_changed = ui
            .add(egui::Slider::new(&mut self.age_min, lo..=hi).text("from"))
            .changed();
        if min_changed {
            self.normalize_age(true);
        }
        let max_changed = ui
            .add(egui::Slider::new(&mut self.age_max, lo..=hi).text("to"))
            .changed();
        if max_changed {
            self.normalize_age(false);
        }
        if min_changed || max_changed {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Countries =====
        ui.label(RichText::new("Countries").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("countries")
                    .max_height(180.0)
                    .show(ui, |ui| {
                        for (country, selected) in &mut self.countries {
                            if ui.checkbox(selected, country.as_str()).changed() {
                                action = ControlPanelAction::FiltersChanged;
                            }
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.countries.iter_mut().for_each(|(_, s)| *s = true);
                action = ControlPanelAction::FiltersChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.countries.iter_mut().for_each(|(_, s)| *s = false);
                action = ControlPanelAction::FiltersChanged;
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Gender =====
        ui.label(RichText::new("Gender").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            for option in GenderFilter::OPTIONS {
                if ui.radio_value(&mut self.gender, option, option.label()).changed() {
                    action = ControlPanelAction::FiltersChanged;
                }
            }
        });

        ui.add_space(10.0);
        if ui
            .checkbox(&mut self.show_regression, "Show Regression Line")
            .changed()
        {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("📁 Export Charts").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportCharts;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FiltersChanged,
    ExportCharts,
}
