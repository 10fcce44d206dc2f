//! Dashboard Application
//! Main window wiring the region filter, selection state, and chart grid.
//! The whole pipeline re-runs every frame: region filter, then the primary
//! chart's selection gates which rows reach the three sink charts.

use egui::{RichText, SidePanel, TopBottomPanel};

use crate::data::{self, CountryRecord};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};

/// Main application window. The dataset is loaded once before the window
/// opens and stays immutable for the process lifetime.
pub struct DashboardApp {
    dataset: Vec<CountryRecord>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: Vec<CountryRecord>) -> Self {
        let regions = data::distinct_regions(&dataset);
        Self {
            dataset,
            control_panel: ControlPanel::new(regions),
            chart_viewer: ChartViewer::new(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let selection_count = self.chart_viewer.selection().count();

        // Top panel - title reflecting the selected region
        TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(format!(
                "🌍 {} Analysis & Interaction",
                self.control_panel.selected_region
            ));
            ui.label(
                RichText::new("Drag a box on the first chart to filter the others.").size(12.0),
            );
            ui.add_space(4.0);
        });

        // Left panel - dashboard settings
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                match self.control_panel.show(ui, selection_count) {
                    // Selection indices are positional within the region
                    // subset, so a region change invalidates them.
                    ControlPanelAction::RegionChanged | ControlPanelAction::ClearSelection => {
                        self.chart_viewer.clear_selection();
                    }
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - 2x2 linked chart grid
        egui::CentralPanel::default().show(ctx, |ui| {
            let region_subset =
                data::region_indices(&self.dataset, &self.control_panel.selected_region);
            self.chart_viewer.show(ui, &self.dataset, &region_subset);
        });
    }
}
