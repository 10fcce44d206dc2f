//! Control Panel Widget
//! Left side panel with the region filter and selection status.

use egui::{Color32, ComboBox, RichText};

/// Left side panel: region dropdown plus linked-selection status.
pub struct ControlPanel {
    pub selected_region: String,
    regions: Vec<String>,
}

impl ControlPanel {
    pub fn new(regions: Vec<String>) -> Self {
        let selected_region = regions.first().cloned().unwrap_or_default();
        Self {
            selected_region,
            regions,
        }
    }

    /// Draw the panel. `selection_count` is the number of brushed countries
    /// when a selection is active.
    pub fn show(&mut self, ui: &mut egui::Ui, selection_count: Option<usize>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Global Health Analytics")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Region Filter Section =====
        ui.label(RichText::new("⚙️ Dashboard Settings").size(14.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Region:");
            ComboBox::from_id_salt("region")
                .width(180.0)
                .selected_text(&self.selected_region)
                .show_ui(ui, |ui| {
                    for region in &self.regions {
                        if ui
                            .selectable_label(self.selected_region == *region, region)
                            .clicked()
                            && self.selected_region != *region
                        {
                            self.selected_region = region.clone();
                            action = ControlPanelAction::RegionChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Brushing & Linking Section =====
        ui.label(RichText::new("🔗 Brushing & Linking").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(
                        "💡 Drag a box on the 'GDP vs Life Expectancy' chart \
                         to filter the other charts.",
                    )
                    .size(12.0),
                );
            });

        ui.add_space(8.0);

        match selection_count {
            Some(count) => {
                ui.label(
                    RichText::new(format!(
                        "Linked view: showing {} selected countries",
                        count
                    ))
                    .size(12.0)
                    .color(Color32::from_rgb(40, 167, 69)),
                );
            }
            None => {
                ui.label(
                    RichText::new("No selection - showing the whole region")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            }
        }

        ui.add_space(8.0);

        ui.add_enabled_ui(selection_count.is_some(), |ui| {
            if ui.button("✖ Clear Selection").clicked() {
                action = ControlPanelAction::ClearSelection;
            }
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    RegionChanged,
    ClearSelection,
}
