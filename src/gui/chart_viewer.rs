//! Chart Viewer Widget
//! Central 2x2 grid of linked charts. The primary scatter is the selection
//! source; the other three charts render the effective (selection-filtered)
//! subset and update on every interaction.

use egui::{Color32, PointerButton, RichText};
use egui_plot::{Plot, PlotPoints, Points, Polygon};

use crate::charts::{self, sample_gradient, ChartPlotter, ScatterPoint, VIRIDIS};
use crate::data::{CountryRecord, Selection};

const CHART_SPACING: f32 = 10.0;
const TITLE_HEIGHT: f32 = 26.0;
const SELECT_STROKE: Color32 = Color32::from_rgb(80, 120, 200);

/// 2x2 grid of linked charts with a box-select gesture on the primary
/// scatter. Owns the selection state and the in-progress drag rectangle.
pub struct ChartViewer {
    selection: Selection,
    drag_origin: Option<[f64; 2]>,
    drag_current: Option<[f64; 2]>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            drag_origin: None,
            drag_current: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Drop the selection. Called on region change: the stored positions are
    /// offsets into the old region subset and would silently pick the wrong
    /// countries under a new one.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.drag_origin = None;
        self.drag_current = None;
    }

    /// Draw all four charts for the current region subset.
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: &[CountryRecord], region_subset: &[usize]) {
        let effective = self.selection.apply(region_subset);

        let avail = ui.available_size();
        let chart_height =
            (avail.y / 2.0 - TITLE_HEIGHT - CHART_SPACING * 2.0).max(160.0);

        // Row 1: selection source + infant mortality sink
        ui.columns(2, |cols| {
            cols[0].label(
                RichText::new("1. GDP vs Life Expectancy (drag to select)")
                    .size(14.0)
                    .strong(),
            );
            let points = charts::gdp_scatter(dataset, region_subset);
            self.primary_scatter(&mut cols[0], &points, chart_height);

            cols[1].label(
                RichText::new("2. Infant Mortality (updates with selection)")
                    .size(14.0)
                    .strong(),
            );
            let points = charts::infant_scatter(dataset, &effective);
            ChartPlotter::draw_infant_scatter(&mut cols[1], &points, chart_height);
        });

        ui.add_space(CHART_SPACING);

        // Row 2: top-N bars + histogram sinks
        ui.columns(2, |cols| {
            cols[0].label(
                RichText::new("3. Top Countries by Life Expectancy")
                    .size(14.0)
                    .strong(),
            );
            if effective.is_empty() {
                cols[0].add_space(chart_height / 2.0 - 10.0);
                cols[0].vertical_centered(|ui| {
                    ui.label(
                        RichText::new("⚠ No data selected.")
                            .size(15.0)
                            .color(Color32::from_rgb(255, 193, 7)),
                    );
                });
            } else {
                let bars = charts::top_countries(dataset, &effective, charts::TOP_N);
                ChartPlotter::draw_top_countries(&mut cols[0], &bars, chart_height);
            }

            cols[1].label(
                RichText::new("4. Life Expectancy Distribution")
                    .size(14.0)
                    .strong(),
            );
            let hist = charts::life_histogram(dataset, &effective, charts::HISTOGRAM_BINS);
            ChartPlotter::draw_life_histogram(&mut cols[1], &hist, chart_height);
        });
    }

    /// Primary scatter with box selection. Plot drag is disabled so the
    /// primary-button drag is free to draw the selection rectangle; points
    /// inside the rectangle on release become the new selection.
    fn primary_scatter(&mut self, ui: &mut egui::Ui, points: &[ScatterPoint], height: f32) {
        let selected = self.selection.positions().map(|p| p.to_vec());

        Plot::new("gdp_scatter")
            .height(height)
            .x_axis_label("GDP per capita ($, log scale)")
            .y_axis_label("Life expectancy")
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                let value = 10f64.powf(mark.value);
                if value >= 10_000.0 {
                    format!("{:.0}k", value / 1000.0)
                } else {
                    format!("{:.0}", value)
                }
            })
            .show(ui, |plot_ui| {
                for (pos, p) in points.iter().enumerate() {
                    let mut color = sample_gradient(&VIRIDIS, p.t);
                    if let Some(sel) = &selected {
                        if !sel.contains(&pos) {
                            color = color.gamma_multiply(0.25);
                        }
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[p.x, p.y]]))
                            .radius(p.radius)
                            .color(color)
                            .name(&p.country),
                    );
                }

                // In-progress selection rectangle
                if let (Some(o), Some(c)) = (self.drag_origin, self.drag_current) {
                    let rect = PlotPoints::from(vec![
                        [o[0], o[1]],
                        [c[0], o[1]],
                        [c[0], c[1]],
                        [o[0], c[1]],
                    ]);
                    plot_ui.polygon(
                        Polygon::new(rect)
                            .fill_color(SELECT_STROKE.gamma_multiply(0.15))
                            .stroke(egui::Stroke::new(1.5, SELECT_STROKE)),
                    );
                }

                let response = plot_ui.response().clone();
                let pointer = plot_ui.pointer_coordinate();

                if response.drag_started_by(PointerButton::Primary) {
                    self.drag_origin = pointer.map(|p| [p.x, p.y]);
                    self.drag_current = self.drag_origin;
                } else if response.dragged_by(PointerButton::Primary) {
                    if let Some(p) = pointer {
                        self.drag_current = Some([p.x, p.y]);
                    }
                } else if response.drag_stopped_by(PointerButton::Primary) {
                    if let (Some(o), Some(c)) = (self.drag_origin, self.drag_current) {
                        self.selection.set(points_in_rect(points, o, c));
                    }
                    self.drag_origin = None;
                    self.drag_current = None;
                }
            });
    }
}

/// Positions of points inside the rectangle spanned by two corners.
/// An empty hit set means "nothing selected" and clears the filter.
fn points_in_rect(points: &[ScatterPoint], a: [f64; 2], b: [f64; 2]) -> Vec<usize> {
    let (x_min, x_max) = (a[0].min(b[0]), a[0].max(b[0]));
    let (y_min, y_max) = (a[1].min(b[1]), a[1].max(b[1]));

    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.x >= x_min && p.x <= x_max && p.y >= y_min && p.y <= y_max)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> ScatterPoint {
        ScatterPoint {
            x,
            y,
            radius: 3.0,
            t: 0.5,
            country: "test".to_string(),
        }
    }

    #[test]
    fn rect_hit_test_is_corner_order_independent() {
        let pts = vec![point(1.0, 1.0), point(5.0, 5.0), point(3.0, 3.0)];
        let hits = points_in_rect(&pts, [4.0, 4.0], [2.0, 2.0]);
        assert_eq!(hits, vec![2]);
        let hits = points_in_rect(&pts, [2.0, 4.0], [4.0, 2.0]);
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn rect_includes_boundary_points() {
        let pts = vec![point(2.0, 2.0)];
        assert_eq!(points_in_rect(&pts, [2.0, 2.0], [4.0, 4.0]), vec![0]);
    }

    #[test]
    fn empty_rect_selects_nothing() {
        let pts = vec![point(1.0, 1.0)];
        assert!(points_in_rect(&pts, [5.0, 5.0], [6.0, 6.0]).is_empty());
    }
}
