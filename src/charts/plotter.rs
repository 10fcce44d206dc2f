//! Chart Plotter Module
//! Draws the three selection-sink charts with egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use super::builder::{BarEntry, Histogram, ScatterPoint};

/// Viridis-style gradient for the primary scatter.
pub const VIRIDIS: [Color32; 5] = [
    Color32::from_rgb(68, 1, 84),    // Dark purple
    Color32::from_rgb(59, 82, 139),  // Blue
    Color32::from_rgb(33, 145, 140), // Teal
    Color32::from_rgb(94, 201, 98),  // Green
    Color32::from_rgb(253, 231, 37), // Yellow
];

/// Reds gradient for the infant-mortality scatter.
pub const REDS: [Color32; 4] = [
    Color32::from_rgb(255, 224, 210),
    Color32::from_rgb(251, 136, 97),
    Color32::from_rgb(219, 54, 42),
    Color32::from_rgb(103, 0, 13),
];

/// Sunset gradient for the top-countries bars.
pub const SUNSET: [Color32; 4] = [
    Color32::from_rgb(252, 222, 156),
    Color32::from_rgb(240, 116, 110),
    Color32::from_rgb(190, 60, 130),
    Color32::from_rgb(108, 36, 130),
];

/// Fixed histogram fill (#636EFA).
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Sample a gradient at `t` in 0..1 by linear interpolation between stops.
pub fn sample_gradient(stops: &[Color32], t: f64) -> Color32 {
    debug_assert!(stops.len() >= 2);
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (stops.len() - 1) as f64;
    let idx = (scaled as usize).min(stops.len() - 2);
    let frac = scaled - idx as f64;

    let lerp = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * frac).round() as u8 };
    let (a, b) = (stops[idx], stops[idx + 1]);
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Draws the selection-sink charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Infant deaths vs life expectancy scatter. One Points element per
    /// country so each keeps its own size and gradient color.
    pub fn draw_infant_scatter(ui: &mut egui::Ui, points: &[ScatterPoint], height: f32) {
        Plot::new("infant_scatter")
            .height(height)
            .x_axis_label("Infant deaths (mean)")
            .y_axis_label("Life expectancy")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for p in points {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[p.x, p.y]]))
                            .radius(p.radius)
                            .color(sample_gradient(&REDS, p.t))
                            .name(&p.country),
                    );
                }
            });
    }

    /// Horizontal top-countries bar chart. Bar argument is the row position,
    /// formatted back to the country name on the y-axis.
    pub fn draw_top_countries(ui: &mut egui::Ui, entries: &[BarEntry], height: f32) {
        let names: Vec<String> = entries.iter().map(|e| e.country.clone()).collect();

        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                Bar::new(i as f64, e.life_expectancy)
                    .width(0.6)
                    .fill(sample_gradient(&SUNSET, e.t))
                    .name(&e.country)
            })
            .collect();

        Plot::new("top_countries_bar")
            .height(height)
            .x_axis_label("Life expectancy")
            .allow_scroll(false)
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= -0.5 && idx < names.len() {
                    names[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Life-expectancy histogram with a fixed fill color.
    pub fn draw_life_histogram(ui: &mut egui::Ui, hist: &Histogram, height: f32) {
        let bars: Vec<Bar> = hist
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(i, &count)| {
                Bar::new(hist.bin_center(i), count as f64)
                    .width(hist.bin_width * 0.9)
                    .fill(HISTOGRAM_COLOR)
            })
            .collect();

        Plot::new("life_histogram")
            .height(height)
            .x_axis_label("Life expectancy")
            .y_axis_label("Count")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints_match_stops() {
        assert_eq!(sample_gradient(&VIRIDIS, 0.0), VIRIDIS[0]);
        assert_eq!(sample_gradient(&VIRIDIS, 1.0), VIRIDIS[4]);
    }

    #[test]
    fn gradient_clamps_out_of_range() {
        assert_eq!(sample_gradient(&REDS, -1.0), REDS[0]);
        assert_eq!(sample_gradient(&REDS, 2.0), REDS[3]);
    }

    #[test]
    fn gradient_midpoint_interpolates() {
        let mid = sample_gradient(&[Color32::BLACK, Color32::WHITE], 0.5);
        assert_eq!(mid, Color32::from_rgb(128, 128, 128));
    }
}
