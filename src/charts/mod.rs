//! Charts module - Chart data builders and egui_plot rendering

mod builder;
mod plotter;

pub use builder::{
    gdp_scatter, infant_scatter, life_histogram, top_countries, BarEntry, Histogram,
    ScatterPoint, HISTOGRAM_BINS, TOP_N,
};
pub use plotter::{sample_gradient, ChartPlotter, VIRIDIS};
