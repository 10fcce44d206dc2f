//! Chart Builder Module
//! Pure transforms from a row subset to chart data. No egui types here so
//! every visual mapping stays unit-testable.

use crate::data::CountryRecord;

/// Bar chart shows at most this many countries.
pub const TOP_N: usize = 10;

/// Bin count for the life-expectancy histogram.
pub const HISTOGRAM_BINS: usize = 15;

/// One scatter point with its visual channels resolved.
/// `t` is the normalized color position (0..1) on the chart's gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    pub t: f64,
    pub country: String,
}

/// One horizontal bar in the top-countries chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub country: String,
    pub life_expectancy: f64,
    pub t: f64,
}

/// Binned life-expectancy distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<usize>,
    pub min: f64,
    pub bin_width: f64,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        self.min + (bin as f64 + 0.5) * self.bin_width
    }
}

/// Scale values into 0..1 over their own range; a degenerate range maps
/// everything to 0.5.
fn unit_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|&v| {
            if range.abs() < f64::EPSILON {
                0.5
            } else {
                (v - min) / range
            }
        })
        .collect()
}

fn point_radius(t: f64) -> f32 {
    (2.0 + t * 6.0) as f32
}

/// Primary scatter: GDP per capita (log10 axis) vs life expectancy,
/// point size and color both driven by life expectancy.
///
/// Point order matches `rows` exactly - the box-select hit test relies on
/// position i here being position i in the region subset.
pub fn gdp_scatter(dataset: &[CountryRecord], rows: &[usize]) -> Vec<ScatterPoint> {
    let life: Vec<f64> = rows.iter().map(|&i| dataset[i].life_expectancy).collect();
    let t = unit_scale(&life);

    rows.iter()
        .zip(t)
        .map(|(&i, t)| {
            let r = &dataset[i];
            ScatterPoint {
                x: r.gdp_per_capita.max(f64::MIN_POSITIVE).log10(),
                y: r.life_expectancy,
                radius: point_radius(t),
                t,
                country: r.country.clone(),
            }
        })
        .collect()
}

/// Secondary scatter: infant deaths vs life expectancy, point size from
/// population density, color from infant deaths.
pub fn infant_scatter(dataset: &[CountryRecord], rows: &[usize]) -> Vec<ScatterPoint> {
    let density: Vec<f64> = rows.iter().map(|&i| dataset[i].population_density).collect();
    let infant: Vec<f64> = rows.iter().map(|&i| dataset[i].infant_deaths).collect();
    let size_t = unit_scale(&density);
    let color_t = unit_scale(&infant);

    rows.iter()
        .zip(size_t.iter().zip(color_t))
        .map(|(&i, (&s, t))| {
            let r = &dataset[i];
            ScatterPoint {
                x: r.infant_deaths,
                y: r.life_expectancy,
                radius: point_radius(s),
                t,
                country: r.country.clone(),
            }
        })
        .collect()
}

/// Top `n` countries by life expectancy, ordered ascending for display
/// (lowest bar at the bottom of the chart).
pub fn top_countries(dataset: &[CountryRecord], rows: &[usize], n: usize) -> Vec<BarEntry> {
    let mut picked: Vec<&CountryRecord> = rows.iter().map(|&i| &dataset[i]).collect();
    picked.sort_by(|a, b| {
        b.life_expectancy
            .partial_cmp(&a.life_expectancy)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    picked.truncate(n);
    picked.reverse();

    let life: Vec<f64> = picked.iter().map(|r| r.life_expectancy).collect();
    let t = unit_scale(&life);

    picked
        .into_iter()
        .zip(t)
        .map(|(r, t)| BarEntry {
            country: r.country.clone(),
            life_expectancy: r.life_expectancy,
            t,
        })
        .collect()
}

/// Life-expectancy distribution over `bins` equal-width bins spanning the
/// subset's own min..max range.
pub fn life_histogram(dataset: &[CountryRecord], rows: &[usize], bins: usize) -> Histogram {
    if rows.is_empty() || bins == 0 {
        return Histogram {
            counts: Vec::new(),
            min: 0.0,
            bin_width: 1.0,
        };
    }

    let values: Vec<f64> = rows.iter().map(|&i| dataset[i].life_expectancy).collect();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let bin_width = if range.abs() < f64::EPSILON {
        1.0
    } else {
        range / bins as f64
    };

    let mut counts = vec![0usize; bins];
    for v in values {
        let bin = (((v - min) / bin_width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Histogram {
        counts,
        min,
        bin_width,
    }
}
