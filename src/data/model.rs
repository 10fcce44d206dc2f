//! Core Data Model
//! One joined record per country, produced by the loader pipeline.

use std::collections::BTreeSet;

/// A single country after joining the two source datasets.
///
/// `life_expectancy` and `infant_deaths` are arithmetic means over all
/// historical observations for that country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    /// Normalized join key (trimmed, lowercase).
    pub country: String,
    pub region: String,
    pub gdp_per_capita: f64,
    pub population_density: f64,
    pub life_expectancy: f64,
    pub infant_deaths: f64,
}

/// Sorted distinct region values, used to populate the region dropdown.
pub fn distinct_regions(records: &[CountryRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();
    set.into_iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, region: &str) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            region: region.to_string(),
            gdp_per_capita: 1000.0,
            population_density: 50.0,
            life_expectancy: 70.0,
            infant_deaths: 10.0,
        }
    }

    #[test]
    fn distinct_regions_sorted_and_deduped() {
        let records = vec![
            record("norway", "europe"),
            record("kenya", "africa"),
            record("france", "europe"),
        ];
        assert_eq!(distinct_regions(&records), vec!["africa", "europe"]);
    }

    #[test]
    fn distinct_regions_empty_dataset() {
        assert!(distinct_regions(&[]).is_empty());
    }
}
