//! Region Filter & Selection Linking Module
//! Narrows the joined dataset to one region and applies the brushing
//! selection emitted by the primary chart.

use super::model::CountryRecord;

/// Indices (into the full dataset) of rows matching `region`, in dataset
/// order. An empty result is a valid state, not an error.
pub fn region_indices(records: &[CountryRecord], region: &str) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.region == region)
        .map(|(i, _)| i)
        .collect()
}

/// Point selection made on the primary chart.
///
/// Indices are *positions within the current region subset*, not rows of the
/// base dataset. They are only meaningful against the subset they were made
/// on, so the app clears the selection whenever the region changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Option<Vec<usize>>,
}

impl Selection {
    /// Replace the selection. An empty index list means "nothing selected"
    /// and is treated as no filter at all.
    pub fn set(&mut self, positions: Vec<usize>) {
        self.indices = if positions.is_empty() {
            None
        } else {
            Some(positions)
        };
    }

    pub fn clear(&mut self) {
        self.indices = None;
    }

    pub fn is_active(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of selected points, if a selection is active.
    pub fn count(&self) -> Option<usize> {
        self.indices.as_ref().map(|v| v.len())
    }

    /// Selected positions within the region subset, when active.
    pub fn positions(&self) -> Option<&[usize]> {
        self.indices.as_deref()
    }

    /// Resolve the selection against a region subset: map subset positions
    /// back to base-dataset indices. With no active selection the subset
    /// passes through unchanged. Positions past the end of the subset are
    /// ignored.
    pub fn apply(&self, subset: &[usize]) -> Vec<usize> {
        match &self.indices {
            Some(positions) => positions
                .iter()
                .filter_map(|&p| subset.get(p).copied())
                .collect(),
            None => subset.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::distinct_regions;

    fn dataset() -> Vec<CountryRecord> {
        let mk = |country: &str, region: &str, life: f64| CountryRecord {
            country: country.to_string(),
            region: region.to_string(),
            gdp_per_capita: 1000.0,
            population_density: 10.0,
            life_expectancy: life,
            infant_deaths: 5.0,
        };
        vec![
            mk("norway", "europe", 82.0),
            mk("kenya", "africa", 61.0),
            mk("france", "europe", 81.0),
            mk("ghana", "africa", 63.0),
            mk("japan", "asia", 84.0),
        ]
    }

    #[test]
    fn region_filter_returns_matching_rows_in_order() {
        let ds = dataset();
        assert_eq!(region_indices(&ds, "europe"), vec![0, 2]);
        assert_eq!(region_indices(&ds, "africa"), vec![1, 3]);
    }

    #[test]
    fn unknown_region_yields_empty_subset() {
        assert!(region_indices(&dataset(), "antarctica").is_empty());
    }

    #[test]
    fn regions_partition_the_dataset() {
        let ds = dataset();
        let mut all: Vec<usize> = distinct_regions(&ds)
            .iter()
            .flat_map(|r| region_indices(&ds, r))
            .collect();
        all.sort();
        assert_eq!(all, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn inactive_selection_is_identity() {
        let subset = vec![0, 2, 4];
        let selection = Selection::default();
        assert!(!selection.is_active());
        assert_eq!(selection.apply(&subset), subset);
    }

    #[test]
    fn setting_empty_positions_deactivates() {
        let mut selection = Selection::default();
        selection.set(vec![1]);
        assert!(selection.is_active());
        selection.set(Vec::new());
        assert!(!selection.is_active());
        assert_eq!(selection.count(), None);
    }

    #[test]
    fn selection_picks_subset_positions() {
        // 5-row region subset, user selects positions 0 and 2
        let subset = vec![10, 11, 12, 13, 14];
        let mut selection = Selection::default();
        selection.set(vec![0, 2]);
        assert_eq!(selection.apply(&subset), vec![10, 12]);
        assert_eq!(selection.count(), Some(2));
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let subset = vec![10, 11];
        let mut selection = Selection::default();
        selection.set(vec![1, 7]);
        assert_eq!(selection.apply(&subset), vec![11]);
    }

    #[test]
    fn clear_restores_identity() {
        let subset = vec![3, 4, 5];
        let mut selection = Selection::default();
        selection.set(vec![0]);
        selection.clear();
        assert_eq!(selection.apply(&subset), subset);
    }

    #[test]
    fn selection_on_empty_subset_is_empty() {
        let mut selection = Selection::default();
        selection.set(vec![0, 1]);
        assert!(selection.apply(&[]).is_empty());
    }
}
