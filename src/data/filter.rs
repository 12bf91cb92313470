use std::collections::BTreeSet;

use super::model::{Facet, Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Filter criteria: search term, facet selections, price range
// ---------------------------------------------------------------------------

/// Lower bound of the price slider.
pub const PRICE_MIN: f64 = 0.0;
/// Upper bound of the price slider.
pub const PRICE_MAX: f64 = 1500.0;
/// Default selected price range, narrower than the slider bounds.
pub const DEFAULT_PRICE_RANGE: (f64, f64) = (50.0, 500.0);

/// Everything the user can narrow the dataset by. Rebuilt from widget state
/// on every frame; the filter itself is stateless.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against name, neighbourhood group
    /// and room type. Empty string disables the search predicate.
    pub search_term: String,
    /// Selected neighbourhood groups. An empty set hides everything.
    pub neighbourhood_groups: BTreeSet<String>,
    /// Selected room types. An empty set hides everything.
    pub room_types: BTreeSet<String>,
    /// Inclusive lower price bound.
    pub min_price: f64,
    /// Inclusive upper price bound.
    pub max_price: f64,
}

impl FilterCriteria {
    /// Criteria with every facet value selected and the default price range,
    /// matching the widgets' initial state.
    pub fn select_all(dataset: &ListingDataset) -> Self {
        FilterCriteria {
            search_term: String::new(),
            neighbourhood_groups: dataset.neighbourhood_groups.iter().cloned().collect(),
            room_types: dataset.room_types.iter().cloned().collect(),
            min_price: DEFAULT_PRICE_RANGE.0,
            max_price: DEFAULT_PRICE_RANGE.1,
        }
    }

    /// The selection set for a facet.
    pub fn facet_selection(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::NeighbourhoodGroup => &self.neighbourhood_groups,
            Facet::RoomType => &self.room_types,
        }
    }

    /// Mutable selection set for a facet.
    pub fn facet_selection_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::NeighbourhoodGroup => &mut self.neighbourhood_groups,
            Facet::RoomType => &mut self.room_types,
        }
    }
}

/// All four predicates ANDed: search, both facets, price range.
/// `needle_lower` is the pre-lowercased search term so the per-frame scan
/// lowercases it once, not once per row.
fn listing_passes(criteria: &FilterCriteria, needle_lower: &str, listing: &Listing) -> bool {
    if !needle_lower.is_empty() {
        let hit = listing.display_name().to_lowercase().contains(needle_lower)
            || listing.neighbourhood_group.to_lowercase().contains(needle_lower)
            || listing.room_type.to_lowercase().contains(needle_lower);
        if !hit {
            return false;
        }
    }

    for facet in Facet::ALL {
        if !criteria
            .facet_selection(facet)
            .contains(facet.value_of(listing))
        {
            return false;
        }
    }

    listing.price >= criteria.min_price && listing.price <= criteria.max_price
}

/// Return indices of listings that pass the criteria, in dataset order.
pub fn filtered_indices(dataset: &ListingDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.search_term.to_lowercase();

    dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| listing_passes(criteria, &needle, listing))
        .map(|(i, _)| i)
        .collect()
}

/// Keep only listings with at least `min_reviews` reviews.
///
/// Applied on top of an already-filtered index list by the map view alone;
/// summary metrics and tables ignore this threshold.
pub fn with_min_reviews(dataset: &ListingDataset, indices: &[usize], min_reviews: u32) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| dataset.listings[i].number_of_reviews >= min_reviews)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, group: &str, room: &str, price: f64, reviews: u32) -> Listing {
        Listing {
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
            neighbourhood_group: group.to_string(),
            room_type: room.to_string(),
            price,
            number_of_reviews: reviews,
            latitude: 40.7,
            longitude: -74.0,
        }
    }

    /// The two-row dataset from the acceptance scenarios.
    fn two_listings() -> ListingDataset {
        ListingDataset::from_listings(vec![
            listing("A", "Manhattan", "Private room", 100.0, 10),
            listing("B", "Brooklyn", "Entire home", 600.0, 2),
        ])
    }

    // -- predicate composition --

    /// Price range 50–500 with all facets selected keeps only listing A.
    #[test]
    fn price_range_narrows_to_a() {
        let ds = two_listings();
        let criteria = FilterCriteria::select_all(&ds);

        let idx = filtered_indices(&ds, &criteria);
        assert_eq!(idx, vec![0]);
        assert_eq!(ds.listings[idx[0]].display_name(), "A");
    }

    /// Search is case-insensitive and matches the neighbourhood group.
    #[test]
    fn search_matches_neighbourhood_group() {
        let ds = two_listings();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.min_price = PRICE_MIN;
        criteria.max_price = PRICE_MAX;
        criteria.search_term = "brooklyn".to_string();

        let idx = filtered_indices(&ds, &criteria);
        assert_eq!(idx, vec![1]);
    }

    /// Search also matches room types.
    #[test]
    fn search_matches_room_type() {
        let ds = two_listings();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.search_term = "private".to_string();

        let idx = filtered_indices(&ds, &criteria);
        assert_eq!(idx, vec![0]);
    }

    /// Search narrows first, then the facet/range filters narrow further:
    /// "brooklyn" finds B, but B's price (600) is outside the default range.
    #[test]
    fn search_and_price_compose() {
        let ds = two_listings();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.search_term = "brooklyn".to_string();

        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    /// Deselecting every neighbourhood group yields an empty view; there is
    /// no implicit select-all for an empty set.
    #[test]
    fn empty_facet_selection_hides_everything() {
        let ds = two_listings();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.neighbourhood_groups.clear();

        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    /// Price bounds are inclusive at both ends.
    #[test]
    fn price_bounds_inclusive() {
        let ds = ListingDataset::from_listings(vec![
            listing("low", "Queens", "Private room", 50.0, 0),
            listing("high", "Queens", "Private room", 500.0, 0),
            listing("outside", "Queens", "Private room", 500.01, 0),
        ]);
        let criteria = FilterCriteria::select_all(&ds);

        let idx = filtered_indices(&ds, &criteria);
        assert_eq!(idx, vec![0, 1]);
    }

    /// Missing names are treated as empty strings: they never match a
    /// non-empty search term and never panic.
    #[test]
    fn missing_name_is_searchable_as_empty() {
        let ds = ListingDataset::from_listings(vec![
            listing("", "Manhattan", "Private room", 100.0, 0),
            listing("Sunny loft", "Manhattan", "Private room", 100.0, 0),
        ]);
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.search_term = "loft".to_string();

        assert_eq!(filtered_indices(&ds, &criteria), vec![1]);
    }

    /// Every filtered member must satisfy all the predicates, spelled out
    /// here independently of the filter code, and the result preserves
    /// dataset order.
    #[test]
    fn result_is_ordered_subset_satisfying_predicates() {
        let ds = ListingDataset::from_listings(vec![
            listing("d", "Brooklyn", "Private room", 80.0, 1),
            listing("c", "Manhattan", "Entire home", 300.0, 9),
            listing("b", "Brooklyn", "Entire home", 900.0, 4),
            listing("a", "Manhattan", "Private room", 55.0, 7),
        ]);
        let criteria = FilterCriteria::select_all(&ds);

        let passes = |l: &Listing| {
            criteria
                .neighbourhood_groups
                .contains(l.neighbourhood_group.as_str())
                && criteria.room_types.contains(l.room_type.as_str())
                && l.price >= criteria.min_price
                && l.price <= criteria.max_price
        };

        let idx = filtered_indices(&ds, &criteria);
        assert!(idx.windows(2).all(|w| w[0] < w[1]), "order preserved");
        for &i in &idx {
            assert!(passes(&ds.listings[i]));
        }
        for i in 0..ds.len() {
            if !idx.contains(&i) {
                assert!(!passes(&ds.listings[i]));
            }
        }
    }

    /// Filtering an already-filtered view with the same criteria is a fixed
    /// point.
    #[test]
    fn filtering_is_idempotent() {
        let ds = ListingDataset::from_listings(vec![
            listing("d", "Brooklyn", "Private room", 80.0, 1),
            listing("c", "Manhattan", "Entire home", 300.0, 9),
            listing("b", "Brooklyn", "Entire home", 900.0, 4),
        ]);
        let criteria = FilterCriteria::select_all(&ds);

        let once = filtered_indices(&ds, &criteria);
        let narrowed = ListingDataset::from_listings(
            once.iter().map(|&i| ds.listings[i].clone()).collect(),
        );
        let twice = filtered_indices(&narrowed, &criteria);

        assert_eq!(twice.len(), once.len());
        for (j, &i) in once.iter().enumerate() {
            assert_eq!(narrowed.listings[twice[j]], ds.listings[i]);
        }
    }

    /// An empty dataset filters to an empty view without errors.
    #[test]
    fn empty_dataset_yields_empty_view() {
        let ds = ListingDataset::default();
        let criteria = FilterCriteria::select_all(&ds);
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    // -- with_min_reviews --

    /// The review threshold composes with an existing index list and keeps
    /// boundary values (>=).
    #[test]
    fn min_reviews_threshold_inclusive() {
        let ds = ListingDataset::from_listings(vec![
            listing("a", "Queens", "Private room", 100.0, 9),
            listing("b", "Queens", "Private room", 100.0, 10),
            listing("c", "Queens", "Private room", 100.0, 11),
        ]);
        let all: Vec<usize> = (0..ds.len()).collect();

        assert_eq!(with_min_reviews(&ds, &all, 10), vec![1, 2]);
        assert_eq!(with_min_reviews(&ds, &all, 0), all);
        assert!(with_min_reviews(&ds, &[], 0).is_empty());
    }
}
